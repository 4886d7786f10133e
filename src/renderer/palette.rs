// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 配色表

use phf::phf_map;

/// RGBA颜色
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

/// 未登记类别的默认颜色
pub const DEFAULT_CLASS_COLOR: Color = Color::rgb(0, 255, 136);

/// 目标类别配色
static CLASS_COLORS: phf::Map<&'static str, Color> = phf_map! {
    "person" => Color::rgb(255, 107, 107),
    "car" => Color::rgb(78, 205, 196),
    "truck" => Color::rgb(69, 183, 209),
    "bus" => Color::rgb(150, 206, 180),
    "motorcycle" => Color::rgb(255, 234, 167),
    "bicycle" => Color::rgb(221, 160, 221),
    "dog" => Color::rgb(152, 216, 200),
    "cat" => Color::rgb(247, 220, 111),
    "bird" => Color::rgb(187, 143, 206),
    "horse" => Color::rgb(133, 193, 233),
    "chair" => Color::rgb(248, 196, 113),
    "bottle" => Color::rgb(130, 224, 170),
    "cup" => Color::rgb(241, 148, 138),
    "laptop" => Color::rgb(174, 214, 241),
    "cell phone" => Color::rgb(245, 183, 177),
    "book" => Color::rgb(215, 189, 226),
};

/// 姿态实例交替配色
pub const POSE_COLORS: [Color; 2] = [Color::rgb(0, 255, 136), Color::rgb(255, 0, 170)];

/// 手部实例交替配色
pub const HAND_COLORS: [Color; 2] = [Color::rgb(0, 212, 255), Color::rgb(255, 170, 0)];

/// 类别颜色, 未知类别使用默认色
pub fn class_color(class: &str) -> Color {
    CLASS_COLORS
        .get(class)
        .copied()
        .unwrap_or(DEFAULT_CLASS_COLOR)
}

/// 实例索引 → 交替颜色
pub fn alternating(palette: &[Color; 2], index: usize) -> Color {
    palette[index % palette.len()]
}
