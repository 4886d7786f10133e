// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 叠加层渲染器 (Overlay Renderer)
//!
//! 每次渲染先清空整个表面, 再按模型类别绘制:
//! - Object: 检测框 + 类别标签 + 四角强调线
//! - Pose:   骨架连线 + 关键点 + "Person N" 名牌
//! - Hand:   手部连线 + 关键点 (指尖放大) + "<Left|Right> Hand" 标签
//!
//! 标签不做边界裁剪, 靠近画面边缘时可能部分画到表面之外。
pub mod palette;
pub mod surface;

use crate::detection::types::{
    DetectionSet, Dims, HandDetection, ObjectDetection, PoseDetection,
};
use crate::{FINGERTIPS, HAND_CONNECTIONS, SKELETON};
use palette::{alternating, class_color, Color, HAND_COLORS, POSE_COLORS, WHITE};
pub use surface::{CanvasSurface, DrawOp, RecordingSurface, RectF, Surface};

/// 检测框线宽
pub const BOX_LINE_WIDTH: f32 = 3.0;
/// 四角强调线: 长度 / 线宽
pub const CORNER_LENGTH: f32 = 15.0;
pub const CORNER_WIDTH: f32 = 4.0;
/// 标签: 字号 / 水平内边距(合计) / 高度
pub const LABEL_FONT_SIZE: f32 = 16.0;
pub const LABEL_PADDING: f32 = 10.0;
pub const LABEL_HEIGHT: f32 = 24.0;
/// 骨架 / 手部连线线宽
pub const LIMB_LINE_WIDTH: f32 = 3.0;
/// 姿态关键点: 外圈 / 内圈半径
pub const POSE_OUTER_RADIUS: f32 = 8.0;
pub const POSE_INNER_RADIUS: f32 = 4.0;
/// 手部关键点: 指尖 / 其他关节半径
pub const FINGERTIP_RADIUS: f32 = 8.0;
pub const JOINT_RADIUS: f32 = 5.0;
pub const FINGERTIP_OUTLINE: f32 = 2.0;
/// 名牌与锚点的间距
pub const CHIP_OFFSET: f32 = 10.0;

/// 源坐标 → 表面坐标的缩放
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    /// 横纵向独立缩放, 源尺寸为0时不缩放
    pub fn between(source: Dims, surface: Dims) -> Self {
        let axis = |dst: u32, src: u32| {
            if src == 0 {
                1.0
            } else {
                dst as f32 / src as f32
            }
        };
        Self {
            x: axis(surface.width, source.width),
            y: axis(surface.height, source.height),
        }
    }

    pub fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.x, y * self.y)
    }
}

/// 叠加层渲染器
#[derive(Clone, Debug)]
pub struct OverlayRenderer {
    font_size: f32,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self {
            font_size: LABEL_FONT_SIZE,
        }
    }
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 渲染一帧检测结果
    ///
    /// # Arguments
    /// * `source` - 输入源原始尺寸 (检测坐标所在坐标系)
    /// * `threshold` - 姿态关键点可见性阈值
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        set: &DetectionSet,
        source: Dims,
        threshold: f32,
    ) {
        surface.clear();
        let scale = Scale::between(source, surface.size());

        match set {
            DetectionSet::Object(objects) => {
                for object in objects {
                    self.draw_object(surface, object, scale);
                }
            }
            DetectionSet::Pose(poses) => {
                for (index, pose) in poses.iter().enumerate() {
                    self.draw_pose(surface, pose, index, scale, threshold);
                }
            }
            DetectionSet::Hand(hands) => {
                for (index, hand) in hands.iter().enumerate() {
                    self.draw_hand(surface, hand, index, scale);
                }
            }
        }
    }

    fn draw_object<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        object: &ObjectDetection,
        scale: Scale,
    ) {
        let color = class_color(&object.class);
        let (x, y) = scale.point(object.bbox.x, object.bbox.y);
        let rect = RectF::new(x, y, object.bbox.width * scale.x, object.bbox.height * scale.y);

        // 绘制边框
        surface.stroke_rect(rect, color, BOX_LINE_WIDTH);

        // 绘制标签 (框上方)
        let label = format!("{} {}%", object.class, (object.score * 100.0).round() as i32);
        self.draw_chip(surface, &label, (rect.x, rect.y - LABEL_HEIGHT), color);

        // 四角强调线
        draw_corner_accents(surface, rect, color);
    }

    fn draw_pose<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        pose: &PoseDetection,
        index: usize,
        scale: Scale,
        threshold: f32,
    ) {
        let color = alternating(&POSE_COLORS, index);
        let kps = &pose.keypoints;

        // 骨架连接: 两端都可见才画
        for &(a, b) in SKELETON.iter() {
            let (ka, kb) = (&kps[a], &kps[b]);
            if ka.is_visible(threshold) && kb.is_visible(threshold) {
                surface.line(
                    scale.point(ka.x, ka.y),
                    scale.point(kb.x, kb.y),
                    color,
                    LIMB_LINE_WIDTH,
                );
            }
        }

        // 关键点: 外圈彩色 + 内圈白色
        for kp in kps.iter().filter(|kp| kp.is_visible(threshold)) {
            let center = scale.point(kp.x, kp.y);
            surface.fill_circle(center, POSE_OUTER_RADIUS, color);
            surface.fill_circle(center, POSE_INNER_RADIUS, WHITE);
        }

        // 名牌 (鼻子上方)
        let nose = pose.nose();
        if nose.is_visible(threshold) {
            let label = format!("Person {}", index + 1);
            let (nx, ny) = scale.point(nose.x, nose.y);
            let width = self.chip_width(surface, &label);
            self.draw_chip(
                surface,
                &label,
                (nx - width / 2.0, ny - LABEL_HEIGHT - CHIP_OFFSET),
                color,
            );
        }
    }

    fn draw_hand<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        hand: &HandDetection,
        index: usize,
        scale: Scale,
    ) {
        let color = alternating(&HAND_COLORS, index);
        let kps = &hand.keypoints;

        // 手部连线: 无置信度, 全部绘制
        for &(a, b) in HAND_CONNECTIONS.iter() {
            surface.line(
                scale.point(kps[a].0, kps[a].1),
                scale.point(kps[b].0, kps[b].1),
                color,
                LIMB_LINE_WIDTH,
            );
        }

        for (i, &(x, y)) in kps.iter().enumerate() {
            let center = scale.point(x, y);
            if FINGERTIPS.contains(&i) {
                surface.fill_circle(center, FINGERTIP_RADIUS, WHITE);
                surface.stroke_circle(center, FINGERTIP_RADIUS, color, FINGERTIP_OUTLINE);
            } else {
                surface.fill_circle(center, JOINT_RADIUS, color);
            }
        }

        // 标签 (手腕下方)
        let label = hand.label();
        let (wx, wy) = hand.wrist();
        let (wx, wy) = scale.point(wx, wy);
        let width = self.chip_width(surface, &label);
        self.draw_chip(surface, &label, (wx - width / 2.0, wy + CHIP_OFFSET), color);
    }

    fn chip_width<S: Surface + ?Sized>(&self, surface: &S, text: &str) -> f32 {
        surface.measure_text(text, self.font_size) + LABEL_PADDING
    }

    /// 标签底板 = 文字宽度 + 固定内边距, 白色文字, 不做边界裁剪
    fn draw_chip<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        top_left: (f32, f32),
        background: Color,
    ) {
        let width = self.chip_width(surface, text);
        surface.fill_rect(RectF::new(top_left.0, top_left.1, width, LABEL_HEIGHT), background);
        surface.fill_text(
            text,
            (
                top_left.0 + LABEL_PADDING / 2.0,
                top_left.1 + (LABEL_HEIGHT - self.font_size) / 2.0,
            ),
            self.font_size,
            WHITE,
        );
    }
}

/// 四角L形强调线, 与边框描边相互独立
fn draw_corner_accents<S: Surface + ?Sized>(surface: &mut S, rect: RectF, color: Color) {
    let (l, t) = (rect.x, rect.y);
    let (r, b) = (rect.x + rect.width, rect.y + rect.height);
    let legs = [
        ((l, t), (l + CORNER_LENGTH, t)),
        ((l, t), (l, t + CORNER_LENGTH)),
        ((r, t), (r - CORNER_LENGTH, t)),
        ((r, t), (r, t + CORNER_LENGTH)),
        ((l, b), (l + CORNER_LENGTH, b)),
        ((l, b), (l, b - CORNER_LENGTH)),
        ((r, b), (r - CORNER_LENGTH, b)),
        ((r, b), (r, b - CORNER_LENGTH)),
    ];
    for (from, to) in legs {
        surface.line(from, to, color, CORNER_WIDTH);
    }
}
