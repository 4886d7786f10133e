// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 绘图表面 (Drawing surface)
//!
//! - [`Surface`]: 渲染器使用的最小2D绘图接口
//! - [`CanvasSurface`]: 基于 `image::RgbaImage` + `imageproc` 的离屏画布
//! - [`RecordingSurface`]: 只记录绘图指令, 用于无界面环境和校验

use ab_glyph::{FontVec, PxScale};
use image::RgbaImage;
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_polygon_mut,
    draw_text_mut, text_size,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use tracing::warn;

use super::palette::{Color, TRANSPARENT};
use crate::detection::types::Dims;

/// 矩形 (浮点, 表面坐标)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// 2D绘图接口
pub trait Surface {
    /// 当前显示尺寸
    fn size(&self) -> Dims;

    /// 调整尺寸 (内容被清空)
    fn resize(&mut self, dims: Dims);

    /// 清空整个表面
    fn clear(&mut self);

    fn stroke_rect(&mut self, rect: RectF, color: Color, width: f32);

    fn fill_rect(&mut self, rect: RectF, color: Color);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32);

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color);

    fn stroke_circle(&mut self, center: (f32, f32), radius: f32, color: Color, width: f32);

    /// 文字宽度 (像素)
    fn measure_text(&self, text: &str, font_size: f32) -> f32;

    /// 绘制文字, `pos` 为文字左上角
    fn fill_text(&mut self, text: &str, pos: (f32, f32), font_size: f32, color: Color);
}

// ========== 记录表面 ==========

/// 绘图指令
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    StrokeRect {
        rect: RectF,
        color: Color,
        width: f32,
    },
    FillRect {
        rect: RectF,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
    },
    FillCircle {
        center: (f32, f32),
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: (f32, f32),
        radius: f32,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        pos: (f32, f32),
        font_size: f32,
        color: Color,
    },
}

/// 记录所有绘图指令的表面, 文字宽度按等宽字体估算
#[derive(Debug, Default)]
pub struct RecordingSurface {
    dims: Dims,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// 最近一次清空之后的指令
    pub fn ops_since_clear(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DrawOp::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.ops[start..]
    }
}

/// 无字体时的文字宽度估算
pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.6
}

impl Surface for RecordingSurface {
    fn size(&self) -> Dims {
        self.dims
    }

    fn resize(&mut self, dims: Dims) {
        self.dims = dims;
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_rect(&mut self, rect: RectF, color: Color, width: f32) {
        self.ops.push(DrawOp::StrokeRect { rect, color, width });
    }

    fn fill_rect(&mut self, rect: RectF, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: (f32, f32), radius: f32, color: Color, width: f32) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        estimate_text_width(text, font_size)
    }

    fn fill_text(&mut self, text: &str, pos: (f32, f32), font_size: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            pos,
            font_size,
            color,
        });
    }
}

// ========== 离屏画布 ==========

/// 离屏RGBA画布, 清空为全透明, 便于叠加到原图
pub struct CanvasSurface {
    image: RgbaImage,
    font: Option<FontVec>,
}

impl CanvasSurface {
    pub fn new(dims: Dims) -> Self {
        Self {
            image: RgbaImage::new(dims.width, dims.height),
            font: None,
        }
    }

    /// 加载标签字体 (ttf/otf字节)
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Self {
        match FontVec::try_from_vec(bytes) {
            Ok(font) => self.font = Some(font),
            Err(e) => warn!("⚠️ 字体加载失败: {}, 标签文字将不绘制", e),
        }
        self
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn to_rect(rect: RectF) -> Option<Rect> {
        let width = rect.width.round();
        let height = rect.height.round();
        if width < 1.0 || height < 1.0 {
            return None;
        }
        Some(
            Rect::at(rect.x.round() as i32, rect.y.round() as i32)
                .of_size(width as u32, height as u32),
        )
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Dims {
        Dims::new(self.image.width(), self.image.height())
    }

    fn resize(&mut self, dims: Dims) {
        self.image = RgbaImage::new(dims.width, dims.height);
    }

    fn clear(&mut self) {
        let transparent = TRANSPARENT.to_rgba();
        for pixel in self.image.pixels_mut() {
            *pixel = transparent;
        }
    }

    fn stroke_rect(&mut self, rect: RectF, color: Color, width: f32) {
        // 四条边各画一个实心矩形, 线宽居中在边框上
        let half = width / 2.0;
        let edges = [
            RectF::new(rect.x - half, rect.y - half, rect.width + width, width),
            RectF::new(rect.x - half, rect.y + rect.height - half, rect.width + width, width),
            RectF::new(rect.x - half, rect.y - half, width, rect.height + width),
            RectF::new(rect.x + rect.width - half, rect.y - half, width, rect.height + width),
        ];
        for edge in edges {
            self.fill_rect(edge, color);
        }
    }

    fn fill_rect(&mut self, rect: RectF, color: Color) {
        if let Some(rect) = Self::to_rect(rect) {
            draw_filled_rect_mut(&mut self.image, rect, color.to_rgba());
        }
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1.0 {
            self.fill_circle(from, width / 2.0, color);
            return;
        }
        // 粗线: 沿法线方向扩展成四边形
        let (nx, ny) = (-dy / len * width / 2.0, dx / len * width / 2.0);
        let corners = [
            (from.0 + nx, from.1 + ny),
            (to.0 + nx, to.1 + ny),
            (to.0 - nx, to.1 - ny),
            (from.0 - nx, from.1 - ny),
        ];
        let mut poly: Vec<Point<i32>> = corners
            .iter()
            .map(|(x, y)| Point::new(x.round() as i32, y.round() as i32))
            .collect();
        poly.dedup();
        if poly.len() < 3 || poly.first() == poly.last() {
            imageproc::drawing::draw_line_segment_mut(&mut self.image, from, to, color.to_rgba());
            return;
        }
        draw_polygon_mut(&mut self.image, &poly, color.to_rgba());
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
        let center = (center.0.round() as i32, center.1.round() as i32);
        draw_filled_circle_mut(
            &mut self.image,
            center,
            radius.round().max(1.0) as i32,
            color.to_rgba(),
        );
    }

    fn stroke_circle(&mut self, center: (f32, f32), radius: f32, color: Color, width: f32) {
        let center = (center.0.round() as i32, center.1.round() as i32);
        let outer = radius.round() as i32;
        let rings = width.round().max(1.0) as i32;
        for i in 0..rings {
            let r = outer - i;
            if r > 0 {
                draw_hollow_circle_mut(&mut self.image, center, r, color.to_rgba());
            }
        }
    }

    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        match &self.font {
            Some(font) => text_size(PxScale::from(font_size), font, text).0 as f32,
            None => estimate_text_width(text, font_size),
        }
    }

    fn fill_text(&mut self, text: &str, pos: (f32, f32), font_size: f32, color: Color) {
        if let Some(font) = &self.font {
            draw_text_mut(
                &mut self.image,
                color.to_rgba(),
                pos.0.round() as i32,
                pos.1.round() as i32,
                PxScale::from(font_size),
                font,
                text,
            );
        }
    }
}
