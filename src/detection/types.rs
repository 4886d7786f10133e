// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
/// 检测数据结构定义
/// Data structures shared by adapter / renderer / describer / aggregator
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ========== 公共常量 ==========

/// 姿态关键点数量 (COCO 17点)
pub const POSE_KEYPOINTS: usize = 17;

/// 手部关键点数量 (21点手部地标)
pub const HAND_KEYPOINTS: usize = 21;

/// COCO关键点索引: 0-鼻子, 9-左手腕, 10-右手腕
pub const NOSE: usize = 0;
pub const LEFT_WRIST: usize = 9;
pub const RIGHT_WRIST: usize = 10;

/// 手部关键点索引: 0-手腕
pub const WRIST: usize = 0;

// ========== 枚举类型 ==========

/// 模型类别 (决定检测调用 / 渲染器 / 描述生成器)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Object,
    Pose,
    Hand,
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelFamily::Object => "object",
            ModelFamily::Pose => "pose",
            ModelFamily::Hand => "hand",
        };
        f.write_str(name)
    }
}

/// 左右手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// 大小写不敏感解析 ("Left" / "left" / "RIGHT")
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Handedness::Left),
            "right" => Some(Handedness::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== 数据结构 ==========

/// 尺寸 (宽, 高), 单位像素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dims {
    pub width: u32,
    pub height: u32,
}

impl Dims {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 输入帧 (RGBA, 共享数据避免复制)
#[derive(Clone)]
pub struct Frame {
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(rgba_data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            rgba_data: Arc::new(rgba_data),
            width,
            height,
        }
    }

    pub fn dims(&self) -> Dims {
        Dims::new(self.width, self.height)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba_data.len())
            .finish()
    }
}

/// 检测框 (x, y, 宽, 高), 源像素坐标
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// 关键点 (x, y, 置信度)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self { x, y, score }
    }

    /// 可见性判定: 置信度严格大于阈值
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.score > threshold
    }
}

/// 目标检测结果
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectDetection {
    pub class: String,
    pub score: f32,
    pub bbox: BBox,
}

/// 姿态检测结果 (固定17个关键点, 顺序与骨架连接表一致)
#[derive(Clone, Debug, PartialEq)]
pub struct PoseDetection {
    pub keypoints: [Keypoint; POSE_KEYPOINTS],
}

impl PoseDetection {
    pub fn new(keypoints: [Keypoint; POSE_KEYPOINTS]) -> Self {
        Self { keypoints }
    }

    /// 超过阈值的关键点数量
    pub fn visible_count(&self, threshold: f32) -> usize {
        self.keypoints
            .iter()
            .filter(|kp| kp.is_visible(threshold))
            .count()
    }

    pub fn nose(&self) -> &Keypoint {
        &self.keypoints[NOSE]
    }

    /// 任一手腕可见且高于鼻子 (屏幕坐标y更小)
    pub fn hand_raised(&self, threshold: f32) -> bool {
        let nose_y = self.nose().y;
        [LEFT_WRIST, RIGHT_WRIST].iter().any(|&idx| {
            let wrist = &self.keypoints[idx];
            wrist.is_visible(threshold) && wrist.y < nose_y
        })
    }
}

/// 手部检测结果 (固定21个关键点, 无置信度)
#[derive(Clone, Debug, PartialEq)]
pub struct HandDetection {
    pub keypoints: [(f32, f32); HAND_KEYPOINTS],
    pub handedness: Handedness,
}

impl HandDetection {
    pub fn wrist(&self) -> (f32, f32) {
        self.keypoints[WRIST]
    }

    /// 标签 "<Handedness> Hand"
    pub fn label(&self) -> String {
        format!("{} Hand", self.handedness)
    }
}

/// 单次推理的检测集合, 按模型类别打标签 (不可混合)
#[derive(Clone, Debug, PartialEq)]
pub enum DetectionSet {
    Object(Vec<ObjectDetection>),
    Pose(Vec<PoseDetection>),
    Hand(Vec<HandDetection>),
}

impl DetectionSet {
    pub fn empty(family: ModelFamily) -> Self {
        match family {
            ModelFamily::Object => DetectionSet::Object(Vec::new()),
            ModelFamily::Pose => DetectionSet::Pose(Vec::new()),
            ModelFamily::Hand => DetectionSet::Hand(Vec::new()),
        }
    }

    pub fn family(&self) -> ModelFamily {
        match self {
            DetectionSet::Object(_) => ModelFamily::Object,
            DetectionSet::Pose(_) => ModelFamily::Pose,
            DetectionSet::Hand(_) => ModelFamily::Hand,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DetectionSet::Object(items) => items.len(),
            DetectionSet::Pose(items) => items.len(),
            DetectionSet::Hand(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
