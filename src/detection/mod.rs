// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
/// 检测系统 (Detection System)
///
/// 推理由外部检测器完成, 本模块只负责统一接口
/// - Detector: 检测器接口 + 适配层 (加载 / 归一化 / 过滤)
/// - Types:    统一检测数据结构 (按模型类别打标签)
/// - Replay:   回放检测器 (离线 / 无模型环境)
pub mod detector;
pub mod replay;
pub mod types;

pub use detector::{
    normalize, Detector, DetectorAdapter, DetectorBackend, DetectorHandle, LoadOutcome,
    RawDetections, RawHand, RawKeypoint, RawObject, RawPose,
};
pub use replay::{ReplayBackend, ReplayDetector};
pub use types::{
    BBox, DetectionSet, Dims, Frame, HandDetection, Handedness, Keypoint, ModelFamily,
    ObjectDetection, PoseDetection,
};
