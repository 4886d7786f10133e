// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
// 错误处理模块

use thiserror::Error;

use crate::detection::types::ModelFamily;
use crate::models::ModelPreset;

/// 模型加载错误 (加载失败时保留之前的模型)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("failed to load {preset}: {reason}")]
    Backend { preset: ModelPreset, reason: String },

    #[error("{preset} is not supported by this detector backend")]
    Unsupported { preset: ModelPreset },

    #[error("detector for {preset} reports family {reported}, expected {expected}")]
    FamilyMismatch {
        preset: ModelPreset,
        expected: ModelFamily,
        reported: ModelFamily,
    },
}

/// 摄像头访问错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device found")]
    NoDevice,

    #[error("camera error: {0}")]
    Other(String),
}

/// 单帧检测错误 (本地恢复, 跳过当前帧)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionCycleError {
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("detector returned {got} results for a {expected} model")]
    FamilyMismatch {
        expected: ModelFamily,
        got: ModelFamily,
    },

    #[error("{family} detection has {got} keypoints, expected {expected}")]
    KeypointCount {
        family: ModelFamily,
        expected: usize,
        got: usize,
    },

    #[error("unknown handedness label: {0}")]
    UnknownHandedness(String),
}

/// 图片解码错误
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("image has zero size")]
    Empty,
}

/// 配置文件错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 帧循环入口错误 (start_camera / load_image)
#[derive(Error, Debug)]
pub enum FrameLoopError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type LoadResult<T> = Result<T, LoadError>;
