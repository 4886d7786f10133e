// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
/// 输入系统 (Input System)
///
/// 采集与解码由外部能力提供, 本模块只定义接口
/// - Camera: 摄像头获取 / 逐帧读取 / 释放
/// - Image:  静态图片解码
pub mod camera;
pub mod image;

use std::fmt;

pub use camera::{CameraSource, CameraStream, FrameSequence, SequenceCamera};
pub use image::{ImageCrateDecoder, ImageDecoder};

/// 当前输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Camera,
    StaticImage,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Camera => f.write_str("camera"),
            InputMode::StaticImage => f.write_str("image"),
        }
    }
}
