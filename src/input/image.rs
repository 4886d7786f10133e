// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 静态图片解码

use crate::detection::types::Frame;
use crate::error::DecodeError;

/// 图片解码能力: 字节 → RGBA帧 (含原生尺寸)
pub trait ImageDecoder: Send {
    fn decode(&self, bytes: &[u8]) -> Result<Frame, DecodeError>;
}

/// 基于 image crate 的解码器 (PNG / JPEG / ...)
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Frame, DecodeError> {
        let rgba = ::image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::Empty);
        }
        Ok(Frame::new(rgba.into_raw(), width, height))
    }
}
