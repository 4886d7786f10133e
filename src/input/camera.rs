// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 摄像头输入接口

use async_trait::async_trait;
use tracing::info;

use crate::detection::types::{Dims, Frame};
use crate::error::CameraError;

/// 摄像头能力: 异步获取视频流 (可能需要用户授权)
#[async_trait]
pub trait CameraSource: Send {
    async fn acquire(&mut self) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// 已打开的视频流
pub trait CameraStream: Send {
    /// 原生分辨率
    fn dims(&self) -> Dims;

    /// 读取下一帧, 暂无新帧时返回 None
    fn next_frame(&mut self) -> Option<Frame>;

    /// 释放设备
    fn release(self: Box<Self>);
}

/// 循环播放固定帧序列的视频流
pub struct FrameSequence {
    frames: Vec<Frame>,
    dims: Dims,
    cursor: usize,
}

impl FrameSequence {
    /// 帧尺寸以第一帧为准
    pub fn new(frames: Vec<Frame>) -> Self {
        let dims = frames.first().map(Frame::dims).unwrap_or_default();
        Self {
            frames,
            dims,
            cursor: 0,
        }
    }
}

impl CameraStream for FrameSequence {
    fn dims(&self) -> Dims {
        self.dims
    }

    fn next_frame(&mut self) -> Option<Frame> {
        if self.frames.is_empty() {
            return None;
        }
        let frame = self.frames[self.cursor % self.frames.len()].clone();
        self.cursor = self.cursor.wrapping_add(1);
        Some(frame)
    }

    fn release(self: Box<Self>) {
        info!("📷 帧序列已释放 ({} 帧)", self.frames.len());
    }
}

/// 每次获取返回同一帧序列的摄像头
pub struct SequenceCamera {
    frames: Vec<Frame>,
}

impl SequenceCamera {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

#[async_trait]
impl CameraSource for SequenceCamera {
    async fn acquire(&mut self) -> Result<Box<dyn CameraStream>, CameraError> {
        if self.frames.is_empty() {
            return Err(CameraError::NoDevice);
        }
        Ok(Box::new(FrameSequence::new(self.frames.clone())))
    }
}
