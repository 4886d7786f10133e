// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 回放检测器 (Replay detector)
//!
//! 不做推理, 把预先录制的原始检测结果原样返回。用于离线标注工具
//! 和无模型环境下驱动整条流水线。

use async_trait::async_trait;

use super::detector::{Detector, DetectorBackend, RawDetections};
use super::types::{Frame, ModelFamily};
use crate::error::{DetectionCycleError, LoadError, LoadResult};
use crate::models::ModelPreset;

/// 回放后端: 只能加载与录制结果同类别的预设
pub struct ReplayBackend {
    recorded: RawDetections,
}

impl ReplayBackend {
    pub fn new(recorded: RawDetections) -> Self {
        Self { recorded }
    }

    pub fn family(&self) -> ModelFamily {
        self.recorded.family()
    }
}

#[async_trait]
impl DetectorBackend for ReplayBackend {
    async fn load(&self, preset: ModelPreset) -> LoadResult<Box<dyn Detector>> {
        if preset.family() != self.recorded.family() {
            return Err(LoadError::Unsupported { preset });
        }
        Ok(Box::new(ReplayDetector::new(self.recorded.clone())))
    }
}

/// 每帧返回同一份录制结果
pub struct ReplayDetector {
    recorded: RawDetections,
}

impl ReplayDetector {
    pub fn new(recorded: RawDetections) -> Self {
        Self { recorded }
    }
}

impl Detector for ReplayDetector {
    fn family(&self) -> ModelFamily {
        self.recorded.family()
    }

    fn detect(
        &mut self,
        _frame: &Frame,
        max_count: usize,
    ) -> Result<RawDetections, DetectionCycleError> {
        // 回放检测器自身的数量上限: 三类结果都按录制顺序截断
        Ok(match &self.recorded {
            RawDetections::Object(items) => {
                RawDetections::Object(items.iter().take(max_count).cloned().collect())
            }
            RawDetections::Pose(items) => {
                RawDetections::Pose(items.iter().take(max_count).cloned().collect())
            }
            RawDetections::Hand(items) => {
                RawDetections::Hand(items.iter().take(max_count).cloned().collect())
            }
        })
    }
}
