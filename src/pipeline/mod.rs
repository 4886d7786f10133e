// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
/// 帧循环控制 (Frame Loop Controller)
///
/// 单一所有者协作调度, 通过消息驱动:
/// - FrameLoop: 检测 → 渲染 → 描述 → 统计, 模型热切换与输入源切换
/// - Session:   会话状态机 (状态 / 预设 / 输入模式 / 代数ID)
pub mod frame_loop;
pub mod session;

pub use frame_loop::FrameLoop;
pub use session::{LoopState, PendingLoad, Session};

use crate::config::ConfigUpdate;
use crate::describe::placeholder;
use crate::detection::types::{DetectionSet, ModelFamily};
use crate::error::DetectionCycleError;
use crate::models::ModelPreset;
use crate::stats::FrameStats;

// ========== 控制消息 ==========

/// 用户操作 (界面 → 帧循环)
#[derive(Clone, Debug, PartialEq)]
pub enum ControlMessage {
    StartCamera,
    LoadImage(Vec<u8>),
    Stop,
    SwitchModel(ModelPreset),
    UpdateConfig(ConfigUpdate),
    Pause,
    Resume,
    Resize,
    Shutdown,
}

// ========== 周期结果 ==========

/// 单个检测周期的结果
#[derive(Clone, Debug, PartialEq)]
pub enum CycleOutcome {
    /// 未处于检测状态
    Inactive,
    /// 尚未加载检测器, 静默跳过
    NoDetector,
    /// 视频流暂无新帧
    NoFrame,
    Completed {
        total: usize,
        /// 本周期产生的新FPS快照
        fps: Option<u32>,
    },
    /// 推理失败, 跳过渲染 / 描述 / 统计
    Failed(DetectionCycleError),
}

/// 模型加载结果的处理方式
#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
    Installed(ModelPreset),
    Failed { preset: ModelPreset, reason: String },
    /// 会话已失效 (加载期间被停止), 结果丢弃
    Discarded(ModelPreset),
}

// ========== 显示状态 ==========

/// 界面展示的文字与统计
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub description: String,
    pub stats: FrameStats,
    pub fps: u32,
    /// 模型加载失败信息
    pub error: Option<String>,
    /// 摄像头访问失败提示
    pub alert: Option<String>,
}

impl DisplayState {
    pub fn new(family: ModelFamily) -> Self {
        Self {
            description: placeholder(&DetectionSet::empty(family)).to_string(),
            stats: FrameStats::default(),
            fps: 0,
            error: None,
            alert: None,
        }
    }

    /// 清零统计, 恢复占位描述
    pub fn reset(&mut self, family: ModelFamily) {
        self.description = placeholder(&DetectionSet::empty(family)).to_string();
        self.stats = FrameStats::default();
        self.fps = 0;
    }
}
