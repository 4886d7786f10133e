// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 会话状态机 (由帧循环独占)

use std::fmt;

use crate::config::RenderConfig;
use crate::detection::types::{Dims, ModelFamily};
use crate::input::InputMode;
use crate::models::ModelPreset;

/// 帧循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Loading(ModelFamily),
    Ready,
    Detecting,
    Paused,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopState::Idle => f.write_str("idle"),
            LoopState::Loading(family) => write!(f, "loading {}", family),
            LoopState::Ready => f.write_str("ready"),
            LoopState::Detecting => f.write_str("detecting"),
            LoopState::Paused => f.write_str("paused"),
        }
    }
}

/// 进行中的模型加载
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLoad {
    pub preset: ModelPreset,
    /// 加载结束后恢复到的状态
    pub resume: LoopState,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub state: LoopState,
    /// 当前选中的模型预设
    pub preset: ModelPreset,
    pub input: Option<InputMode>,
    pub source_dims: Option<Dims>,
    pub config: RenderConfig,
    generation: u64,
    pub pending: Option<PendingLoad>,
}

impl Session {
    pub fn new(preset: ModelPreset, config: RenderConfig) -> Self {
        Self {
            state: LoopState::Idle,
            preset,
            input: None,
            source_dims: None,
            config,
            generation: 0,
            pending: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 作废当前代数下所有进行中的异步结果
    pub fn invalidate(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoopState::Loading(_))
    }

    /// 有任何活动 (输入源 / 加载 / 非空闲)
    pub fn is_active(&self) -> bool {
        self.state != LoopState::Idle || self.input.is_some() || self.pending.is_some()
    }

    /// 加载中时修改恢复目标, 否则直接切换状态
    pub fn settle(&mut self, state: LoopState) {
        match self.pending.as_mut() {
            Some(pending) => pending.resume = state,
            None => self.state = state,
        }
    }
}
