// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 显示配置 - 通过JSON文件调整参数

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::models::ModelPreset;

/// 默认置信度阈值
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;
/// 默认最大检测数
pub const DEFAULT_MAX_DETECTIONS: usize = 20;

/// 运行时渲染参数 (滑块可调, 下一帧生效)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub confidence_threshold: f32,
    pub max_detections: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_detections: DEFAULT_MAX_DETECTIONS,
        }
    }
}

impl RenderConfig {
    pub fn new(confidence_threshold: f32, max_detections: usize) -> Self {
        let mut config = Self::default();
        config.apply(ConfigUpdate::Threshold(confidence_threshold));
        config.apply(ConfigUpdate::MaxDetections(max_detections));
        config
    }

    /// 应用一次参数更新, 阈值限制在 [0,1], 最大检测数至少为1
    pub fn apply(&mut self, update: ConfigUpdate) {
        match update {
            ConfigUpdate::Threshold(value) => {
                self.confidence_threshold = if value.is_nan() {
                    DEFAULT_CONFIDENCE_THRESHOLD
                } else {
                    value.clamp(0.0, 1.0)
                };
            }
            ConfigUpdate::MaxDetections(value) => {
                self.max_detections = value.max(1);
            }
        }
    }
}

/// 参数更新消息
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigUpdate {
    Threshold(f32),
    MaxDetections(usize),
}

/// 启动配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub confidence_threshold: f32, // 置信度阈值
    pub max_detections: usize,     // 最大检测数
    pub default_model: String,     // 启动时加载的模型预设
    pub frame_interval_ms: u64,    // 帧循环间隔 (约等于屏幕刷新)
    pub font_path: Option<PathBuf>, // 标签字体 (ttf/otf)
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_detections: DEFAULT_MAX_DETECTIONS,
            default_model: ModelPreset::default().name().to_string(),
            frame_interval_ms: 16,
            font_path: None,
        }
    }
}

impl ViewerConfig {
    /// 读取并解析JSON配置
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// 从JSON文件加载配置, 文件不存在时写出默认配置, 解析失败时使用默认值
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => {
                info!("✅ 配置已从 {} 加载", path.display());
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("📝 配置文件不存在,创建默认配置...");
                let config = Self::default();
                if let Err(e) = config.save(path) {
                    warn!("❌ 保存配置失败: {}", e);
                }
                config
            }
            Err(e) => {
                warn!("⚠️  配置文件读取失败: {}, 使用默认值", e);
                Self::default()
            }
        }
    }

    /// 保存配置到JSON文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        info!("💾 配置已保存到 {}", path.as_ref().display());
        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new(self.confidence_threshold, self.max_detections)
    }

    /// 启动模型, 名称无效时退回默认预设
    pub fn default_preset(&self) -> ModelPreset {
        ModelPreset::from_name(&self.default_model).unwrap_or_else(|| {
            warn!("⚠️ 未知模型预设 '{}', 使用默认值", self.default_model);
            ModelPreset::default()
        })
    }

    /// 打印当前配置
    pub fn log_summary(&self) {
        info!(
            "🎛️  当前配置: 置信度={:.2} 最大检测数={} 模型={} 帧间隔={}ms",
            self.confidence_threshold,
            self.max_detections,
            self.default_model,
            self.frame_interval_ms
        );
    }
}
