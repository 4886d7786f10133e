// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
/// 模型预设 (Model presets)
///
/// # 架构说明
///
/// 推理本身由外部检测器完成, 这里只描述"选哪个模型":
/// - 每个预设对应一个 [`ModelFamily`] + 一个变体提示 (variant hint)
/// - 变体提示原样交给 [`DetectorBackend`](crate::detection::DetectorBackend),
///   由后端决定如何加载
///
/// | 预设 | 类别 | 变体 |
/// |---|---|---|
/// | `coco-ssd-lite` | Object | `lite_mobilenet_v2` |
/// | `coco-ssd` | Object | `mobilenet_v2` |
/// | `movenet` | Pose | `multipose_lightning` |
/// | `hands` | Hand | `mediapipe_full` |
use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::detection::types::ModelFamily;

/// 模型预设枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelPreset {
    /// 轻量目标检测 (默认)
    #[default]
    CocoSsdLite,
    /// 标准目标检测
    CocoSsd,
    /// 多人姿态估计
    MoveNet,
    /// 手部关键点
    Hands,
}

static PRESET_NAMES: phf::Map<&'static str, ModelPreset> = phf_map! {
    "coco-ssd-lite" => ModelPreset::CocoSsdLite,
    "coco-ssd" => ModelPreset::CocoSsd,
    "movenet" => ModelPreset::MoveNet,
    "hands" => ModelPreset::Hands,
};

impl ModelPreset {
    pub const ALL: [ModelPreset; 4] = [
        ModelPreset::CocoSsdLite,
        ModelPreset::CocoSsd,
        ModelPreset::MoveNet,
        ModelPreset::Hands,
    ];

    /// 按名称查找预设 (大小写不敏感)
    pub fn from_name(name: &str) -> Option<Self> {
        PRESET_NAMES
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelPreset::CocoSsdLite => "coco-ssd-lite",
            ModelPreset::CocoSsd => "coco-ssd",
            ModelPreset::MoveNet => "movenet",
            ModelPreset::Hands => "hands",
        }
    }

    pub fn family(&self) -> ModelFamily {
        match self {
            ModelPreset::CocoSsdLite | ModelPreset::CocoSsd => ModelFamily::Object,
            ModelPreset::MoveNet => ModelFamily::Pose,
            ModelPreset::Hands => ModelFamily::Hand,
        }
    }

    /// 交给外部检测器的变体提示
    pub fn variant(&self) -> &'static str {
        match self {
            ModelPreset::CocoSsdLite => "lite_mobilenet_v2",
            ModelPreset::CocoSsd => "mobilenet_v2",
            ModelPreset::MoveNet => "multipose_lightning",
            ModelPreset::Hands => "mediapipe_full",
        }
    }

    /// 某类别的首选预设
    pub fn for_family(family: ModelFamily) -> Self {
        match family {
            ModelFamily::Object => ModelPreset::CocoSsdLite,
            ModelFamily::Pose => ModelPreset::MoveNet,
            ModelFamily::Hand => ModelPreset::Hands,
        }
    }

    /// 界面显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelPreset::CocoSsdLite => "COCO-SSD Lite",
            ModelPreset::CocoSsd => "COCO-SSD",
            ModelPreset::MoveNet => "MoveNet MultiPose",
            ModelPreset::Hands => "Hand Landmarks",
        }
    }
}

impl fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ModelPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
            format!("unknown model '{}', expected one of: {}", s, names.join(", "))
        })
    }
}
