// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 检测器适配层 (Detector Adapter)
//! 职责: 加载外部检测器 → 调用推理 → 把原始结果归一化为 DetectionSet

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::types::{
    BBox, DetectionSet, Frame, HandDetection, Handedness, Keypoint, ModelFamily,
    ObjectDetection, PoseDetection, HAND_KEYPOINTS, POSE_KEYPOINTS,
};
use crate::config::RenderConfig;
use crate::error::{DetectionCycleError, LoadError, LoadResult};
use crate::models::ModelPreset;

// ========== 外部检测器原始输出 ==========

/// 检测器原始输出 (各模型格式不同, 由适配层统一)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", content = "detections", rename_all = "lowercase")]
pub enum RawDetections {
    Object(Vec<RawObject>),
    Pose(Vec<RawPose>),
    Hand(Vec<RawHand>),
}

impl RawDetections {
    pub fn family(&self) -> ModelFamily {
        match self {
            RawDetections::Object(_) => ModelFamily::Object,
            RawDetections::Pose(_) => ModelFamily::Pose,
            RawDetections::Hand(_) => ModelFamily::Hand,
        }
    }
}

/// 目标检测原始结果, bbox = [x, y, w, h]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawObject {
    pub class: String,
    pub score: f32,
    pub bbox: [f32; 4],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawKeypoint {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub score: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPose {
    pub keypoints: Vec<RawKeypoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawHand {
    pub keypoints: Vec<[f32; 2]>,
    pub handedness: String,
}

// ========== 外部能力接口 ==========

/// 检测器后端: 按预设异步加载检测器
#[async_trait]
pub trait DetectorBackend: Send + Sync {
    async fn load(&self, preset: ModelPreset) -> LoadResult<Box<dyn Detector>>;
}

/// 已加载的检测器: 单帧推理
pub trait Detector: Send {
    fn family(&self) -> ModelFamily;

    /// 推理一帧, `max_count` 为检测数上限提示
    fn detect(
        &mut self,
        frame: &Frame,
        max_count: usize,
    ) -> Result<RawDetections, DetectionCycleError>;
}

// ========== 检测器句柄 ==========

/// 检测器句柄 (预设 + 检测器实例)
pub struct DetectorHandle {
    preset: ModelPreset,
    inner: Box<dyn Detector>,
}

impl fmt::Debug for DetectorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorHandle")
            .field("preset", &self.preset)
            .field("family", &self.inner.family())
            .finish()
    }
}

impl DetectorHandle {
    pub fn new(preset: ModelPreset, inner: Box<dyn Detector>) -> LoadResult<Self> {
        let reported = inner.family();
        if reported != preset.family() {
            return Err(LoadError::FamilyMismatch {
                preset,
                expected: preset.family(),
                reported,
            });
        }
        Ok(Self { preset, inner })
    }

    pub fn preset(&self) -> ModelPreset {
        self.preset
    }

    pub fn family(&self) -> ModelFamily {
        self.preset.family()
    }

    /// 推理并归一化, 不修改任何共享统计状态
    pub fn detect(
        &mut self,
        frame: &Frame,
        config: &RenderConfig,
    ) -> Result<DetectionSet, DetectionCycleError> {
        let raw = self.inner.detect(frame, config.max_detections)?;
        normalize(raw, self.family(), config)
    }
}

/// 原始结果 → DetectionSet
///
/// 目标检测: 分数限制到 [0,1], 过滤低于阈值的结果, 截断到上限。
/// 姿态/手部: 校验关键点数量, 数量由检测器自身决定。
pub fn normalize(
    raw: RawDetections,
    expected: ModelFamily,
    config: &RenderConfig,
) -> Result<DetectionSet, DetectionCycleError> {
    if raw.family() != expected {
        return Err(DetectionCycleError::FamilyMismatch {
            expected,
            got: raw.family(),
        });
    }

    match raw {
        RawDetections::Object(objects) => {
            let detections = objects
                .into_iter()
                .map(|o| ObjectDetection {
                    class: o.class,
                    score: o.score.clamp(0.0, 1.0),
                    bbox: BBox::new(o.bbox[0], o.bbox[1], o.bbox[2], o.bbox[3]),
                })
                .filter(|d| d.score >= config.confidence_threshold)
                .take(config.max_detections)
                .collect();
            Ok(DetectionSet::Object(detections))
        }
        RawDetections::Pose(poses) => {
            let mut detections = Vec::with_capacity(poses.len());
            for pose in poses {
                let got = pose.keypoints.len();
                if got != POSE_KEYPOINTS {
                    return Err(DetectionCycleError::KeypointCount {
                        family: ModelFamily::Pose,
                        expected: POSE_KEYPOINTS,
                        got,
                    });
                }
                let mut keypoints = [Keypoint::default(); POSE_KEYPOINTS];
                for (slot, kp) in keypoints.iter_mut().zip(pose.keypoints) {
                    *slot = Keypoint::new(kp.x, kp.y, kp.score.clamp(0.0, 1.0));
                }
                detections.push(PoseDetection::new(keypoints));
            }
            Ok(DetectionSet::Pose(detections))
        }
        RawDetections::Hand(hands) => {
            let mut detections = Vec::with_capacity(hands.len());
            for hand in hands {
                let got = hand.keypoints.len();
                if got != HAND_KEYPOINTS {
                    return Err(DetectionCycleError::KeypointCount {
                        family: ModelFamily::Hand,
                        expected: HAND_KEYPOINTS,
                        got,
                    });
                }
                let handedness = Handedness::parse(&hand.handedness)
                    .ok_or(DetectionCycleError::UnknownHandedness(hand.handedness))?;
                let mut keypoints = [(0.0, 0.0); HAND_KEYPOINTS];
                for (slot, [x, y]) in keypoints.iter_mut().zip(hand.keypoints) {
                    *slot = (x, y);
                }
                detections.push(HandDetection {
                    keypoints,
                    handedness,
                });
            }
            Ok(DetectionSet::Hand(detections))
        }
    }
}

// ========== 异步加载 ==========

/// 加载结果 (带会话代数ID, 过期结果由帧循环丢弃)
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub preset: ModelPreset,
    pub result: LoadResult<DetectorHandle>,
}

/// 加载中标志守卫, 任务结束时清除
struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 检测器适配器: 负责发起加载, 同一时间只允许一个加载任务
pub struct DetectorAdapter {
    backend: Arc<dyn DetectorBackend>,
    loading: Arc<AtomicBool>,
}

impl DetectorAdapter {
    pub fn new(backend: Arc<dyn DetectorBackend>) -> Self {
        Self {
            backend,
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// 发起异步加载, 结果通过 `tx` 送回
    ///
    /// 已有加载任务时直接返回 `false` (不排队)。需要在 tokio 运行时中调用。
    pub fn begin_load(
        &self,
        preset: ModelPreset,
        generation: u64,
        tx: UnboundedSender<LoadOutcome>,
    ) -> bool {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("⏳ 模型加载进行中, 忽略 {} 的加载请求", preset.name());
            return false;
        }

        info!("📦 开始加载模型: {} ({})", preset.name(), preset.variant());
        let backend = Arc::clone(&self.backend);
        let guard = LoadingGuard(Arc::clone(&self.loading));
        tokio::spawn(async move {
            let _guard = guard;
            let result = match backend.load(preset).await {
                Ok(inner) => DetectorHandle::new(preset, inner),
                Err(e) => Err(e),
            };
            if tx
                .send(LoadOutcome {
                    generation,
                    preset,
                    result,
                })
                .is_err()
            {
                debug!("帧循环已退出, 丢弃 {} 的加载结果", preset.name());
            }
        });
        true
    }
}
