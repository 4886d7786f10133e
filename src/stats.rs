// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 统计汇总 (Aggregator)
//!
//! - [`count`]: 每帧从当前检测集合完整重算, 无增量状态
//! - [`FpsCounter`]: 每秒快照一次的帧率统计

use std::fmt;
use std::time::{Duration, Instant};

use crate::describe::class_counts;
use crate::detection::types::{DetectionSet, HAND_KEYPOINTS, POSE_KEYPOINTS};

/// 统计值
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatValue {
    /// 类别计数
    Count(usize),
    /// 关键点描述, 如 "15/17 pts"
    Points(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Points(text) => f.write_str(text),
        }
    }
}

/// 单帧统计 (总数 + 有序明细)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub total: usize,
    pub breakdown: Vec<(String, StatValue)>,
}

/// 计算单帧统计
///
/// - Object: 类别 → 数量, 按数量降序
/// - Pose:   "Person N" → "<可见>/17 pts" (与渲染器相同的可见性规则)
/// - Hand:   "<Handedness> Hand" → "21 pts"
pub fn count(set: &DetectionSet, threshold: f32) -> FrameStats {
    let breakdown = match set {
        DetectionSet::Object(objects) => class_counts(objects)
            .into_iter()
            .map(|(class, n)| (class, StatValue::Count(n)))
            .collect(),
        DetectionSet::Pose(poses) => poses
            .iter()
            .enumerate()
            .map(|(i, pose)| {
                (
                    format!("Person {}", i + 1),
                    StatValue::Points(format!(
                        "{}/{} pts",
                        pose.visible_count(threshold),
                        POSE_KEYPOINTS
                    )),
                )
            })
            .collect(),
        DetectionSet::Hand(hands) => hands
            .iter()
            .map(|hand| (hand.label(), StatValue::Points(format!("{} pts", HAND_KEYPOINTS))))
            .collect(),
    };

    FrameStats {
        total: set.len(),
        breakdown,
    }
}

/// 采样间隔
pub const FPS_SAMPLE_INTERVAL: Duration = Duration::from_millis(1000);

/// 帧率统计: 每完成一个检测周期计数一次, 满1秒时把计数作为FPS并清零
#[derive(Clone, Debug)]
pub struct FpsCounter {
    count: u32,
    last: Instant,
    current_fps: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            count: 0,
            last: now,
            current_fps: 0,
        }
    }

    /// 记录一次完成的检测周期, 采样点更新时返回新的FPS
    pub fn record_cycle(&mut self, now: Instant) -> Option<u32> {
        self.count += 1;
        if now.saturating_duration_since(self.last) >= FPS_SAMPLE_INTERVAL {
            self.current_fps = self.count;
            self.count = 0;
            self.last = now;
            return Some(self.current_fps);
        }
        None
    }

    pub fn fps(&self) -> u32 {
        self.current_fps
    }

    /// 当前采样窗口内的计数
    pub fn pending(&self) -> u32 {
        self.count
    }

    /// 重置 (停止检测时)
    pub fn reset(&mut self, now: Instant) {
        *self = Self::new(now);
    }
}
