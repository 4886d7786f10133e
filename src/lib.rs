// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
pub mod config; // 显示参数与启动配置
pub mod describe; // 场景描述生成
pub mod detection; // 检测器适配与统一数据结构
pub mod error; // 错误类型
pub mod event_log; // 事件日志
pub mod input; // 输入源 (摄像头 / 静态图片)
pub mod logging; // 日志初始化
pub mod models; // 模型预设
pub mod pipeline; // 帧循环控制
pub mod renderer; // 叠加层渲染
pub mod stats; // 统计汇总 / FPS

pub use crate::config::{ConfigUpdate, RenderConfig, ViewerConfig};
pub use crate::detection::{DetectionSet, DetectorBackend, ModelFamily};
pub use crate::models::ModelPreset;
pub use crate::pipeline::{ControlMessage, CycleOutcome, FrameLoop, LoopState};

/// 本地时间字符串, 各字段以 `delimiter` 分隔
pub fn gen_time_string(delimiter: &str) -> String {
    let fmt = format!(
        "%Y{}%m{}%d{}%H{}%M{}%S",
        delimiter, delimiter, delimiter, delimiter, delimiter
    );
    chrono::Local::now().format(&fmt).to_string()
}

/// COCO 17点骨架连接
pub const SKELETON: [(usize, usize); 16] = [
    (0, 1),
    (0, 2),
    (1, 3),
    (2, 4),
    (5, 6),
    (5, 11),
    (6, 12),
    (11, 12),
    (5, 7),
    (6, 8),
    (7, 9),
    (8, 10),
    (11, 13),
    (12, 14),
    (13, 15),
    (14, 16),
];

/// 21点手部连接: 五指 + 掌根横向连线
pub const HAND_CONNECTIONS: [(usize, usize); 23] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (0, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (0, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    (5, 9),
    (9, 13),
    (13, 17),
];

/// 指尖索引
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];
