// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
/// 离线标注工具
///
/// 把录制的检测结果回放到一张图片上: 叠加层 + 场景描述 + 统计 + 事件日志
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use scene_lens::config::{ConfigUpdate, ViewerConfig};
use scene_lens::detection::types::Dims;
use scene_lens::detection::{RawDetections, ReplayBackend};
use scene_lens::gen_time_string;
use scene_lens::input::SequenceCamera;
use scene_lens::logging::init_logging;
use scene_lens::models::ModelPreset;
use scene_lens::pipeline::{CycleOutcome, FrameLoop, LoadEvent};
use scene_lens::renderer::CanvasSurface;

#[derive(Parser, Debug)]
#[command(author, version, about = "检测结果离线标注 (回放录制结果, 不做推理)", long_about = None)]
struct Args {
    /// 输入图片
    #[arg(short, long)]
    image: PathBuf,

    /// 录制的原始检测结果 (JSON)
    #[arg(short, long)]
    detections: PathBuf,

    /// 模型预设 (coco-ssd-lite/coco-ssd/movenet/hands), 默认按检测结果类别选择
    #[arg(short, long)]
    model: Option<ModelPreset>,

    /// 置信度阈值 [0,1]
    #[arg(short, long)]
    threshold: Option<f32>,

    /// 最大检测数
    #[arg(long)]
    max: Option<usize>,

    /// 标签字体 (ttf/otf), 不提供时不绘制标签文字
    #[arg(long)]
    font: Option<PathBuf>,

    /// 配置文件 (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 输出PNG路径
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => ViewerConfig::load(path),
        None => ViewerConfig::default(),
    };
    config.log_summary();

    let mut render_config = config.render_config();
    if let Some(threshold) = args.threshold {
        render_config.apply(ConfigUpdate::Threshold(threshold));
    }
    if let Some(max) = args.max {
        render_config.apply(ConfigUpdate::MaxDetections(max));
    }

    // 1. 录制的检测结果
    let json = fs::read_to_string(&args.detections)
        .with_context(|| format!("读取检测结果失败: {}", args.detections.display()))?;
    let recorded: RawDetections =
        serde_json::from_str(&json).context("检测结果格式错误")?;
    let family = recorded.family();
    let preset = args.model.unwrap_or_else(|| {
        let default = config.default_preset();
        if default.family() == family {
            default
        } else {
            ModelPreset::for_family(family)
        }
    });
    info!("🧠 回放 {} 检测结果, 预设: {}", family, preset.name());

    // 2. 绘图表面 (尺寸在载入图片时同步)
    let mut surface = CanvasSurface::new(Dims::default());
    if let Some(font_path) = args.font.or(config.font_path.clone()) {
        let font = fs::read(&font_path)
            .with_context(|| format!("读取字体失败: {}", font_path.display()))?;
        surface = surface.with_font_bytes(font);
    }

    // 3. 帧循环: 加载回放模型 → 静态图片周期
    let backend = Arc::new(ReplayBackend::new(recorded));
    let mut frame_loop = FrameLoop::new(
        backend,
        Box::new(SequenceCamera::new(Vec::new())),
        surface,
        preset,
    )
    .with_render_config(render_config);

    frame_loop.startup();
    match frame_loop.next_load_event().await {
        Some(LoadEvent::Installed(_)) => {}
        Some(LoadEvent::Failed { reason, .. }) => bail!("模型加载失败: {}", reason),
        other => bail!("模型未加载: {:?}", other),
    }

    let bytes = fs::read(&args.image)
        .with_context(|| format!("读取图片失败: {}", args.image.display()))?;
    if let CycleOutcome::Failed(e) = frame_loop.load_image(&bytes)? {
        bail!("检测结果无效: {}", e);
    }

    // 4. 文字输出
    let display = frame_loop.display();
    println!("{}", display.description);
    println!("Total: {}", display.stats.total);
    for (label, value) in &display.stats.breakdown {
        println!("  {}: {}", label, value);
    }
    println!();
    for entry in frame_loop.log().entries() {
        println!("{}", entry);
    }

    // 5. 叠加到原图并保存
    let overlay = frame_loop.into_surface().into_image();
    let mut base = image::load_from_memory(&bytes)?.to_rgba8();
    image::imageops::overlay(&mut base, &overlay, 0, 0);

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(format!("annotated_{}.png", gen_time_string(""))));
    base.save(&out)
        .with_context(|| format!("保存失败: {}", out.display()))?;
    info!("💾 标注结果已保存到 {}", out.display());
    Ok(())
}
