// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 帧循环控制器
//!
//! 单一所有者: 绘图表面 / 显示状态 / 会话状态只在这里修改。
//! 模型加载在后台任务中进行, 结果带代数ID送回, 过期结果直接丢弃。

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, Receiver, UnboundedReceiver, UnboundedSender};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::session::{LoopState, PendingLoad, Session};
use super::{ControlMessage, CycleOutcome, DisplayState, LoadEvent};
use crate::config::{ConfigUpdate, RenderConfig};
use crate::describe::describe;
use crate::detection::detector::{DetectorAdapter, DetectorBackend, DetectorHandle, LoadOutcome};
use crate::detection::types::{DetectionSet, Dims, Frame, ModelFamily};
use crate::error::FrameLoopError;
use crate::event_log::EventLog;
use crate::input::{CameraSource, CameraStream, ImageCrateDecoder, ImageDecoder, InputMode};
use crate::models::ModelPreset;
use crate::renderer::{OverlayRenderer, Surface};
use crate::stats::{count, FpsCounter};

pub struct FrameLoop<S: Surface> {
    session: Session,
    adapter: DetectorAdapter,
    detector: Option<DetectorHandle>,

    // 输入源 (同一时间最多一个)
    camera: Box<dyn CameraSource>,
    stream: Option<Box<dyn CameraStream>>,
    decoder: Box<dyn ImageDecoder>,
    image: Option<Frame>,

    // 输出
    surface: S,
    renderer: OverlayRenderer,
    current: Option<DetectionSet>,
    display: DisplayState,
    fps: FpsCounter,
    log: EventLog,

    load_tx: UnboundedSender<LoadOutcome>,
    load_rx: UnboundedReceiver<LoadOutcome>,
}

impl<S: Surface> FrameLoop<S> {
    /// 创建帧循环, 调用 [`FrameLoop::startup`] 开始加载初始模型
    pub fn new(
        backend: Arc<dyn DetectorBackend>,
        camera: Box<dyn CameraSource>,
        surface: S,
        preset: ModelPreset,
    ) -> Self {
        let (load_tx, load_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(preset, RenderConfig::default()),
            adapter: DetectorAdapter::new(backend),
            detector: None,
            camera,
            stream: None,
            decoder: Box::new(ImageCrateDecoder),
            image: None,
            surface,
            renderer: OverlayRenderer::new(),
            current: None,
            display: DisplayState::new(preset.family()),
            fps: FpsCounter::new(Instant::now()),
            log: EventLog::new(),
            load_tx,
            load_rx,
        }
    }

    pub fn with_decoder(mut self, decoder: Box<dyn ImageDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.session.config = config;
        self
    }

    // ========== 访问器 ==========

    pub fn state(&self) -> LoopState {
        self.session.state
    }

    pub fn config(&self) -> RenderConfig {
        self.session.config
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// 最近一次成功周期的检测结果
    pub fn detections(&self) -> Option<&DetectionSet> {
        self.current.as_ref()
    }

    /// 已加载检测器的预设
    pub fn active_preset(&self) -> Option<ModelPreset> {
        self.detector.as_ref().map(DetectorHandle::preset)
    }

    pub fn active_family(&self) -> ModelFamily {
        self.detector
            .as_ref()
            .map(DetectorHandle::family)
            .unwrap_or_else(|| self.session.preset.family())
    }

    pub fn input_mode(&self) -> Option<InputMode> {
        self.session.input
    }

    pub fn is_loading(&self) -> bool {
        self.adapter.is_loading()
    }

    // ========== 模型 ==========

    /// 加载启动模型
    pub fn startup(&mut self) -> bool {
        let preset = self.session.preset;
        self.switch_model(preset)
    }

    /// 切换模型: 暂停循环 (摄像头保持打开), 清空叠加层, 后台加载
    ///
    /// 与当前模型相同或已有加载任务时不做任何处理, 返回 `false`
    pub fn switch_model(&mut self, preset: ModelPreset) -> bool {
        if self.active_preset() == Some(preset) {
            debug!("模型 {} 已在使用, 忽略切换", preset.name());
            return false;
        }
        if self.session.pending.is_some() || self.adapter.is_loading() {
            debug!("⏳ 模型加载进行中, 忽略切换到 {}", preset.name());
            return false;
        }

        let resume = match self.session.state {
            LoopState::Detecting if self.stream.is_some() => LoopState::Detecting,
            LoopState::Paused if self.stream.is_some() => LoopState::Paused,
            LoopState::Ready if self.image.is_some() => LoopState::Ready,
            _ => LoopState::Idle,
        };

        let generation = self.session.generation();
        if !self.adapter.begin_load(preset, generation, self.load_tx.clone()) {
            return false;
        }

        self.surface.clear();
        self.current = None;
        self.display.reset(preset.family());
        self.session.pending = Some(PendingLoad { preset, resume });
        self.session.state = LoopState::Loading(preset.family());
        self.log.push(format!("Loading {}...", preset.display_name()));
        true
    }

    /// 等待并处理下一个加载结果, 没有加载任务时立即返回 `None`
    pub async fn next_load_event(&mut self) -> Option<LoadEvent> {
        // 加载任务先发送结果再清除标志, 所以标志已清除时结果一定在通道里
        if !self.adapter.is_loading() {
            let outcome = self.load_rx.try_recv().ok()?;
            return Some(self.apply_load_outcome(outcome));
        }
        let outcome = self.load_rx.recv().await?;
        Some(self.apply_load_outcome(outcome))
    }

    /// 处理加载结果: 过期丢弃 / 成功安装 / 失败保留原模型
    pub fn apply_load_outcome(&mut self, outcome: LoadOutcome) -> LoadEvent {
        let LoadOutcome {
            generation,
            preset,
            result,
        } = outcome;

        if !self.session.is_current(generation) {
            debug!(
                "🗑️  丢弃过期的加载结果: {} (代数 {} / 当前 {})",
                preset.name(),
                generation,
                self.session.generation()
            );
            return LoadEvent::Discarded(preset);
        }
        let Some(pending) = self.session.pending.take() else {
            debug!("🗑️  没有等待中的加载, 丢弃 {}", preset.name());
            return LoadEvent::Discarded(preset);
        };

        let event = match result {
            Ok(handle) => {
                self.detector = Some(handle);
                self.session.preset = preset;
                self.display.error = None;
                self.log.push(format!("Model loaded: {}", preset.display_name()));
                LoadEvent::Installed(preset)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!("❌ 模型加载失败: {}", reason);
                self.display.error = Some(reason.clone());
                self.display.reset(self.active_family());
                self.log.push(format!("Model load failed: {}", reason));
                LoadEvent::Failed { preset, reason }
            }
        };

        self.restore_after_load(pending.resume);
        event
    }

    fn restore_after_load(&mut self, resume: LoopState) {
        match resume {
            LoopState::Detecting if self.stream.is_some() => {
                self.fps.reset(Instant::now());
                self.session.state = LoopState::Detecting;
            }
            LoopState::Paused if self.stream.is_some() => {
                self.session.state = LoopState::Paused;
            }
            LoopState::Ready if self.image.is_some() => {
                self.session.state = LoopState::Ready;
                self.run_image_cycle();
            }
            _ => self.session.state = LoopState::Idle,
        }
    }

    // ========== 输入源 ==========

    /// 打开摄像头并开始连续检测 (释放静态图片)
    ///
    /// 获取失败时设置提示并记录日志, 状态不变
    pub async fn start_camera(&mut self) -> Result<(), FrameLoopError> {
        if self.stream.is_some() {
            debug!("📷 摄像头已打开");
            self.resume();
            return Ok(());
        }

        let stream = match self.camera.acquire().await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("❌ 摄像头访问失败: {}", e);
                self.display.alert = Some(e.to_string());
                self.log.push(format!("Camera error: {}", e));
                return Err(e.into());
            }
        };

        self.image = None;
        let dims = stream.dims();
        self.stream = Some(stream);
        self.attach(InputMode::Camera, dims);
        self.display.alert = None;
        self.fps.reset(Instant::now());
        self.session.settle(LoopState::Detecting);
        self.log.push(format!("Camera started ({})", dims));
        Ok(())
    }

    /// 载入静态图片并执行一次检测周期 (释放摄像头)
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<CycleOutcome, FrameLoopError> {
        let frame = match self.decoder.decode(bytes) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("❌ 图片解码失败: {}", e);
                self.log.push(format!("Image decode failed: {}", e));
                return Err(e.into());
            }
        };

        self.release_camera();
        let dims = frame.dims();
        self.image = Some(frame);
        self.attach(InputMode::StaticImage, dims);
        self.log.push(format!("Image loaded ({})", dims));

        if self.session.pending.is_some() {
            // 模型就绪后再执行
            self.session.settle(LoopState::Ready);
            return Ok(CycleOutcome::Inactive);
        }
        self.session.state = LoopState::Ready;
        Ok(self.run_image_cycle())
    }

    /// 新输入源: 表面尺寸同步为源原生尺寸
    fn attach(&mut self, mode: InputMode, dims: Dims) {
        info!("🔗 输入源: {} ({})", mode, dims);
        self.session.input = Some(mode);
        self.session.source_dims = Some(dims);
        self.surface.resize(dims);
        self.current = None;
        self.display.reset(self.active_family());
    }

    fn release_camera(&mut self) -> bool {
        match self.stream.take() {
            Some(stream) => {
                stream.release();
                info!("📷 摄像头已释放");
                true
            }
            None => false,
        }
    }

    /// 显式尺寸变更通知: 重新同步表面尺寸
    pub fn notify_resize(&mut self) -> Option<Dims> {
        let dims = match (&self.stream, &self.image) {
            (Some(stream), _) => stream.dims(),
            (None, Some(frame)) => frame.dims(),
            (None, None) => return None,
        };
        debug!("📐 表面尺寸同步: {}", dims);
        self.session.source_dims = Some(dims);
        self.surface.resize(dims);
        if self.session.state == LoopState::Ready {
            self.run_image_cycle();
        }
        Some(dims)
    }

    // ========== 控制 ==========

    /// 停止: 作废进行中的加载, 释放输入源, 清空显示
    ///
    /// 尚未安装任何检测器时保留进行中的加载 (完成后回到空闲)。
    /// 空闲时调用不做任何处理, 返回 `false`
    pub fn stop(&mut self) -> bool {
        if !self.session.is_active() {
            return false;
        }

        if self.detector.is_none() && self.session.pending.is_some() {
            let resume = self.session.pending.map(|pending| pending.resume);
            if self.session.input.is_none() && resume == Some(LoopState::Idle) {
                debug!("⏳ 仅有启动模型在加载, 无需停止");
                return false;
            }
            self.session.settle(LoopState::Idle);
        } else {
            let generation = self.session.invalidate();
            debug!("会话代数: {}", generation);
            self.session.state = LoopState::Idle;
        }

        self.release_camera();
        self.image = None;
        self.session.input = None;
        self.session.source_dims = None;
        self.surface.clear();
        self.current = None;
        self.display.reset(self.active_family());
        self.fps.reset(Instant::now());
        self.log.push("Detection stopped");
        true
    }

    /// 暂停连续检测 (摄像头保持打开)
    pub fn pause(&mut self) -> bool {
        let paused = match self.session.state {
            LoopState::Detecting => {
                self.session.state = LoopState::Paused;
                true
            }
            LoopState::Loading(_) => match self.session.pending.as_mut() {
                Some(pending) if pending.resume == LoopState::Detecting => {
                    pending.resume = LoopState::Paused;
                    true
                }
                _ => false,
            },
            _ => false,
        };
        if paused {
            self.log.push("Detection paused");
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = match self.session.state {
            LoopState::Paused => {
                self.fps.reset(Instant::now());
                self.session.state = LoopState::Detecting;
                true
            }
            LoopState::Loading(_) => match self.session.pending.as_mut() {
                Some(pending) if pending.resume == LoopState::Paused => {
                    pending.resume = LoopState::Detecting;
                    true
                }
                _ => false,
            },
            _ => false,
        };
        if resumed {
            self.log.push("Detection resumed");
        }
        resumed
    }

    /// 参数更新: 下一周期生效, 静态图片立即重新执行一次
    pub fn update_config(&mut self, update: ConfigUpdate) -> CycleOutcome {
        let before = self.session.config;
        self.session.config.apply(update);
        if self.session.config == before {
            return CycleOutcome::Inactive;
        }
        debug!(
            "🎛️  参数更新: 阈值={:.2} 最大检测数={}",
            self.session.config.confidence_threshold, self.session.config.max_detections
        );

        if self.session.state == LoopState::Ready {
            return self.run_image_cycle();
        }
        CycleOutcome::Inactive
    }

    // ========== 检测周期 ==========

    /// 连续检测的一个周期
    pub fn tick(&mut self, now: Instant) -> CycleOutcome {
        if self.session.state != LoopState::Detecting {
            return CycleOutcome::Inactive;
        }
        if self.detector.is_none() {
            return CycleOutcome::NoDetector;
        }
        let Some(frame) = self.stream.as_mut().and_then(|stream| stream.next_frame()) else {
            return CycleOutcome::NoFrame;
        };
        self.run_cycle(&frame, Some(now))
    }

    fn run_image_cycle(&mut self) -> CycleOutcome {
        match self.image.clone() {
            Some(frame) => self.run_cycle(&frame, None),
            None => CycleOutcome::Inactive,
        }
    }

    /// 检测 → 渲染 → 描述 → 统计, `now` 为空时不计入FPS
    fn run_cycle(&mut self, frame: &Frame, now: Option<Instant>) -> CycleOutcome {
        let config = self.session.config;
        let Some(detector) = self.detector.as_mut() else {
            return CycleOutcome::NoDetector;
        };

        let set = match detector.detect(frame, &config) {
            Ok(set) => set,
            Err(e) => {
                warn!("⚠️  检测失败, 跳过本帧: {}", e);
                return CycleOutcome::Failed(e);
            }
        };

        let threshold = config.confidence_threshold;
        self.renderer.render(&mut self.surface, &set, frame.dims(), threshold);
        self.display.description = describe(&set, threshold);
        self.display.stats = count(&set, threshold);

        let fps = now.and_then(|now| self.fps.record_cycle(now));
        if let Some(fps) = fps {
            self.display.fps = fps;
        }

        let total = set.len();
        self.current = Some(set);
        CycleOutcome::Completed { total, fps }
    }

    // ========== 消息驱动 ==========

    /// 处理一条控制消息, 收到 `Shutdown` 时返回 `false`
    pub async fn handle(&mut self, message: ControlMessage) -> bool {
        match message {
            ControlMessage::StartCamera => {
                if let Err(e) = self.start_camera().await {
                    debug!("摄像头启动失败: {}", e);
                }
            }
            ControlMessage::LoadImage(bytes) => {
                if let Err(e) = self.load_image(&bytes) {
                    debug!("图片载入失败: {}", e);
                }
            }
            ControlMessage::Stop => {
                self.stop();
            }
            ControlMessage::SwitchModel(preset) => {
                self.switch_model(preset);
            }
            ControlMessage::UpdateConfig(update) => {
                self.update_config(update);
            }
            ControlMessage::Pause => {
                self.pause();
            }
            ControlMessage::Resume => {
                self.resume();
            }
            ControlMessage::Resize => {
                self.notify_resize();
            }
            ControlMessage::Shutdown => {
                self.stop();
                return false;
            }
        }
        true
    }

    /// 主循环: 控制消息 / 加载结果 / 定时周期, 命令通道关闭或收到 `Shutdown` 时退出
    pub async fn run(
        &mut self,
        mut commands: Receiver<ControlMessage>,
        frame_interval: Duration,
    ) {
        let mut ticker = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("🎬 帧循环启动, 周期 {:?}", frame_interval);

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => {
                    let Some(command) = command else {
                        self.stop();
                        break;
                    };
                    if !self.handle(command).await {
                        break;
                    }
                }
                Some(outcome) = self.load_rx.recv() => {
                    self.apply_load_outcome(outcome);
                }
                _ = ticker.tick() => {
                    self.tick(Instant::now());
                }
            }
        }

        info!("🛑 帧循环已退出");
    }
}
