// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use scene_lens::config::ConfigUpdate;
use scene_lens::detection::types::{Dims, Frame, ModelFamily, HAND_KEYPOINTS, POSE_KEYPOINTS};
use scene_lens::detection::{
    Detector, DetectorBackend, RawDetections, RawHand, RawKeypoint, RawObject, RawPose,
};
use scene_lens::error::{
    CameraError, DecodeError, DetectionCycleError, FrameLoopError, LoadError, LoadResult,
};
use scene_lens::input::{CameraSource, CameraStream, ImageDecoder, SequenceCamera};
use scene_lens::models::ModelPreset;
use scene_lens::pipeline::{ControlMessage, CycleOutcome, FrameLoop, LoadEvent, LoopState};
use scene_lens::renderer::{DrawOp, RecordingSurface, RectF, Surface};

// ========== 测试替身 ==========

#[derive(Clone, Default)]
struct CallCounter {
    calls: Arc<AtomicUsize>,
    fail_next: Arc<AtomicBool>,
}

impl CallCounter {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail_next_cycle(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

struct ScriptedDetector {
    family: ModelFamily,
    counter: CallCounter,
}

impl Detector for ScriptedDetector {
    fn family(&self) -> ModelFamily {
        self.family
    }

    fn detect(
        &mut self,
        _frame: &Frame,
        _max_count: usize,
    ) -> Result<RawDetections, DetectionCycleError> {
        self.counter.calls.fetch_add(1, Ordering::SeqCst);
        if self.counter.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DetectionCycleError::Inference("backend busy".to_string()));
        }
        Ok(match self.family {
            ModelFamily::Object => RawDetections::Object(vec![
                object("person", 0.9, [4.0, 4.0, 20.0, 30.0]),
                object("dog", 0.6, [30.0, 20.0, 16.0, 12.0]),
                object("car", 0.3, [40.0, 2.0, 20.0, 10.0]),
            ]),
            ModelFamily::Pose => RawDetections::Pose(vec![RawPose {
                keypoints: (0..POSE_KEYPOINTS)
                    .map(|i| RawKeypoint {
                        x: 10.0 + i as f32,
                        y: 20.0,
                        score: 0.9,
                    })
                    .collect(),
            }]),
            ModelFamily::Hand => RawDetections::Hand(vec![RawHand {
                keypoints: vec![[8.0, 8.0]; HAND_KEYPOINTS],
                handedness: "Left".to_string(),
            }]),
        })
    }
}

fn object(class: &str, score: f32, bbox: [f32; 4]) -> RawObject {
    RawObject {
        class: class.to_string(),
        score,
        bbox,
    }
}

#[derive(Default)]
struct TestBackend {
    counter: CallCounter,
    /// 该预设的加载等待通知
    gate: Option<(ModelPreset, Arc<Notify>)>,
    failing: Vec<ModelPreset>,
}

#[async_trait]
impl DetectorBackend for TestBackend {
    async fn load(&self, preset: ModelPreset) -> LoadResult<Box<dyn Detector>> {
        if let Some((gated, gate)) = &self.gate {
            if *gated == preset {
                gate.notified().await;
            }
        }
        if self.failing.contains(&preset) {
            return Err(LoadError::Backend {
                preset,
                reason: "network unreachable".to_string(),
            });
        }
        Ok(Box::new(ScriptedDetector {
            family: preset.family(),
            counter: self.counter.clone(),
        }))
    }
}

struct DeniedCamera;

#[async_trait]
impl CameraSource for DeniedCamera {
    async fn acquire(&mut self) -> Result<Box<dyn CameraStream>, CameraError> {
        Err(CameraError::PermissionDenied)
    }
}

/// 分辨率随帧变化的视频流, `dims` 报告最近一帧的尺寸
struct ResizingStream {
    frames: Vec<Frame>,
    cursor: usize,
    current: Dims,
}

impl CameraStream for ResizingStream {
    fn dims(&self) -> Dims {
        self.current
    }

    fn next_frame(&mut self) -> Option<Frame> {
        let frame = self.frames.get(self.cursor).or(self.frames.last())?.clone();
        self.cursor += 1;
        self.current = frame.dims();
        Some(frame)
    }

    fn release(self: Box<Self>) {}
}

struct ResizingCamera(Vec<Frame>);

#[async_trait]
impl CameraSource for ResizingCamera {
    async fn acquire(&mut self) -> Result<Box<dyn CameraStream>, CameraError> {
        Ok(Box::new(ResizingStream {
            frames: self.0.clone(),
            cursor: 0,
            current: self.0.first().map(Frame::dims).unwrap_or_default(),
        }))
    }
}

/// 不解析字节, 直接给出固定尺寸的帧
struct FixedDecoder(Dims);

impl ImageDecoder for FixedDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<Frame, DecodeError> {
        Ok(frame(self.0.width, self.0.height))
    }
}

fn frame(width: u32, height: u32) -> Frame {
    Frame::new(vec![0; (width * height * 4) as usize], width, height)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([90, 90, 90, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png).unwrap();
    bytes
}

fn new_loop(backend: TestBackend) -> FrameLoop<RecordingSurface> {
    FrameLoop::new(
        Arc::new(backend),
        Box::new(SequenceCamera::new(vec![frame(64, 48)])),
        RecordingSurface::new(Dims::new(1, 1)),
        ModelPreset::CocoSsdLite,
    )
}

/// 启动并等待默认模型加载完成
async fn ready_loop(backend: TestBackend) -> FrameLoop<RecordingSurface> {
    let mut frame_loop = new_loop(backend);
    assert!(frame_loop.startup());
    assert_eq!(
        frame_loop.next_load_event().await,
        Some(LoadEvent::Installed(ModelPreset::CocoSsdLite))
    );
    frame_loop
}

/// 最近一次渲染的第一个检测框
fn first_box(frame_loop: &FrameLoop<RecordingSurface>) -> Option<RectF> {
    frame_loop
        .surface()
        .ops_since_clear()
        .iter()
        .find_map(|op| match op {
            DrawOp::StrokeRect { rect, .. } => Some(*rect),
            _ => None,
        })
}

fn latest_log(frame_loop: &FrameLoop<RecordingSurface>) -> String {
    frame_loop
        .log()
        .latest()
        .map(|entry| entry.message.clone())
        .unwrap_or_default()
}

// ========== 测试 ==========

#[tokio::test]
async fn startup_installs_default_model() {
    let frame_loop = ready_loop(TestBackend::default()).await;
    assert_eq!(frame_loop.state(), LoopState::Idle);
    assert_eq!(frame_loop.active_preset(), Some(ModelPreset::CocoSsdLite));
    assert_eq!(latest_log(&frame_loop), "Model loaded: COCO-SSD Lite");
    assert!(!frame_loop.is_loading());
}

#[tokio::test]
async fn camera_cycle_renders_describes_and_counts() {
    let counter = CallCounter::default();
    let mut frame_loop = ready_loop(TestBackend {
        counter: counter.clone(),
        ..Default::default()
    })
    .await;

    frame_loop.start_camera().await.unwrap();
    assert_eq!(frame_loop.state(), LoopState::Detecting);
    assert_eq!(frame_loop.surface().size(), Dims::new(64, 48));
    assert_eq!(latest_log(&frame_loop), "Camera started (64x48)");

    let outcome = frame_loop.tick(Instant::now());
    assert!(matches!(outcome, CycleOutcome::Completed { total: 2, .. }));
    assert_eq!(counter.calls(), 1);
    assert_eq!(
        frame_loop.display().description,
        "The scene contains 1 person and 1 dog. People are here with animals."
    );
    assert_eq!(frame_loop.display().stats.total, 2);
    assert!(!frame_loop.surface().ops_since_clear().is_empty());
    assert!(frame_loop
        .surface()
        .ops_since_clear()
        .iter()
        .any(|op| matches!(op, DrawOp::StrokeRect { .. })));
}

#[tokio::test]
async fn switch_then_stop_discards_late_load() {
    let gate = Arc::new(Notify::new());
    let mut frame_loop = ready_loop(TestBackend {
        gate: Some((ModelPreset::MoveNet, Arc::clone(&gate))),
        ..Default::default()
    })
    .await;
    frame_loop.start_camera().await.unwrap();

    assert!(frame_loop.switch_model(ModelPreset::MoveNet));
    assert_eq!(frame_loop.state(), LoopState::Loading(ModelFamily::Pose));
    assert!(frame_loop.stop());
    assert_eq!(frame_loop.state(), LoopState::Idle);

    // 停止之后加载才完成
    gate.notify_one();
    assert_eq!(
        frame_loop.next_load_event().await,
        Some(LoadEvent::Discarded(ModelPreset::MoveNet))
    );
    assert_eq!(frame_loop.state(), LoopState::Idle);
    assert_eq!(frame_loop.active_preset(), Some(ModelPreset::CocoSsdLite));
    assert_eq!(frame_loop.tick(Instant::now()), CycleOutcome::Inactive);
    assert_eq!(latest_log(&frame_loop), "Detection stopped");
    assert_eq!(frame_loop.next_load_event().await, None);
}

#[tokio::test]
async fn stop_twice_is_idempotent() {
    let mut frame_loop = ready_loop(TestBackend::default()).await;
    assert!(!frame_loop.stop());

    frame_loop.start_camera().await.unwrap();
    assert!(frame_loop.stop());
    let entries = frame_loop.log().len();

    assert!(!frame_loop.stop());
    assert_eq!(frame_loop.log().len(), entries);
    assert_eq!(frame_loop.state(), LoopState::Idle);
    assert_eq!(frame_loop.input_mode(), None);
}

#[tokio::test]
async fn static_image_runs_exactly_one_cycle() {
    let counter = CallCounter::default();
    let mut frame_loop = ready_loop(TestBackend {
        counter: counter.clone(),
        ..Default::default()
    })
    .await;

    let outcome = frame_loop.load_image(&png_bytes(32, 24)).unwrap();
    assert_eq!(outcome, CycleOutcome::Completed { total: 2, fps: None });
    assert_eq!(frame_loop.state(), LoopState::Ready);
    assert_eq!(frame_loop.surface().size(), Dims::new(32, 24));

    assert_eq!(frame_loop.tick(Instant::now()), CycleOutcome::Inactive);
    assert_eq!(counter.calls(), 1);
}

#[tokio::test]
async fn config_update_reruns_static_image_cycle() {
    let counter = CallCounter::default();
    let mut frame_loop = ready_loop(TestBackend {
        counter: counter.clone(),
        ..Default::default()
    })
    .await;
    frame_loop.load_image(&png_bytes(32, 24)).unwrap();

    let outcome = frame_loop.update_config(ConfigUpdate::Threshold(0.2));
    assert_eq!(outcome, CycleOutcome::Completed { total: 3, fps: None });
    assert_eq!(counter.calls(), 2);
    assert_eq!(
        frame_loop.display().description,
        "The scene contains 1 person, 1 dog, and 1 car. This looks like a street or traffic scene."
    );

    let outcome = frame_loop.update_config(ConfigUpdate::MaxDetections(1));
    assert_eq!(outcome, CycleOutcome::Completed { total: 1, fps: None });
}

#[tokio::test]
async fn config_update_waits_for_next_camera_cycle() {
    let counter = CallCounter::default();
    let mut frame_loop = ready_loop(TestBackend {
        counter: counter.clone(),
        ..Default::default()
    })
    .await;
    frame_loop.start_camera().await.unwrap();

    assert_eq!(
        frame_loop.update_config(ConfigUpdate::Threshold(0.2)),
        CycleOutcome::Inactive
    );
    assert_eq!(counter.calls(), 0);
    assert!(matches!(
        frame_loop.tick(Instant::now()),
        CycleOutcome::Completed { total: 3, .. }
    ));
}

#[tokio::test]
async fn camera_failure_raises_alert_without_state_change() {
    let mut frame_loop = FrameLoop::new(
        Arc::new(TestBackend::default()),
        Box::new(DeniedCamera),
        RecordingSurface::new(Dims::new(1, 1)),
        ModelPreset::CocoSsdLite,
    );

    let err = frame_loop.start_camera().await.unwrap_err();
    assert!(matches!(
        err,
        FrameLoopError::Camera(CameraError::PermissionDenied)
    ));
    assert_eq!(frame_loop.state(), LoopState::Idle);
    assert_eq!(
        frame_loop.display().alert.as_deref(),
        Some("camera permission denied")
    );
    assert_eq!(latest_log(&frame_loop), "Camera error: camera permission denied");
}

#[tokio::test]
async fn load_failure_keeps_previous_model() {
    let mut frame_loop = ready_loop(TestBackend {
        failing: vec![ModelPreset::Hands],
        ..Default::default()
    })
    .await;
    frame_loop.start_camera().await.unwrap();

    assert!(frame_loop.switch_model(ModelPreset::Hands));
    let event = frame_loop.next_load_event().await;
    assert!(matches!(
        event,
        Some(LoadEvent::Failed {
            preset: ModelPreset::Hands,
            ..
        })
    ));
    assert_eq!(frame_loop.active_preset(), Some(ModelPreset::CocoSsdLite));
    assert_eq!(frame_loop.state(), LoopState::Detecting);
    assert!(frame_loop.display().error.is_some());
    assert!(latest_log(&frame_loop).starts_with("Model load failed"));
    assert!(matches!(
        frame_loop.tick(Instant::now()),
        CycleOutcome::Completed { .. }
    ));
}

#[tokio::test]
async fn detection_error_skips_cycle_and_keeps_looping() {
    let counter = CallCounter::default();
    let mut frame_loop = ready_loop(TestBackend {
        counter: counter.clone(),
        ..Default::default()
    })
    .await;
    frame_loop.start_camera().await.unwrap();
    frame_loop.tick(Instant::now());
    let description = frame_loop.display().description.clone();

    counter.fail_next_cycle();
    assert!(matches!(
        frame_loop.tick(Instant::now()),
        CycleOutcome::Failed(DetectionCycleError::Inference(_))
    ));
    assert_eq!(frame_loop.display().description, description);
    assert_eq!(frame_loop.state(), LoopState::Detecting);

    assert!(matches!(
        frame_loop.tick(Instant::now()),
        CycleOutcome::Completed { .. }
    ));
    assert_eq!(counter.calls(), 3);
}

#[tokio::test]
async fn switch_is_rejected_for_same_preset_or_while_loading() {
    let gate = Arc::new(Notify::new());
    let mut frame_loop = ready_loop(TestBackend {
        gate: Some((ModelPreset::MoveNet, Arc::clone(&gate))),
        ..Default::default()
    })
    .await;

    assert!(!frame_loop.switch_model(ModelPreset::CocoSsdLite));
    assert!(frame_loop.switch_model(ModelPreset::MoveNet));
    assert!(!frame_loop.switch_model(ModelPreset::Hands));

    gate.notify_one();
    assert_eq!(
        frame_loop.next_load_event().await,
        Some(LoadEvent::Installed(ModelPreset::MoveNet))
    );
    assert_eq!(frame_loop.active_family(), ModelFamily::Pose);
}

#[tokio::test]
async fn model_switch_resumes_camera_with_new_family() {
    let mut frame_loop = ready_loop(TestBackend::default()).await;
    frame_loop.start_camera().await.unwrap();
    frame_loop.tick(Instant::now());

    assert!(frame_loop.switch_model(ModelPreset::MoveNet));
    assert_eq!(frame_loop.display().description, "No people detected.");
    assert_eq!(frame_loop.tick(Instant::now()), CycleOutcome::Inactive);

    assert_eq!(
        frame_loop.next_load_event().await,
        Some(LoadEvent::Installed(ModelPreset::MoveNet))
    );
    assert_eq!(frame_loop.state(), LoopState::Detecting);
    assert_eq!(frame_loop.input_mode(), Some(scene_lens::input::InputMode::Camera));

    frame_loop.tick(Instant::now());
    assert_eq!(
        frame_loop.display().description,
        "1 person detected. Full body is visible."
    );
}

#[tokio::test]
async fn image_loaded_during_switch_runs_once_model_is_ready() {
    let counter = CallCounter::default();
    let gate = Arc::new(Notify::new());
    let mut frame_loop = ready_loop(TestBackend {
        counter: counter.clone(),
        gate: Some((ModelPreset::Hands, Arc::clone(&gate))),
        ..Default::default()
    })
    .await;

    assert!(frame_loop.switch_model(ModelPreset::Hands));
    assert_eq!(
        frame_loop.load_image(&png_bytes(16, 16)).unwrap(),
        CycleOutcome::Inactive
    );
    assert_eq!(counter.calls(), 0);

    gate.notify_one();
    frame_loop.next_load_event().await;
    assert_eq!(frame_loop.state(), LoopState::Ready);
    assert_eq!(counter.calls(), 1);
    assert_eq!(
        frame_loop.display().description,
        "1 Left hand detected, all 21 landmarks."
    );
}

#[tokio::test]
async fn pause_and_resume_keep_camera_attached() {
    let counter = CallCounter::default();
    let mut frame_loop = ready_loop(TestBackend {
        counter: counter.clone(),
        ..Default::default()
    })
    .await;
    frame_loop.start_camera().await.unwrap();

    assert!(frame_loop.pause());
    assert_eq!(frame_loop.state(), LoopState::Paused);
    assert_eq!(frame_loop.tick(Instant::now()), CycleOutcome::Inactive);
    assert_eq!(frame_loop.input_mode(), Some(scene_lens::input::InputMode::Camera));

    assert!(frame_loop.resume());
    assert!(matches!(
        frame_loop.tick(Instant::now()),
        CycleOutcome::Completed { .. }
    ));
    assert_eq!(counter.calls(), 1);
}

#[tokio::test]
async fn image_replaces_camera_source() {
    let mut frame_loop = ready_loop(TestBackend::default()).await;
    frame_loop.start_camera().await.unwrap();

    frame_loop.load_image(&png_bytes(20, 10)).unwrap();
    assert_eq!(
        frame_loop.input_mode(),
        Some(scene_lens::input::InputMode::StaticImage)
    );
    assert_eq!(frame_loop.surface().size(), Dims::new(20, 10));
    assert_eq!(frame_loop.notify_resize(), Some(Dims::new(20, 10)));
}

#[tokio::test]
async fn bad_image_bytes_leave_state_untouched() {
    let mut frame_loop = ready_loop(TestBackend::default()).await;
    let err = frame_loop.load_image(b"definitely not a png").unwrap_err();
    assert!(matches!(err, FrameLoopError::Decode(_)));
    assert_eq!(frame_loop.state(), LoopState::Idle);
    assert!(latest_log(&frame_loop).starts_with("Image decode failed"));
}

#[tokio::test(start_paused = true)]
async fn run_drives_cycles_until_shutdown() {
    let counter = CallCounter::default();
    let mut frame_loop = new_loop(TestBackend {
        counter: counter.clone(),
        ..Default::default()
    });
    frame_loop.startup();

    let (tx, rx) = mpsc::channel(8);
    tx.send(ControlMessage::StartCamera).await.unwrap();
    let sender = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        tx.send(ControlMessage::Shutdown).await.unwrap();
    });

    frame_loop.run(rx, Duration::from_millis(16)).await;
    sender.await.unwrap();

    assert_eq!(frame_loop.state(), LoopState::Idle);
    assert_eq!(frame_loop.active_preset(), Some(ModelPreset::CocoSsdLite));
    assert!(counter.calls() > 0);
    let messages: Vec<String> = frame_loop
        .log()
        .entries()
        .map(|entry| entry.message.clone())
        .collect();
    assert_eq!(messages.first().map(String::as_str), Some("Detection stopped"));
    assert!(messages.iter().any(|m| m == "Camera started (64x48)"));
    assert!(messages.iter().any(|m| m == "Model loaded: COCO-SSD Lite"));
}

#[tokio::test]
async fn stop_during_startup_load_keeps_default_model() {
    let counter = CallCounter::default();
    let gate = Arc::new(Notify::new());
    let mut frame_loop = new_loop(TestBackend {
        counter: counter.clone(),
        gate: Some((ModelPreset::CocoSsdLite, Arc::clone(&gate))),
        ..Default::default()
    });
    assert!(frame_loop.startup());

    // 没有输入源, 只有启动模型在加载
    assert!(!frame_loop.stop());
    assert_eq!(frame_loop.state(), LoopState::Loading(ModelFamily::Object));
    assert!(!frame_loop.switch_model(ModelPreset::CocoSsdLite));

    gate.notify_one();
    assert_eq!(
        frame_loop.next_load_event().await,
        Some(LoadEvent::Installed(ModelPreset::CocoSsdLite))
    );
    assert_eq!(frame_loop.state(), LoopState::Idle);

    frame_loop.start_camera().await.unwrap();
    for _ in 0..3 {
        assert!(matches!(
            frame_loop.tick(Instant::now()),
            CycleOutcome::Completed { .. }
        ));
    }
    assert_eq!(counter.calls(), 3);
}

#[tokio::test]
async fn stop_with_camera_during_startup_load_still_installs_model() {
    let gate = Arc::new(Notify::new());
    let mut frame_loop = new_loop(TestBackend {
        gate: Some((ModelPreset::CocoSsdLite, Arc::clone(&gate))),
        ..Default::default()
    });
    frame_loop.startup();
    frame_loop.start_camera().await.unwrap();
    assert_eq!(frame_loop.state(), LoopState::Loading(ModelFamily::Object));

    assert!(frame_loop.stop());
    assert_eq!(frame_loop.input_mode(), None);
    assert_eq!(latest_log(&frame_loop), "Detection stopped");

    gate.notify_one();
    assert_eq!(
        frame_loop.next_load_event().await,
        Some(LoadEvent::Installed(ModelPreset::CocoSsdLite))
    );
    assert_eq!(frame_loop.state(), LoopState::Idle);
    assert_eq!(frame_loop.active_preset(), Some(ModelPreset::CocoSsdLite));
    assert_eq!(frame_loop.tick(Instant::now()), CycleOutcome::Inactive);
    assert!(!frame_loop.stop());
}

#[tokio::test]
async fn surface_follows_source_only_on_attach_and_resize() {
    let mut frame_loop = FrameLoop::new(
        Arc::new(TestBackend::default()),
        Box::new(ResizingCamera(vec![frame(64, 48), frame(128, 96)])),
        RecordingSurface::new(Dims::new(1, 1)),
        ModelPreset::CocoSsdLite,
    );
    frame_loop.startup();
    frame_loop.next_load_event().await;
    frame_loop.start_camera().await.unwrap();
    assert_eq!(frame_loop.surface().size(), Dims::new(64, 48));

    frame_loop.tick(Instant::now());
    assert_eq!(first_box(&frame_loop), Some(RectF::new(4.0, 4.0, 20.0, 30.0)));

    // 同一视频流分辨率变化: 表面尺寸不变, 坐标按 表面/帧 比例缩放
    frame_loop.tick(Instant::now());
    assert_eq!(frame_loop.surface().size(), Dims::new(64, 48));
    assert_eq!(first_box(&frame_loop), Some(RectF::new(2.0, 2.0, 10.0, 15.0)));

    assert_eq!(frame_loop.notify_resize(), Some(Dims::new(128, 96)));
    assert_eq!(frame_loop.surface().size(), Dims::new(128, 96));
    frame_loop.tick(Instant::now());
    assert_eq!(first_box(&frame_loop), Some(RectF::new(4.0, 4.0, 20.0, 30.0)));
}

#[tokio::test]
async fn custom_decoder_feeds_static_image_cycle() {
    let mut frame_loop = ready_loop(TestBackend::default())
        .await
        .with_decoder(Box::new(FixedDecoder(Dims::new(40, 30))));

    let outcome = frame_loop.load_image(b"raw frame").unwrap();
    assert_eq!(outcome, CycleOutcome::Completed { total: 2, fps: None });
    assert_eq!(frame_loop.surface().size(), Dims::new(40, 30));
    assert_eq!(frame_loop.detections().map(|set| set.len()), Some(2));
    assert_eq!(
        frame_loop.detections().map(|set| set.family()),
        Some(ModelFamily::Object)
    );
}
