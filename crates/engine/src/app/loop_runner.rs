use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::ActionStates;
use super::metrics::MetricsAccumulator;
use super::{InputAction, InputSnapshot, RenderFrame, Renderer, Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub max_render_fps: Option<u32>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Cyberrip".to_string(),
            window_width: 1280,
            window_height: 720,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(5),
            max_render_fps: Some(60),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Opens the window and drives `scene` with a fixed-step simulation until the
/// window closes or the scene asks to quit.
pub fn run_app(config: LoopConfig, mut scene: Box<dyn Scene>) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window)).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(5));
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);

    let initial_size = window.inner_size();
    let mut input_collector = InputCollector::default();
    let mut frame = RenderFrame::new((initial_size.width, initial_size.height));

    scene.load();
    info!(
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval, Instant::now());
    let mut last_applied_title: Option<String> = None;
    let mut unloaded = false;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => input_collector.release_all(),
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    accumulator =
                        accumulator.saturating_add(clamp_frame_delta(raw_frame_dt, max_frame_delta));
                    let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        let input_snapshot = input_collector.snapshot_for_tick();
                        let command = scene.update(fixed_dt_seconds, &input_snapshot);
                        metrics_accumulator.record_tick();
                        if command == SceneCommand::Quit {
                            info!(reason = "scene_quit", "shutdown_requested");
                            window_target.exit();
                            break;
                        }
                    }
                    accumulator = step_plan.remaining_accumulator;

                    if step_plan.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame, "sim_clamp_triggered"
                        );
                    }

                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep = compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    let viewport = renderer.viewport();
                    frame.reset((viewport.width, viewport.height));
                    scene.render(&mut frame);
                    if let Err(error) = renderer.render_frame(&frame) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();

                    let next_title = scene.debug_title();
                    if next_title != last_applied_title {
                        window.set_title(next_title.as_deref().unwrap_or(&config.window_title));
                        last_applied_title = next_title;
                    }

                    metrics_accumulator.record_frame(raw_frame_dt);
                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                if !unloaded {
                    scene.unload();
                    unloaded = true;
                }
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Accumulates keyboard state between ticks.
///
/// Press edges and typed text are drained by `snapshot_for_tick`, so the
/// first tick after a key goes down sees it and later ticks do not.
#[derive(Debug, Default)]
struct InputCollector {
    held: ActionStates,
    pressed: ActionStates,
    typed_text: String,
}

impl InputCollector {
    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        if let Some(action) = action_for_key(key_event.physical_key) {
            self.handle_action_state(action, is_pressed);
        }
        if is_pressed {
            if let Some(text) = key_event.text.as_ref() {
                self.push_typed_text(text);
            }
        }
    }

    fn handle_action_state(&mut self, action: InputAction, is_pressed: bool) {
        if is_pressed && !self.held.is_down(action) {
            self.pressed.set(action, true);
        }
        self.held.set(action, is_pressed);
    }

    fn push_typed_text(&mut self, text: &str) {
        self.typed_text
            .extend(text.chars().filter(|character| !character.is_control()));
    }

    fn release_all(&mut self) {
        self.held.clear();
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(
            self.held,
            self.pressed,
            std::mem::take(&mut self.typed_text),
        );
        self.pressed.clear();
        snapshot
    }
}

fn action_for_key(key: PhysicalKey) -> Option<InputAction> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let action = match code {
        KeyCode::KeyW | KeyCode::ArrowUp => InputAction::MoveUp,
        KeyCode::KeyS | KeyCode::ArrowDown => InputAction::MoveDown,
        KeyCode::KeyA | KeyCode::ArrowLeft => InputAction::MoveLeft,
        KeyCode::KeyD | KeyCode::ArrowRight => InputAction::MoveRight,
        KeyCode::KeyF => InputAction::Interact,
        KeyCode::Escape => InputAction::Cancel,
        KeyCode::Enter | KeyCode::NumpadEnter => InputAction::Confirm,
        KeyCode::Tab => InputAction::NextField,
        KeyCode::Backspace => InputAction::Erase,
        KeyCode::KeyZ => InputAction::ToggleZoom,
        KeyCode::KeyC => InputAction::OpenWardrobe,
        _ => return None,
    };
    Some(action)
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(600), max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn plan_sim_steps_runs_expected_ticks_without_drop() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(48), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_keeps_partial_step() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(20), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 1);
        assert_eq!(result.remaining_accumulator, Duration::from_millis(4));
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(120), fixed_dt, 3);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn press_is_edge_triggered_for_single_tick() {
        let mut input = InputCollector::default();
        input.handle_action_state(InputAction::Interact, true);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();

        assert!(first.was_pressed(InputAction::Interact));
        assert!(!second.was_pressed(InputAction::Interact));
        assert!(second.is_down(InputAction::Interact));
    }

    #[test]
    fn held_key_does_not_repeat_press_edges() {
        let mut input = InputCollector::default();

        input.handle_action_state(InputAction::Confirm, true);
        let first = input.snapshot_for_tick();
        input.handle_action_state(InputAction::Confirm, true);
        let second = input.snapshot_for_tick();
        input.handle_action_state(InputAction::Confirm, false);
        input.handle_action_state(InputAction::Confirm, true);
        let third = input.snapshot_for_tick();

        assert!(first.was_pressed(InputAction::Confirm));
        assert!(!second.was_pressed(InputAction::Confirm));
        assert!(third.was_pressed(InputAction::Confirm));
    }

    #[test]
    fn press_and_release_between_ticks_still_reports_edge() {
        let mut input = InputCollector::default();
        input.handle_action_state(InputAction::NextField, true);
        input.handle_action_state(InputAction::NextField, false);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.was_pressed(InputAction::NextField));
        assert!(!snapshot.is_down(InputAction::NextField));
    }

    #[test]
    fn wasd_and_arrow_keys_map_to_movement() {
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::KeyW)),
            Some(InputAction::MoveUp)
        );
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::ArrowLeft)),
            Some(InputAction::MoveLeft)
        );
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::KeyD)),
            Some(InputAction::MoveRight)
        );
        assert_eq!(action_for_key(PhysicalKey::Code(KeyCode::KeyQ)), None);
    }

    #[test]
    fn dialog_keys_map_to_actions() {
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::Escape)),
            Some(InputAction::Cancel)
        );
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::Tab)),
            Some(InputAction::NextField)
        );
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::Backspace)),
            Some(InputAction::Erase)
        );
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::KeyF)),
            Some(InputAction::Interact)
        );
    }

    #[test]
    fn typed_text_is_drained_and_control_characters_dropped() {
        let mut input = InputCollector::default();
        input.push_typed_text("Bo");
        input.push_typed_text("\u{8}");
        input.push_typed_text("b\r");

        assert_eq!(input.snapshot_for_tick().typed_text(), "Bob");
        assert_eq!(input.snapshot_for_tick().typed_text(), "");
    }

    #[test]
    fn losing_focus_releases_held_keys() {
        let mut input = InputCollector::default();
        input.handle_action_state(InputAction::MoveDown, true);
        input.release_all();
        assert!(!input.snapshot_for_tick().is_down(InputAction::MoveDown));
    }

    #[test]
    fn target_frame_duration_for_60hz_is_expected() {
        let duration = target_frame_duration(Some(60)).expect("duration");
        assert!((duration.as_secs_f64() - (1.0 / 60.0)).abs() < 0.000_001);
        assert_eq!(target_frame_duration(None), None);
    }

    #[test]
    fn compute_cap_sleep_only_when_under_budget() {
        let target = target_frame_duration(Some(60));
        assert_eq!(compute_cap_sleep(Duration::from_millis(20), target), Duration::ZERO);
        assert!(compute_cap_sleep(Duration::from_millis(5), target) > Duration::ZERO);
    }

    #[test]
    fn normalize_render_fps_cap_disables_zero() {
        assert_eq!(normalize_render_fps_cap(Some(0)), None);
        assert_eq!(normalize_render_fps_cap(Some(60)), Some(60));
    }
}
