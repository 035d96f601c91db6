use std::sync::Arc;
use std::time::Duration;

use engine::{InputAction, InputSnapshot, Scene, Vec2};

use super::chunker::chunk_text;
use super::dialog::Dialog;
use super::director::{CeremonyDirector, DirectorPhase};
use super::eulogy::test_support::CannedEulogy;
use super::eulogy::{EulogyDispatcher, EulogyError};
use super::funeral::{FuneralBoard, PendingRequest};
use super::map_gen::generate_map;
use super::scene_impl::{CeremonyScene, PROCESSING_TEXT, SCHEDULED_TEXT};
use super::world::TileCoord;
use crate::app::config::{CeremonyTimings, SessionConfig};

const TICK: f32 = 1.0 / 60.0;
const STEP_MS: u64 = 10;

fn scene_with(eulogy: Result<&'static str, fn() -> EulogyError>) -> CeremonyScene {
    let map = generate_map(11).expect("map");
    let dispatcher = EulogyDispatcher::inline(Arc::new(CannedEulogy(eulogy)));
    let mut scene = CeremonyScene::new(SessionConfig::default(), map, dispatcher);
    scene.load();
    scene
}

fn tick(scene: &mut CeremonyScene, input: InputSnapshot) {
    scene.update(TICK, &input);
}

fn idle(scene: &mut CeremonyScene) {
    tick(scene, InputSnapshot::empty());
}

fn press(scene: &mut CeremonyScene, action: InputAction) {
    tick(scene, InputSnapshot::empty().with_action_pressed(action));
}

fn close_intro(scene: &mut CeremonyScene) {
    assert_eq!(scene.dialog, Some(Dialog::Intro));
    press(scene, InputAction::Cancel);
    assert_eq!(scene.dialog, Some(Dialog::Intro), "intro is mandatory");
    press(scene, InputAction::Confirm);
    assert_eq!(scene.dialog, None);
}

fn standing_at(scene: &mut CeremonyScene, x: u32, y: u32) {
    scene.player.position = TileCoord::new(x, y).origin();
}

fn board_with(entries: &[(&str, &str)]) -> FuneralBoard {
    let mut board = FuneralBoard::default();
    for (index, (name, eulogy)) in entries.iter().enumerate() {
        board.enqueue(PendingRequest::new(index as u64, name, "testing").resolve(eulogy.to_string()));
    }
    board
}

/// Runs the director in fixed steps until it is idle with an empty queue,
/// returning each phase change and speech change with its timestamp.
fn record_run(director: &mut CeremonyDirector, board: &mut FuneralBoard) -> Vec<(u64, String)> {
    let mut events = Vec::new();
    let mut now = 0;
    let mut last_phase = director.phase();
    let mut last_chunk: Option<String> = None;
    director.advance(Duration::ZERO, board);
    loop {
        let phase = director.phase();
        assert_eq!(
            director.active_request().is_some(),
            phase != DirectorPhase::Idle,
            "active ceremony must exist exactly when not idle (t={now})"
        );
        if phase != last_phase {
            events.push((now, format!("phase:{}", phase.name())));
            last_phase = phase;
        }
        let chunk = director.current_chunk().map(str::to_string);
        if chunk != last_chunk {
            let label = chunk.clone().unwrap_or_else(|| "-".to_string());
            events.push((now, format!("chunk:{label}")));
            last_chunk = chunk;
        }
        if phase == DirectorPhase::Idle && board.queue_len() == 0 {
            return events;
        }
        assert!(now < 600_000, "ceremony never finished");
        director.advance(Duration::from_millis(STEP_MS), board);
        now += STEP_MS;
    }
}

#[test]
fn full_ceremony_plays_three_chunks_with_gaps() {
    let mut board = board_with(&[("Bob", "Bob came. Bob saw. Bob left.")]);
    let mut director = CeremonyDirector::new(CeremonyTimings::default());
    let events = record_run(&mut director, &mut board);

    let expected: Vec<(u64, String)> = [
        (0, "phase:arrival"),
        (4_000, "phase:procession"),
        (16_000, "phase:bearers_return"),
        (22_000, "phase:preaching"),
        (23_000, "chunk:Bob came."),
        (25_500, "chunk:-"),
        (26_500, "chunk:Bob saw."),
        (29_000, "chunk:-"),
        (30_000, "chunk:Bob left."),
        (32_500, "chunk:-"),
        (33_500, "phase:pre_amen"),
        (37_000, "phase:amen"),
        (40_000, "phase:burial"),
        (44_000, "phase:bearers_leave"),
        (50_000, "phase:hearse_leave"),
        (54_000, "phase:idle"),
    ]
    .into_iter()
    .map(|(at, label)| (at, label.to_string()))
    .collect();
    assert_eq!(events, expected);
    assert_eq!(board.history_len(), 1);
}

#[test]
fn longer_chunks_stay_on_screen_longer() {
    let eulogy = "This sentence has quite a few more characters than the others do.";
    let mut board = board_with(&[("Ann", eulogy)]);
    let mut director = CeremonyDirector::new(CeremonyTimings::default());
    let events = record_run(&mut director, &mut board);
    let shown = events
        .iter()
        .position(|(_, label)| label.starts_with("chunk:This"))
        .expect("chunk shown");
    let (shown_at, _) = events[shown];
    let (hidden_at, _) = &events[shown + 1];
    assert_eq!(hidden_at - shown_at, 65 * 60);
}

#[test]
fn phases_are_visited_in_order_for_each_ceremony() {
    let mut board = board_with(&[("A", "Short."), ("B", "Also short.")]);
    let mut director = CeremonyDirector::new(CeremonyTimings::default());
    let phases: Vec<String> = record_run(&mut director, &mut board)
        .into_iter()
        .filter_map(|(_, label)| label.strip_prefix("phase:").map(str::to_string))
        .collect();

    let one = [
        "arrival",
        "procession",
        "bearers_return",
        "preaching",
        "pre_amen",
        "amen",
        "burial",
        "bearers_leave",
        "hearse_leave",
        "idle",
    ];
    let expected: Vec<String> = one.iter().chain(one.iter()).map(|s| s.to_string()).collect();
    assert_eq!(phases, expected);
}

#[test]
fn history_lists_most_recent_ceremony_first() {
    let mut board = board_with(&[("A", "One."), ("B", "Two.")]);
    let mut director = CeremonyDirector::new(CeremonyTimings::default());
    record_run(&mut director, &mut board);
    let names: Vec<&str> = board
        .history()
        .map(|request| request.deceased_name.as_str())
        .collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn thirty_two_word_sentence_becomes_four_chunks() {
    let words: Vec<String> = (1..=32).map(|n| format!("w{n}")).collect();
    let chunks = chunk_text(&words.join(" "));
    assert_eq!(chunks.len(), 4);
    for chunk in &chunks[..3] {
        assert!(chunk.ends_with("..."));
        assert_eq!(chunk.trim_end_matches("...").split_whitespace().count(), 10);
    }
    assert_eq!(chunks[3], "w31 w32");
}

#[test]
fn intro_blocks_movement_until_confirmed() {
    let mut scene = scene_with(Ok("Fine."));
    let start = scene.player.position;
    tick(
        &mut scene,
        InputSnapshot::empty().with_action_down(InputAction::MoveUp, true),
    );
    assert_eq!(scene.player.position, start);

    close_intro(&mut scene);
    tick(
        &mut scene,
        InputSnapshot::empty().with_action_down(InputAction::MoveUp, true),
    );
    assert_eq!(scene.player.position, start - Vec2::new(0.0, 4.0));
}

#[test]
fn first_tick_starts_the_seeded_ceremony() {
    let mut scene = scene_with(Ok("Fine."));
    assert_eq!(scene.board.queue_len(), 1);
    idle(&mut scene);
    assert_eq!(scene.director.phase(), DirectorPhase::Arrival);
    assert_eq!(
        scene.director.active_request().map(|r| r.deceased_name.as_str()),
        Some("Your Motivation")
    );
    assert_eq!(scene.board.queue_len(), 0);
}

#[test]
fn application_flow_enqueues_after_eulogy_resolves() {
    let mut scene = scene_with(Ok("It was a good plant."));
    close_intro(&mut scene);

    standing_at(&mut scene, 24, 22);
    idle(&mut scene);
    assert_eq!(scene.nearest_id(), Some("receptionist"));
    press(&mut scene, InputAction::Interact);
    assert!(matches!(scene.dialog, Some(Dialog::Application(_))));

    tick(&mut scene, InputSnapshot::empty().with_typed_text("My Plant"));
    press(&mut scene, InputAction::NextField);
    tick(&mut scene, InputSnapshot::empty().with_typed_text("Neglect"));
    let queued_before = scene.board.queue_len();
    press(&mut scene, InputAction::Confirm);

    assert_eq!(scene.dialog, None);
    let note = scene.notification.as_ref().expect("notification");
    assert_eq!(note.text, PROCESSING_TEXT);
    assert_eq!(note.remaining, None);
    assert_eq!(scene.board.queue_len(), queued_before);

    idle(&mut scene);
    assert_eq!(scene.board.queue_len(), queued_before + 1);
    let queued = scene.board.queue().last().expect("queued");
    assert_eq!(queued.deceased_name, "My Plant");
    assert_eq!(queued.cause_of_death, "Neglect");
    assert_eq!(queued.eulogy, "It was a good plant.");
    assert_eq!(
        scene.notification.as_ref().map(|note| note.text.as_str()),
        Some(SCHEDULED_TEXT)
    );

    for _ in 0..240 {
        idle(&mut scene);
    }
    let note = scene.notification.as_ref().expect("still shown");
    assert_eq!(note.text, SCHEDULED_TEXT);
    assert_eq!(note.remaining, None);
}

#[test]
fn failed_eulogy_still_schedules_the_funeral() {
    fn offline() -> EulogyError {
        EulogyError::MissingApiKey {
            env_var: "GEMINI_API_KEY".to_string(),
        }
    }
    let mut scene = scene_with(Err(offline));
    close_intro(&mut scene);
    standing_at(&mut scene, 24, 22);
    press(&mut scene, InputAction::Interact);
    tick(&mut scene, InputSnapshot::empty().with_typed_text("Cat"));
    press(&mut scene, InputAction::NextField);
    tick(&mut scene, InputSnapshot::empty().with_typed_text("Curiosity"));
    press(&mut scene, InputAction::Confirm);
    idle(&mut scene);

    let queued = scene.board.queue().last().expect("queued");
    assert_eq!(
        queued.eulogy,
        "Here lies Cat. They died of Curiosity. (API Key missing - running in offline mode)"
    );
}

#[test]
fn submissions_are_queued_in_order() {
    let mut scene = scene_with(Ok("Gone."));
    close_intro(&mut scene);
    standing_at(&mut scene, 24, 22);
    for name in ["A", "B", "C"] {
        press(&mut scene, InputAction::Interact);
        tick(&mut scene, InputSnapshot::empty().with_typed_text(name));
        press(&mut scene, InputAction::NextField);
        tick(&mut scene, InputSnapshot::empty().with_typed_text("x"));
        press(&mut scene, InputAction::Confirm);
        idle(&mut scene);
    }
    let names: Vec<&str> = scene
        .board
        .queue()
        .map(|request| request.deceased_name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn sitting_then_direction_press_stands_before_moving() {
    let mut scene = scene_with(Ok("Fine."));
    close_intro(&mut scene);
    standing_at(&mut scene, 12, 11);
    press(&mut scene, InputAction::Interact);
    assert!(scene.player.is_sitting);
    assert_eq!(scene.player.position, Vec2::new(576.0, 470.0));

    tick(
        &mut scene,
        InputSnapshot::empty().with_action_down(InputAction::MoveDown, true),
    );
    assert!(scene.player.is_sitting, "held keys alone do not stand up");

    tick(
        &mut scene,
        InputSnapshot::empty().with_action_pressed(InputAction::MoveDown),
    );
    assert!(!scene.player.is_sitting);
    assert_eq!(scene.player.position, Vec2::new(576.0, 480.0));

    tick(
        &mut scene,
        InputSnapshot::empty().with_action_down(InputAction::MoveDown, true),
    );
    assert_eq!(scene.player.position, Vec2::new(576.0, 484.0));
}

#[test]
fn interact_while_sitting_only_stands_up() {
    let mut scene = scene_with(Ok("Fine."));
    close_intro(&mut scene);
    standing_at(&mut scene, 12, 11);
    press(&mut scene, InputAction::Interact);
    assert!(scene.player.is_sitting);
    press(&mut scene, InputAction::Interact);
    assert!(!scene.player.is_sitting);
    assert_eq!(scene.player.position, Vec2::new(576.0, 480.0));
    assert_eq!(scene.dialog, None);
}

#[test]
fn priest_marker_shows_a_transient_message() {
    let mut scene = scene_with(Ok("Fine."));
    close_intro(&mut scene);
    standing_at(&mut scene, 19, 10);
    press(&mut scene, InputAction::Interact);
    assert_eq!(
        scene.notification.as_ref().map(|note| note.text.as_str()),
        Some("Shh...")
    );

    for _ in 0..170 {
        idle(&mut scene);
    }
    assert!(scene.notification.is_some());
    for _ in 0..15 {
        idle(&mut scene);
    }
    assert!(scene.notification.is_none());
}

#[test]
fn notice_board_opens_and_closes() {
    let mut scene = scene_with(Ok("Fine."));
    close_intro(&mut scene);
    standing_at(&mut scene, 15, 19);
    press(&mut scene, InputAction::Interact);
    assert_eq!(scene.dialog, Some(Dialog::NoticeBoard));
    press(&mut scene, InputAction::Cancel);
    assert_eq!(scene.dialog, None);
}

#[test]
fn wardrobe_pauses_movement() {
    let mut scene = scene_with(Ok("Fine."));
    close_intro(&mut scene);
    press(&mut scene, InputAction::OpenWardrobe);
    assert!(matches!(scene.dialog, Some(Dialog::Wardrobe(_))));

    let start = scene.player.position;
    let shirt = scene.player.appearance.shirt;
    tick(
        &mut scene,
        InputSnapshot::empty().with_action_pressed(InputAction::MoveRight),
    );
    assert_eq!(scene.player.position, start);
    assert_ne!(scene.player.appearance.shirt, shirt);

    press(&mut scene, InputAction::Confirm);
    assert_eq!(scene.dialog, None);
}

#[test]
fn zoom_cycles_from_one_to_three() {
    let mut scene = scene_with(Ok("Fine."));
    close_intro(&mut scene);
    assert_eq!(scene.zoom, 1.5);
    let mut seen = Vec::new();
    for _ in 0..8 {
        press(&mut scene, InputAction::ToggleZoom);
        seen.push(scene.zoom);
    }
    assert_eq!(seen, vec![1.75, 2.0, 2.25, 2.5, 2.75, 3.0, 1.0, 1.25]);
}

#[test]
fn unload_cancels_the_running_ceremony() {
    let mut scene = scene_with(Ok("Fine."));
    idle(&mut scene);
    assert_eq!(scene.director.phase(), DirectorPhase::Arrival);
    scene.unload();
    assert_eq!(scene.director.phase(), DirectorPhase::Idle);
    assert!(scene.director.active_request().is_none());
}

#[test]
fn title_reports_phase_and_queue() {
    let mut scene = scene_with(Ok("Fine."));
    idle(&mut scene);
    let title = scene.debug_title().expect("title");
    assert!(title.ends_with("| arrival | 0 in queue"), "{title}");
    assert!(scene.map().interactables().len() > 40);
}
