//! Ceremony director: a linear phase machine with one single-shot timer.
//!
//! Time only moves through [`CeremonyDirector::advance`]. Each phase arms at
//! most one timer on entry and entering a phase always drops whatever was
//! pending, so a transition can never fire against a ceremony it was not
//! armed for.

use std::time::Duration;

use tracing::{debug, info};

use super::chunker::chunk_text;
use super::funeral::{FuneralBoard, FuneralRequest};
use crate::app::config::CeremonyTimings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum DirectorPhase {
    Idle,
    Arrival,
    Procession,
    BearersReturn,
    Preaching,
    PreAmen,
    Amen,
    Burial,
    BearersLeave,
    HearseLeave,
}

impl DirectorPhase {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Arrival => "arrival",
            Self::Procession => "procession",
            Self::BearersReturn => "bearers_return",
            Self::Preaching => "preaching",
            Self::PreAmen => "pre_amen",
            Self::Amen => "amen",
            Self::Burial => "burial",
            Self::BearersLeave => "bearers_leave",
            Self::HearseLeave => "hearse_leave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    PhaseElapsed,
    SpeechStart,
    ChunkRead,
    ChunkGap,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    remaining: Duration,
    event: TimerEvent,
}

#[derive(Debug, Default)]
struct SpeechState {
    chunks: Vec<String>,
    cursor: usize,
    displayed: Option<usize>,
    started: bool,
}

#[derive(Debug)]
struct ActiveCeremony {
    request: FuneralRequest,
    phase: DirectorPhase,
    phase_elapsed: Duration,
    speech: SpeechState,
}

#[derive(Debug)]
pub(crate) struct CeremonyDirector {
    timings: CeremonyTimings,
    active: Option<ActiveCeremony>,
    timer: Option<Timer>,
    just_became_idle: bool,
}

impl CeremonyDirector {
    pub(crate) fn new(timings: CeremonyTimings) -> Self {
        Self {
            timings,
            active: None,
            timer: None,
            just_became_idle: false,
        }
    }

    pub(crate) fn phase(&self) -> DirectorPhase {
        self.active
            .as_ref()
            .map_or(DirectorPhase::Idle, |active| active.phase)
    }

    pub(crate) fn active_request(&self) -> Option<&FuneralRequest> {
        self.active.as_ref().map(|active| &active.request)
    }

    /// The speech chunk on screen right now, if any.
    pub(crate) fn current_chunk(&self) -> Option<&str> {
        let speech = &self.active.as_ref()?.speech;
        speech
            .displayed
            .and_then(|index| speech.chunks.get(index))
            .map(String::as_str)
    }

    pub(crate) fn phase_elapsed(&self) -> Duration {
        self.active
            .as_ref()
            .map_or(Duration::ZERO, |active| active.phase_elapsed)
    }

    /// Fraction of a timed phase that has passed, in `[0, 1]`. Untimed
    /// phases report 0.
    pub(crate) fn phase_progress(&self) -> f32 {
        let Some(total) = self.phase_duration(self.phase()) else {
            return 0.0;
        };
        if total.is_zero() {
            return 1.0;
        }
        (self.phase_elapsed().as_secs_f32() / total.as_secs_f32()).min(1.0)
    }

    fn phase_duration(&self, phase: DirectorPhase) -> Option<Duration> {
        let timings = &self.timings;
        let ms = match phase {
            DirectorPhase::Idle | DirectorPhase::Preaching => return None,
            DirectorPhase::Arrival => timings.arrival_ms,
            DirectorPhase::Procession => timings.procession_ms,
            DirectorPhase::BearersReturn => timings.bearers_return_ms,
            DirectorPhase::PreAmen => timings.pre_amen_ms,
            DirectorPhase::Amen => timings.amen_ms,
            DirectorPhase::Burial => timings.burial_ms,
            DirectorPhase::BearersLeave => timings.bearers_leave_ms,
            DirectorPhase::HearseLeave => timings.hearse_leave_ms,
        };
        Some(Duration::from_millis(ms))
    }

    /// Moves the director forward by one tick of `dt`.
    ///
    /// An idle director takes the head of the queue and starts it without
    /// spending `dt`; the tick on which a ceremony finishes never starts the
    /// next one. While a ceremony runs, time left over after a timer fires
    /// flows into the next timer within the same tick.
    pub(crate) fn advance(&mut self, dt: Duration, board: &mut FuneralBoard) {
        if self.active.is_none() {
            if std::mem::take(&mut self.just_became_idle) {
                return;
            }
            if let Some(request) = board.dequeue_next() {
                self.start(request);
            }
            return;
        }

        let mut budget = dt;
        while let Some(timer) = self.timer.as_mut() {
            if budget < timer.remaining {
                timer.remaining -= budget;
                self.add_elapsed(budget);
                return;
            }
            let Timer { remaining, event } = *timer;
            budget -= remaining;
            self.timer = None;
            self.add_elapsed(remaining);
            self.fire(event, board);
            if self.active.is_none() {
                return;
            }
        }
        self.add_elapsed(budget);
    }

    /// Drops the active ceremony and any pending timer.
    pub(crate) fn shutdown(&mut self) {
        if let Some(active) = self.active.take() {
            info!(
                id = %active.request.id,
                phase = active.phase.name(),
                "ceremony_abandoned"
            );
        }
        self.timer = None;
        self.just_became_idle = false;
    }

    fn start(&mut self, request: FuneralRequest) {
        let chunks = chunk_text(&request.eulogy);
        info!(
            id = %request.id,
            deceased = %request.deceased_name,
            chunks = chunks.len(),
            "ceremony_started"
        );
        self.active = Some(ActiveCeremony {
            request,
            phase: DirectorPhase::Idle,
            phase_elapsed: Duration::ZERO,
            speech: SpeechState {
                chunks,
                ..SpeechState::default()
            },
        });
        self.enter(DirectorPhase::Arrival, None);
    }

    fn add_elapsed(&mut self, elapsed: Duration) {
        if let Some(active) = self.active.as_mut() {
            active.phase_elapsed += elapsed;
        }
    }

    fn arm(&mut self, after: Duration, event: TimerEvent) {
        self.timer = Some(Timer {
            remaining: after,
            event,
        });
    }

    fn enter(&mut self, phase: DirectorPhase, board: Option<&mut FuneralBoard>) {
        self.timer = None;
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.phase = phase;
        active.phase_elapsed = Duration::ZERO;
        info!(id = %active.request.id, phase = phase.name(), "phase_entered");

        match phase {
            DirectorPhase::Idle => {}
            DirectorPhase::Preaching => {
                let speech = &mut active.speech;
                if speech.cursor == 0 && !speech.started {
                    speech.started = true;
                    let delay = Duration::from_millis(self.timings.preaching_start_delay_ms);
                    self.arm(delay, TimerEvent::SpeechStart);
                }
            }
            DirectorPhase::BearersLeave => {
                if let Some(board) = board {
                    board.record_completed(active.request.clone());
                }
                self.arm_phase_timer(phase);
            }
            _ => self.arm_phase_timer(phase),
        }
    }

    fn arm_phase_timer(&mut self, phase: DirectorPhase) {
        if let Some(duration) = self.phase_duration(phase) {
            self.arm(duration, TimerEvent::PhaseElapsed);
        }
    }

    fn fire(&mut self, event: TimerEvent, board: &mut FuneralBoard) {
        match event {
            TimerEvent::PhaseElapsed => self.next_phase(board),
            TimerEvent::SpeechStart | TimerEvent::ChunkGap => self.show_next_chunk(board),
            TimerEvent::ChunkRead => self.hide_chunk(),
        }
    }

    fn next_phase(&mut self, board: &mut FuneralBoard) {
        let next = match self.phase() {
            DirectorPhase::Arrival => DirectorPhase::Procession,
            DirectorPhase::Procession => DirectorPhase::BearersReturn,
            DirectorPhase::BearersReturn => DirectorPhase::Preaching,
            DirectorPhase::PreAmen => DirectorPhase::Amen,
            DirectorPhase::Amen => DirectorPhase::Burial,
            DirectorPhase::Burial => DirectorPhase::BearersLeave,
            DirectorPhase::BearersLeave => DirectorPhase::HearseLeave,
            DirectorPhase::HearseLeave => {
                self.finish();
                return;
            }
            DirectorPhase::Idle | DirectorPhase::Preaching => return,
        };
        self.enter(next, Some(board));
    }

    fn show_next_chunk(&mut self, board: &mut FuneralBoard) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let speech = &mut active.speech;
        let Some(chunk) = speech.chunks.get(speech.cursor) else {
            speech.displayed = None;
            self.enter(DirectorPhase::PreAmen, Some(board));
            return;
        };
        let read = self.timings.read_duration(chunk);
        debug!(
            id = %active.request.id,
            index = speech.cursor,
            read_ms = read.as_millis() as u64,
            "speech_chunk"
        );
        speech.displayed = Some(speech.cursor);
        self.arm(read, TimerEvent::ChunkRead);
    }

    fn hide_chunk(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.speech.displayed = None;
        active.speech.cursor += 1;
        self.arm(
            Duration::from_millis(self.timings.speech_gap_ms),
            TimerEvent::ChunkGap,
        );
    }

    fn finish(&mut self) {
        self.timer = None;
        if let Some(active) = self.active.take() {
            info!(id = %active.request.id, "ceremony_finished");
        }
        self.just_became_idle = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::funeral::PendingRequest;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn board_with(names: &[&str], eulogy: &str) -> FuneralBoard {
        let mut board = FuneralBoard::default();
        for (index, name) in names.iter().enumerate() {
            board.enqueue(PendingRequest::new(index as u64, name, "tests").resolve(eulogy.into()));
        }
        board
    }

    fn started(eulogy: &str) -> (CeremonyDirector, FuneralBoard) {
        let mut board = board_with(&["Bob"], eulogy);
        let mut director = CeremonyDirector::new(CeremonyTimings::default());
        director.advance(Duration::ZERO, &mut board);
        (director, board)
    }

    #[test]
    fn idle_director_without_requests_stays_idle() {
        let mut board = FuneralBoard::default();
        let mut director = CeremonyDirector::new(CeremonyTimings::default());
        director.advance(ms(10_000), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Idle);
        assert!(director.active_request().is_none());
    }

    #[test]
    fn start_dequeues_head_without_spending_time() {
        let (director, board) = started("Short.");
        assert_eq!(director.phase(), DirectorPhase::Arrival);
        assert_eq!(director.active_request().map(|r| r.deceased_name.as_str()), Some("Bob"));
        assert_eq!(board.queue_len(), 0);
        assert_eq!(director.phase_elapsed(), Duration::ZERO);
    }

    #[test]
    fn arrival_lasts_exactly_its_duration() {
        let (mut director, mut board) = started("Short.");
        director.advance(ms(3_999), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Arrival);
        assert!((director.phase_progress() - 3_999.0 / 4_000.0).abs() < 1e-4);
        director.advance(ms(1), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Procession);
        assert_eq!(director.phase_elapsed(), Duration::ZERO);
    }

    #[test]
    fn leftover_time_carries_into_following_phases() {
        let (mut director, mut board) = started("Short.");
        // Arrival 4000 + Procession 12000, then 500 into BearersReturn.
        director.advance(ms(16_500), &mut board);
        assert_eq!(director.phase(), DirectorPhase::BearersReturn);
        assert_eq!(director.phase_elapsed(), ms(500));
    }

    #[test]
    fn preaching_waits_then_shows_first_chunk() {
        let (mut director, mut board) = started("One. Two.");
        director.advance(ms(4_000 + 12_000 + 6_000), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Preaching);
        assert_eq!(director.current_chunk(), None);
        director.advance(ms(999), &mut board);
        assert_eq!(director.current_chunk(), None);
        director.advance(ms(1), &mut board);
        assert_eq!(director.current_chunk(), Some("One."));
    }

    #[test]
    fn preaching_entry_does_not_restart_running_speech() {
        let (mut director, mut board) = started("One. Two.");
        director.advance(ms(22_000 + 1_000), &mut board);
        assert_eq!(director.current_chunk(), Some("One."));
        director.enter(DirectorPhase::Preaching, None);
        assert!(director.timer.is_none());
        assert_eq!(
            director.active.as_ref().map(|active| active.speech.started),
            Some(true)
        );
    }

    #[test]
    fn history_is_written_when_bearers_leave() {
        let (mut director, mut board) = started("Short.");
        let through_burial = 22_000 + 1_000 + 2_500 + 1_000 + 3_500 + 3_000 + 4_000;
        director.advance(ms(through_burial - 1), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Burial);
        assert_eq!(board.history_len(), 0);
        director.advance(ms(1), &mut board);
        assert_eq!(director.phase(), DirectorPhase::BearersLeave);
        assert_eq!(board.history_len(), 1);
        assert!(director.active_request().is_some());
    }

    #[test]
    fn finished_ceremony_waits_one_tick_before_next() {
        let mut board = board_with(&["A", "B"], "Short.");
        let mut director = CeremonyDirector::new(CeremonyTimings::default());
        director.advance(Duration::ZERO, &mut board);
        director.advance(ms(3_600_000), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Idle);
        assert_eq!(board.queue_len(), 1);

        director.advance(ms(16), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Idle);
        director.advance(ms(16), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Arrival);
        assert_eq!(director.active_request().map(|r| r.deceased_name.as_str()), Some("B"));
    }

    #[test]
    fn shutdown_cancels_everything() {
        let (mut director, mut board) = started("Short.");
        director.advance(ms(5_000), &mut board);
        director.shutdown();
        assert_eq!(director.phase(), DirectorPhase::Idle);
        assert!(director.timer.is_none());
        assert!(director.current_chunk().is_none());
        director.advance(ms(60_000), &mut board);
        assert_eq!(board.history_len(), 0);
    }

    #[test]
    fn empty_eulogy_skips_straight_to_pre_amen() {
        let (mut director, mut board) = started("   ");
        director.advance(ms(22_000 + 1_000), &mut board);
        assert_eq!(director.phase(), DirectorPhase::PreAmen);
    }

    #[test]
    fn untimed_phases_report_no_progress() {
        let (mut director, mut board) = started("Short.");
        director.advance(ms(22_500), &mut board);
        assert_eq!(director.phase(), DirectorPhase::Preaching);
        assert_eq!(director.phase_progress(), 0.0);
    }
}
