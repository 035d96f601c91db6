use std::collections::VecDeque;
use std::time::SystemTime;

use tracing::info;

const SEED_NAME: &str = "Your Motivation";
const SEED_CAUSE: &str = "Doomscrolling";
const SEED_EULOGY: &str = "It died as it lived: consuming content without creating anything. \
It was tragic. We gathered here today not to mourn, but to scroll past this moment.";

/// A submitted application whose eulogy is still being written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingRequest {
    pub(crate) id: String,
    pub(crate) deceased_name: String,
    pub(crate) cause_of_death: String,
    pub(crate) submitted_at: SystemTime,
}

impl PendingRequest {
    pub(crate) fn new(sequence: u64, deceased_name: &str, cause_of_death: &str) -> Self {
        Self {
            id: format!("req-{sequence}"),
            deceased_name: deceased_name.to_string(),
            cause_of_death: cause_of_death.to_string(),
            submitted_at: SystemTime::now(),
        }
    }

    pub(crate) fn resolve(self, eulogy: String) -> FuneralRequest {
        FuneralRequest {
            id: self.id,
            deceased_name: self.deceased_name,
            cause_of_death: self.cause_of_death,
            eulogy,
            submitted_at: self.submitted_at,
            attendees: 0,
        }
    }
}

/// A request with its eulogy in hand, ready for the chapel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FuneralRequest {
    pub(crate) id: String,
    pub(crate) deceased_name: String,
    pub(crate) cause_of_death: String,
    pub(crate) eulogy: String,
    pub(crate) submitted_at: SystemTime,
    pub(crate) attendees: u32,
}

/// Pending ceremonies in arrival order and completed ones, newest first.
#[derive(Debug, Default)]
pub(crate) struct FuneralBoard {
    queue: VecDeque<FuneralRequest>,
    history: VecDeque<FuneralRequest>,
}

impl FuneralBoard {
    pub(crate) fn seeded() -> Self {
        let mut board = Self::default();
        board.enqueue(
            PendingRequest {
                id: "init".to_string(),
                deceased_name: SEED_NAME.to_string(),
                cause_of_death: SEED_CAUSE.to_string(),
                submitted_at: SystemTime::now(),
            }
            .resolve(SEED_EULOGY.to_string()),
        );
        board
    }

    pub(crate) fn enqueue(&mut self, request: FuneralRequest) {
        info!(
            id = %request.id,
            deceased = %request.deceased_name,
            queue_len = self.queue.len() + 1,
            "funeral_enqueued"
        );
        self.queue.push_back(request);
    }

    pub(crate) fn dequeue_next(&mut self) -> Option<FuneralRequest> {
        self.queue.pop_front()
    }

    pub(crate) fn record_completed(&mut self, request: FuneralRequest) {
        self.history.push_front(request);
    }

    pub(crate) fn queue(&self) -> impl Iterator<Item = &FuneralRequest> {
        self.queue.iter()
    }

    pub(crate) fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn history(&self) -> impl Iterator<Item = &FuneralRequest> {
        self.history.iter()
    }

    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }
}
