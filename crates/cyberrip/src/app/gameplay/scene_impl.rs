use std::time::Duration;

use engine::{InputAction, InputSnapshot, RenderFrame, Scene, SceneCommand};
use tracing::{debug, info};

use super::dialog::{ApplicationForm, Dialog, DialogOutcome, WardrobeState};
use super::director::CeremonyDirector;
use super::eulogy::EulogyDispatcher;
use super::funeral::{FuneralBoard, PendingRequest};
use super::interaction::{nearest_interactable, resolve_interact, Interaction};
use super::map_gen::PLAYER_SPAWN;
use super::movement::{step_player, MovementInput, Player};
use super::staging::{draw_stage, StageView};
use super::world::GameMap;
use crate::app::config::SessionConfig;

pub(crate) const PROCESSING_TEXT: &str = "Processing request...";
pub(crate) const SCHEDULED_TEXT: &str = "Funeral scheduled.";

const ZOOM_START: f32 = 1.5;
const ZOOM_STEP: f32 = 0.25;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Notification {
    pub(crate) text: String,
    /// `None` stays up until replaced.
    pub(crate) remaining: Option<Duration>,
}

/// The funeral home session: one map, one player, one chapel.
pub(crate) struct CeremonyScene {
    config: SessionConfig,
    map: GameMap,
    pub(crate) player: Player,
    pub(crate) board: FuneralBoard,
    pub(crate) director: CeremonyDirector,
    dispatcher: EulogyDispatcher,
    pub(crate) dialog: Option<Dialog>,
    pub(crate) notification: Option<Notification>,
    nearest: Option<usize>,
    pub(crate) zoom: f32,
    next_request_seq: u64,
}

impl CeremonyScene {
    pub(crate) fn new(config: SessionConfig, map: GameMap, dispatcher: EulogyDispatcher) -> Self {
        let director = CeremonyDirector::new(config.ceremony.clone());
        Self {
            config,
            map,
            player: Player::spawn_at(PLAYER_SPAWN),
            board: FuneralBoard::seeded(),
            director,
            dispatcher,
            dialog: Some(Dialog::Intro),
            notification: None,
            nearest: None,
            zoom: ZOOM_START,
            next_request_seq: 1,
        }
    }

    #[cfg(test)]
    pub(crate) fn map(&self) -> &GameMap {
        &self.map
    }

    #[cfg(test)]
    pub(crate) fn nearest_id(&self) -> Option<&str> {
        self.nearest
            .and_then(|index| self.map.interactables().get(index))
            .map(|interactable| interactable.id.as_str())
    }

    fn notify(&mut self, text: &str, lasting: Option<Duration>) {
        self.notification = Some(Notification {
            text: text.to_string(),
            remaining: lasting,
        });
    }

    fn notify_briefly(&mut self, text: &str) {
        let lasting = self.config.notification_duration();
        self.notify(text, Some(lasting));
    }

    fn tick_notification(&mut self, dt: Duration) {
        let Some(notification) = self.notification.as_mut() else {
            return;
        };
        let Some(remaining) = notification.remaining else {
            return;
        };
        if remaining <= dt {
            self.notification = None;
        } else {
            notification.remaining = Some(remaining - dt);
        }
    }

    fn collect_eulogies(&mut self) {
        for resolved in self.dispatcher.poll() {
            debug!(
                id = %resolved.request.id,
                wait_ms = resolved.wait.as_millis() as u64,
                "application_completed"
            );
            self.board.enqueue(resolved.request);
            self.notify(SCHEDULED_TEXT, None);
        }
    }

    fn submit_application(&mut self, name: String, cause: String) {
        let request = PendingRequest::new(self.next_request_seq, &name, &cause);
        self.next_request_seq += 1;
        info!(id = %request.id, deceased = %name, cause = %cause, "application_submitted");
        self.notify(PROCESSING_TEXT, None);
        self.dispatcher.submit(request);
    }

    fn handle_dialog(&mut self, input: &InputSnapshot) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match dialog.handle_input(input, &mut self.player.appearance) {
            DialogOutcome::Stay => {}
            DialogOutcome::Close => {
                debug!(dialog = dialog.title(), "dialog_closed");
                self.dialog = None;
            }
            DialogOutcome::Submit { name, cause } => {
                self.dialog = None;
                self.submit_application(name, cause);
            }
        }
    }

    fn toggle_zoom(&mut self) {
        self.zoom = if self.zoom >= ZOOM_MAX {
            ZOOM_MIN
        } else {
            self.zoom + ZOOM_STEP
        };
        debug!(zoom = self.zoom, "zoom_changed");
    }

    fn interact(&mut self) {
        let nearest = nearest_interactable(
            &self.map,
            self.player.center(),
            self.config.world.interaction_radius,
        )
        .map(|(_, interactable)| interactable);
        let interaction = resolve_interact(self.dialog.is_some(), &self.player, nearest);
        debug!(
            target = nearest.map(|target| target.id.as_str()),
            ?interaction,
            "interact"
        );
        match interaction {
            Interaction::None => {}
            Interaction::StandUp => self.player.stand_up(),
            Interaction::OpenApplication => {
                self.dialog = Some(Dialog::Application(ApplicationForm::default()))
            }
            Interaction::OpenNoticeBoard => self.dialog = Some(Dialog::NoticeBoard),
            Interaction::Sit(seat) => self.player.sit_on(seat),
            Interaction::Notify(message) => self.notify_briefly(message),
        }
    }
}

impl Scene for CeremonyScene {
    fn load(&mut self) {
        info!(
            interactables = self.map.interactables().len(),
            npcs = self.map.npcs().len(),
            queue_len = self.board.queue_len(),
            "scene_loaded"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        let dt = Duration::from_secs_f32(fixed_dt_seconds.max(0.0));
        self.collect_eulogies();

        if self.dialog.is_some() {
            self.handle_dialog(input);
        } else {
            if input.was_pressed(InputAction::ToggleZoom) {
                self.toggle_zoom();
            }
            if input.was_pressed(InputAction::OpenWardrobe) {
                self.dialog = Some(Dialog::Wardrobe(WardrobeState::default()));
            } else if input.was_pressed(InputAction::Interact) {
                self.interact();
            }
        }

        if self.dialog.is_none() {
            step_player(
                &mut self.player,
                &self.map,
                MovementInput::from_snapshot(input),
                self.config.world.player_speed,
            );
        }

        self.nearest = nearest_interactable(
            &self.map,
            self.player.center(),
            self.config.world.interaction_radius,
        )
        .map(|(index, _)| index);

        self.director.advance(dt, &mut self.board);
        self.tick_notification(dt);
        SceneCommand::None
    }

    fn render(&mut self, frame: &mut RenderFrame) {
        let nearest = self
            .nearest
            .and_then(|index| self.map.interactables().get(index));
        let view = StageView {
            map: &self.map,
            player: &self.player,
            director: &self.director,
            board: &self.board,
            dialog: self.dialog.as_ref(),
            notification: self.notification.as_ref().map(|note| note.text.as_str()),
            nearest,
            zoom: self.zoom,
            eulogies_in_flight: self.dispatcher.in_flight(),
        };
        draw_stage(frame, &view);
    }

    fn unload(&mut self) {
        self.director.shutdown();
        info!(
            eulogies_in_flight = self.dispatcher.in_flight(),
            completed = self.board.history_len(),
            "scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        Some(format!(
            "{} | {} | {} in queue",
            self.config.window.title,
            self.director.phase().name(),
            self.board.queue_len()
        ))
    }
}
