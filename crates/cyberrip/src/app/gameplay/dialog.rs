//! Modal dialogs. While one is open it owns every discrete key press and the
//! player does not move.

use engine::{InputAction, InputSnapshot, Rgba};

use super::world::{hex, Appearance};

pub(crate) const NAME_MAX_CHARS: usize = 30;
pub(crate) const CAUSE_MAX_CHARS: usize = 50;

pub(crate) const WARDROBE_PALETTE: [Rgba; 10] = [
    hex(0xe4b85d),
    hex(0x333333),
    hex(0xd32f2f),
    hex(0x388e3c),
    hex(0x1976d2),
    hex(0x5d4037),
    hex(0xf44336),
    hex(0xffeb3b),
    hex(0xffffff),
    hex(0x000000),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DialogOutcome {
    Stay,
    Close,
    Submit { name: String, cause: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FormField {
    #[default]
    Name,
    Cause,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ApplicationForm {
    pub(crate) name: String,
    pub(crate) cause: String,
    pub(crate) focus: FormField,
}

impl ApplicationForm {
    fn focused_mut(&mut self) -> (&mut String, usize) {
        match self.focus {
            FormField::Name => (&mut self.name, NAME_MAX_CHARS),
            FormField::Cause => (&mut self.cause, CAUSE_MAX_CHARS),
        }
    }

    pub(crate) fn type_text(&mut self, text: &str) {
        let (field, limit) = self.focused_mut();
        let room = limit.saturating_sub(field.chars().count());
        field.extend(text.chars().filter(|c| !c.is_control()).take(room));
    }

    pub(crate) fn erase(&mut self) {
        self.focused_mut().0.pop();
    }

    pub(crate) fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Cause,
            FormField::Cause => FormField::Name,
        };
    }

    /// Submits when both fields hold something besides whitespace;
    /// otherwise moves focus to the first empty field.
    pub(crate) fn confirm(&mut self) -> DialogOutcome {
        let name = self.name.trim();
        let cause = self.cause.trim();
        if !name.is_empty() && !cause.is_empty() {
            return DialogOutcome::Submit {
                name: name.to_string(),
                cause: cause.to_string(),
            };
        }
        self.focus = if name.is_empty() {
            FormField::Name
        } else {
            FormField::Cause
        };
        DialogOutcome::Stay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum WardrobeRow {
    #[default]
    Shirt,
    Pants,
    Hat,
    WearHat,
}

impl WardrobeRow {
    pub(crate) const ALL: [WardrobeRow; 4] = [Self::Shirt, Self::Pants, Self::Hat, Self::WearHat];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Shirt => "Shirt",
            Self::Pants => "Pants",
            Self::Hat => "Hat",
            Self::WearHat => "Wear Hat",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|row| *row == self).unwrap_or(0)
    }

    fn step(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let next = (self.index() as isize + delta).rem_euclid(len);
        Self::ALL[next as usize]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WardrobeState {
    pub(crate) row: WardrobeRow,
}

impl WardrobeState {
    fn adjust(&self, appearance: &mut Appearance, delta: isize) {
        match self.row {
            WardrobeRow::Shirt => appearance.shirt = cycle_color(appearance.shirt, delta),
            WardrobeRow::Pants => appearance.pants = cycle_color(appearance.pants, delta),
            WardrobeRow::Hat => appearance.hat = cycle_color(appearance.hat, delta),
            WardrobeRow::WearHat => appearance.has_hat = !appearance.has_hat,
        }
    }
}

/// Next palette entry after `current`; colors outside the palette start
/// from its first entry.
pub(crate) fn cycle_color(current: Rgba, delta: isize) -> Rgba {
    let len = WARDROBE_PALETTE.len() as isize;
    let next = match WARDROBE_PALETTE.iter().position(|color| *color == current) {
        Some(index) => (index as isize + delta).rem_euclid(len),
        None => 0,
    };
    WARDROBE_PALETTE[next as usize]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Dialog {
    Intro,
    Application(ApplicationForm),
    NoticeBoard,
    Wardrobe(WardrobeState),
}

impl Dialog {
    /// Mandatory dialogs ignore Cancel.
    pub(crate) fn is_mandatory(&self) -> bool {
        matches!(self, Self::Intro)
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Intro => "CyberRip",
            Self::Application(_) => "Funeral Application",
            Self::NoticeBoard => "Town Chronicles",
            Self::Wardrobe(_) => "Wardrobe",
        }
    }

    pub(crate) fn handle_input(
        &mut self,
        input: &InputSnapshot,
        appearance: &mut Appearance,
    ) -> DialogOutcome {
        if input.was_pressed(InputAction::Cancel) && !self.is_mandatory() {
            return DialogOutcome::Close;
        }
        match self {
            Self::Intro | Self::NoticeBoard => {
                if input.was_pressed(InputAction::Confirm) {
                    DialogOutcome::Close
                } else {
                    DialogOutcome::Stay
                }
            }
            Self::Application(form) => {
                if input.was_pressed(InputAction::Erase) {
                    form.erase();
                }
                if !input.typed_text().is_empty() {
                    form.type_text(input.typed_text());
                }
                if input.was_pressed(InputAction::NextField) {
                    form.next_field();
                }
                if input.was_pressed(InputAction::Confirm) {
                    return form.confirm();
                }
                DialogOutcome::Stay
            }
            Self::Wardrobe(state) => {
                if input.was_pressed(InputAction::Confirm) {
                    return DialogOutcome::Close;
                }
                if input.was_pressed(InputAction::MoveUp) {
                    state.row = state.row.step(-1);
                }
                if input.was_pressed(InputAction::MoveDown) {
                    state.row = state.row.step(1);
                }
                if input.was_pressed(InputAction::MoveLeft) {
                    state.adjust(appearance, -1);
                }
                if input.was_pressed(InputAction::MoveRight) {
                    state.adjust(appearance, 1);
                }
                DialogOutcome::Stay
            }
        }
    }
}
