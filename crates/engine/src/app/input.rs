#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Interact,
    Cancel,
    Confirm,
    NextField,
    Erase,
    ToggleZoom,
    OpenWardrobe,
}

const ACTION_COUNT: usize = 11;

pub const MOVEMENT_ACTIONS: [InputAction; 4] = [
    InputAction::MoveUp,
    InputAction::MoveDown,
    InputAction::MoveLeft,
    InputAction::MoveRight,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn any_down(&self, actions: &[InputAction]) -> bool {
        actions.iter().any(|action| self.is_down(*action))
    }

    pub(crate) fn clear(&mut self) {
        self.down = [false; ACTION_COUNT];
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Interact => 4,
            InputAction::Cancel => 5,
            InputAction::Confirm => 6,
            InputAction::NextField => 7,
            InputAction::Erase => 8,
            InputAction::ToggleZoom => 9,
            InputAction::OpenWardrobe => 10,
        }
    }
}
