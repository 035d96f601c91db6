use engine::Vec2;

use super::movement::Player;
use super::world::{GameMap, Interactable, InteractableKind, TileCoord};

/// What a single interact press should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interaction {
    None,
    StandUp,
    OpenApplication,
    OpenNoticeBoard,
    Sit(TileCoord),
    Notify(&'static str),
}

/// Closest interactable whose tile center is strictly within `radius` of
/// `from`. Equal distances keep the earliest registered one.
pub(crate) fn nearest_interactable(
    map: &GameMap,
    from: Vec2,
    radius: f32,
) -> Option<(usize, &Interactable)> {
    let mut best: Option<(usize, &Interactable, f32)> = None;
    for (index, interactable) in map.interactables().iter().enumerate() {
        let distance = interactable.cell.center().distance(from);
        if distance >= radius {
            continue;
        }
        if best.map_or(true, |(_, _, best_distance)| distance < best_distance) {
            best = Some((index, interactable, distance));
        }
    }
    best.map(|(index, interactable, _)| (index, interactable))
}

/// Resolves an interact press. Open dialogs are handled by the dialog
/// itself, so a press that reaches here while one is open does nothing.
pub(crate) fn resolve_interact(
    dialog_open: bool,
    player: &Player,
    nearest: Option<&Interactable>,
) -> Interaction {
    if dialog_open {
        return Interaction::None;
    }
    if player.is_sitting {
        return Interaction::StandUp;
    }
    let Some(target) = nearest else {
        return Interaction::None;
    };
    match target.kind {
        InteractableKind::Receptionist => Interaction::OpenApplication,
        InteractableKind::NoticeBoard => Interaction::OpenNoticeBoard,
        InteractableKind::Chair { seat } => Interaction::Sit(seat),
        InteractableKind::Priest => target.message.map_or(Interaction::None, Interaction::Notify),
    }
}
