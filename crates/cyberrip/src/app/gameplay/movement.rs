use engine::{InputAction, InputSnapshot, Vec2, MOVEMENT_ACTIONS};

use super::world::{Appearance, GameMap, TileCoord, SIT_OFFSET, TILE_SIZE};

/// Feet-only collision box, relative to the sprite's top-left corner.
const HITBOX_LEFT: f32 = 12.0;
const HITBOX_RIGHT: f32 = TILE_SIZE - 12.0;
const HITBOX_TOP: f32 = TILE_SIZE / 2.0;
const HITBOX_BOTTOM: f32 = TILE_SIZE - 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Facing {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Player {
    /// Top-left corner of the 48x48 sprite cell.
    pub(crate) position: Vec2,
    pub(crate) facing: Facing,
    pub(crate) is_moving: bool,
    pub(crate) is_sitting: bool,
    pub(crate) appearance: Appearance,
}

impl Player {
    pub(crate) fn spawn_at(tile: TileCoord) -> Self {
        Self {
            position: tile.origin(),
            facing: Facing::Up,
            is_moving: false,
            is_sitting: false,
            appearance: Appearance::default(),
        }
    }

    pub(crate) fn center(&self) -> Vec2 {
        self.position + Vec2::new(TILE_SIZE / 2.0, TILE_SIZE / 2.0)
    }

    pub(crate) fn sit_on(&mut self, seat: TileCoord) {
        self.position = seat.seat_position();
        self.is_sitting = true;
        self.is_moving = false;
        self.facing = Facing::Right;
    }

    pub(crate) fn stand_up(&mut self) {
        self.is_sitting = false;
        self.position.y += SIT_OFFSET;
    }
}

/// Directional input sampled for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct MovementInput {
    /// Signed sum of held directions; opposite keys cancel per axis.
    pub(crate) direction: Vec2,
    /// A directional key went down since the previous tick.
    pub(crate) direction_pressed: bool,
}

impl MovementInput {
    pub(crate) fn from_snapshot(input: &InputSnapshot) -> Self {
        let mut direction = Vec2::ZERO;
        if input.is_down(InputAction::MoveUp) {
            direction.y -= 1.0;
        }
        if input.is_down(InputAction::MoveDown) {
            direction.y += 1.0;
        }
        if input.is_down(InputAction::MoveLeft) {
            direction.x -= 1.0;
        }
        if input.is_down(InputAction::MoveRight) {
            direction.x += 1.0;
        }
        Self {
            direction,
            direction_pressed: input.any_pressed(&MOVEMENT_ACTIONS),
        }
    }
}

/// Advances the player by one fixed tick.
///
/// A seated player does not move; a fresh directional press stands them up
/// and the tick ends there. Otherwise the X move is tried first, then the Y
/// move from the resulting X, so contact on one axis still lets the other
/// axis slide.
pub(crate) fn step_player(player: &mut Player, map: &GameMap, input: MovementInput, speed: f32) {
    if player.is_sitting {
        if input.direction_pressed {
            player.stand_up();
        }
        return;
    }

    if input.direction.is_zero() {
        player.is_moving = false;
        return;
    }

    let velocity = input.direction.normalized() * speed;
    let current = player.position;
    let mut resolved = current;
    if !hitbox_collides(map, Vec2::new(current.x + velocity.x, current.y)) {
        resolved.x = current.x + velocity.x;
    }
    if !hitbox_collides(map, Vec2::new(resolved.x, current.y + velocity.y)) {
        resolved.y = current.y + velocity.y;
    }

    player.position = resolved;
    player.facing = facing_for(velocity, player.facing);
    player.is_moving = true;
}

/// True when any hitbox corner lands outside the map or on a blocking tile.
pub(crate) fn hitbox_collides(map: &GameMap, position: Vec2) -> bool {
    let left = position.x + HITBOX_LEFT;
    let right = position.x + HITBOX_RIGHT;
    let top = position.y + HITBOX_TOP;
    let bottom = position.y + HITBOX_BOTTOM;
    [
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(left, bottom),
        Vec2::new(right, bottom),
    ]
    .into_iter()
    .any(|corner| map.blocks_point(corner))
}

fn facing_for(velocity: Vec2, current: Facing) -> Facing {
    if velocity.x.abs() > velocity.y.abs() {
        if velocity.x > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    } else if velocity.y > 0.0 {
        Facing::Down
    } else if velocity.y < 0.0 {
        Facing::Up
    } else {
        current
    }
}
