use engine::{Rgba, Tilemap, TilemapError, Vec2};
use thiserror::Error;

pub(crate) const TILE_SIZE: f32 = 48.0;
pub(crate) const MAP_WIDTH: u32 = 40;
pub(crate) const MAP_HEIGHT: u32 = 30;

/// Vertical offset between a chair tile origin and a seated character.
pub(crate) const SIT_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub(crate) enum TileType {
    Floor = 0,
    Wall = 1,
    Grass = 2,
    Door = 3,
    Tombstone = 5,
    Altar = 6,
    Water = 7,
    Chair = 8,
    Carpet = 9,
    Path = 10,
    Desk = 11,
    Bench = 12,
    Tree = 13,
    Flower = 14,
    Candle = 15,
    Window = 16,
    Podium = 17,
}

impl TileType {
    pub(crate) const fn id(self) -> u16 {
        self as u16
    }

    pub(crate) fn from_id(id: u16) -> Option<Self> {
        let tile = match id {
            0 => Self::Floor,
            1 => Self::Wall,
            2 => Self::Grass,
            3 => Self::Door,
            5 => Self::Tombstone,
            6 => Self::Altar,
            7 => Self::Water,
            8 => Self::Chair,
            9 => Self::Carpet,
            10 => Self::Path,
            11 => Self::Desk,
            12 => Self::Bench,
            13 => Self::Tree,
            14 => Self::Flower,
            15 => Self::Candle,
            16 => Self::Window,
            17 => Self::Podium,
            _ => return None,
        };
        Some(tile)
    }

    /// Walls and desks stop movement; everything else can be walked over.
    pub(crate) const fn is_blocking(self) -> bool {
        matches!(self, Self::Wall | Self::Desk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TileCoord {
    pub(crate) x: u32,
    pub(crate) y: u32,
}

impl TileCoord {
    pub(crate) const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub(crate) fn origin(self) -> Vec2 {
        Vec2::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }

    pub(crate) fn center(self) -> Vec2 {
        self.origin() + Vec2::new(TILE_SIZE / 2.0, TILE_SIZE / 2.0)
    }

    /// Where a character sprite sits when seated on this tile.
    pub(crate) fn seat_position(self) -> Vec2 {
        self.origin() - Vec2::new(0.0, SIT_OFFSET)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InteractableKind {
    Receptionist,
    NoticeBoard,
    Chair { seat: TileCoord },
    Priest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Interactable {
    pub(crate) id: String,
    pub(crate) cell: TileCoord,
    pub(crate) kind: InteractableKind,
    pub(crate) message: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Appearance {
    pub(crate) hat: Rgba,
    pub(crate) shirt: Rgba,
    pub(crate) pants: Rgba,
    pub(crate) skin: Rgba,
    pub(crate) has_hat: bool,
}

pub(crate) const fn hex(rgb: u32) -> Rgba {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255]
}

pub(crate) const SKIN: Rgba = hex(0xffdbac);

impl Default for Appearance {
    fn default() -> Self {
        Self {
            hat: hex(0xe4b85d),
            shirt: hex(0xf44336),
            pants: hex(0x1565c0),
            skin: SKIN,
            has_hat: true,
        }
    }
}

/// Seated decoration; never moves after generation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Npc {
    pub(crate) id: String,
    pub(crate) position: Vec2,
    pub(crate) appearance: Appearance,
}

#[derive(Debug, Error)]
pub(crate) enum MapError {
    #[error("generated map has an invalid shape: {0}")]
    Shape(#[from] TilemapError),
}

/// Immutable world data shared by movement, interaction and drawing.
#[derive(Debug, Clone)]
pub(crate) struct GameMap {
    tilemap: Tilemap,
    interactables: Vec<Interactable>,
    npcs: Vec<Npc>,
}

impl GameMap {
    pub(crate) fn new(
        width: u32,
        height: u32,
        tiles: &[TileType],
        interactables: Vec<Interactable>,
        npcs: Vec<Npc>,
    ) -> Result<Self, MapError> {
        let ids = tiles.iter().map(|tile| tile.id()).collect();
        let tilemap = Tilemap::new(width, height, TILE_SIZE, ids)?;
        Ok(Self {
            tilemap,
            interactables,
            npcs,
        })
    }

    pub(crate) fn width(&self) -> u32 {
        self.tilemap.width()
    }

    pub(crate) fn height(&self) -> u32 {
        self.tilemap.height()
    }

    pub(crate) fn tile(&self, x: u32, y: u32) -> Option<TileType> {
        self.tilemap.tile_at(x, y).and_then(TileType::from_id)
    }

    /// True when the grid cell containing `point` is outside the map or
    /// holds a blocking tile.
    pub(crate) fn blocks_point(&self, point: Vec2) -> bool {
        match self.tilemap.cell_at_world(point) {
            Some((x, y)) => self.tile(x, y).map_or(true, TileType::is_blocking),
            None => true,
        }
    }

    /// Registration order is preserved; proximity ties resolve to the first.
    pub(crate) fn interactables(&self) -> &[Interactable] {
        &self.interactables
    }

    pub(crate) fn npcs(&self) -> &[Npc] {
        &self.npcs
    }
}

/// Chapel interior in tile units, used for the "amen" chorus.
pub(crate) fn is_in_chapel(position: Vec2) -> bool {
    let tile_x = position.x / TILE_SIZE;
    let tile_y = position.y / TILE_SIZE;
    (10.0..=29.0).contains(&tile_x) && (6.0..=17.0).contains(&tile_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_map() -> GameMap {
        let mut tiles = vec![TileType::Floor; 9];
        tiles[4] = TileType::Wall;
        GameMap::new(3, 3, &tiles, Vec::new(), Vec::new()).expect("map")
    }

    #[test]
    fn tile_ids_round_trip_through_the_tilemap() {
        for tile in [TileType::Floor, TileType::Desk, TileType::Podium, TileType::Tombstone] {
            assert_eq!(TileType::from_id(tile.id()), Some(tile));
        }
        assert_eq!(TileType::from_id(4), None);
    }

    #[test]
    fn only_walls_and_desks_block() {
        assert!(TileType::Wall.is_blocking());
        assert!(TileType::Desk.is_blocking());
        assert!(!TileType::Door.is_blocking());
        assert!(!TileType::Water.is_blocking());
        assert!(!TileType::Bench.is_blocking());
    }

    #[test]
    fn points_outside_the_grid_block() {
        let map = walled_map();
        assert!(!map.blocks_point(Vec2::new(10.0, 10.0)));
        assert!(map.blocks_point(Vec2::new(60.0, 60.0)));
        assert!(map.blocks_point(Vec2::new(-1.0, 10.0)));
        assert!(map.blocks_point(Vec2::new(10.0, 144.0)));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let error = GameMap::new(2, 2, &[TileType::Floor], Vec::new(), Vec::new())
            .expect_err("mismatch");
        assert!(matches!(error, MapError::Shape(_)));
    }

    #[test]
    fn seat_position_sits_above_the_tile_origin() {
        assert_eq!(
            TileCoord::new(12, 10).seat_position(),
            Vec2::new(576.0, 470.0)
        );
        assert_eq!(TileCoord::new(0, 0).center(), Vec2::new(24.0, 24.0));
    }

    #[test]
    fn chapel_bounds_are_inclusive() {
        assert!(is_in_chapel(Vec2::new(10.0 * TILE_SIZE, 6.0 * TILE_SIZE)));
        assert!(is_in_chapel(Vec2::new(29.0 * TILE_SIZE, 17.0 * TILE_SIZE)));
        assert!(!is_in_chapel(Vec2::new(19.0 * TILE_SIZE, 26.0 * TILE_SIZE)));
    }

    #[test]
    fn hex_colors_expand_to_opaque_rgba() {
        assert_eq!(hex(0xffdbac), [0xff, 0xdb, 0xac, 255]);
    }
}
