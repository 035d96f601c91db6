use engine::Rgba;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::world::{
    hex, Appearance, GameMap, Interactable, InteractableKind, MapError, Npc, TileCoord, TileType,
    MAP_HEIGHT, MAP_WIDTH, SKIN,
};

const HAT_COLORS: [Rgba; 5] = [
    hex(0xe4b85d),
    hex(0x333333),
    hex(0xd32f2f),
    hex(0x388e3c),
    hex(0x1976d2),
];
const SHIRT_COLORS: [Rgba; 6] = [
    hex(0xf44336),
    hex(0x2196f3),
    hex(0x4caf50),
    hex(0xffeb3b),
    hex(0x9c27b0),
    hex(0x795548),
];
const PANTS_COLORS: [Rgba; 4] = [hex(0x1565c0), hex(0x3e2723), hex(0x212121), hex(0x558b2f)];

const NPC_SPAWN_CHANCE: f64 = 0.4;
const PEW_ROWS: [u32; 4] = [10, 12, 14, 16];
const LEFT_PEWS: [u32; 5] = [12, 13, 14, 15, 16];
const RIGHT_PEWS: [u32; 5] = [23, 24, 25, 26, 27];

const BUILDING_LEFT: u32 = 10;
const BUILDING_TOP: u32 = 6;
const BUILDING_RIGHT: u32 = 29;
const BUILDING_BOTTOM: u32 = 24;
const DIVIDER_ROW: u32 = 17;

/// Tile the player spawns on, just outside the main entrance.
pub(crate) const PLAYER_SPAWN: TileCoord = TileCoord::new(19, 26);

struct MapBuilder {
    tiles: Vec<TileType>,
    interactables: Vec<Interactable>,
    npcs: Vec<Npc>,
    rng: SmallRng,
}

impl MapBuilder {
    fn new(seed: u64) -> Self {
        Self {
            tiles: vec![TileType::Grass; (MAP_WIDTH * MAP_HEIGHT) as usize],
            interactables: Vec::new(),
            npcs: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn index(x: u32, y: u32) -> usize {
        (y * MAP_WIDTH + x) as usize
    }

    fn set(&mut self, x: u32, y: u32, tile: TileType) {
        self.tiles[Self::index(x, y)] = tile;
    }

    fn get(&self, x: u32, y: u32) -> TileType {
        self.tiles[Self::index(x, y)]
    }

    fn fill(&mut self, x1: u32, y1: u32, x2: u32, y2: u32, tile: TileType) {
        for y in y1..=y2 {
            for x in x1..=x2 {
                self.set(x, y, tile);
            }
        }
    }

    /// Fills the rectangle and rings it with walls.
    fn room(&mut self, x1: u32, y1: u32, x2: u32, y2: u32, floor: TileType) {
        for y in y1..=y2 {
            for x in x1..=x2 {
                let on_border = x == x1 || x == x2 || y == y1 || y == y2;
                self.set(x, y, if on_border { TileType::Wall } else { floor });
            }
        }
    }

    /// Registers an interactable; a later registration on the same cell
    /// replaces the earlier one but keeps its position in the order.
    fn register(
        &mut self,
        x: u32,
        y: u32,
        id: impl Into<String>,
        kind: InteractableKind,
        message: Option<&'static str>,
    ) {
        let interactable = Interactable {
            id: id.into(),
            cell: TileCoord::new(x, y),
            kind,
            message,
        };
        match self
            .interactables
            .iter_mut()
            .find(|existing| existing.cell == interactable.cell)
        {
            Some(existing) => *existing = interactable,
            None => self.interactables.push(interactable),
        }
    }

    fn seat(&mut self, x: u32, y: u32, id: String) {
        self.set(x, y, TileType::Bench);
        let seat = TileCoord::new(x, y);
        self.register(x, y, id, InteractableKind::Chair { seat }, None);
    }

    fn maybe_spawn_npc(&mut self, x: u32, y: u32) {
        if self.rng.gen::<f64>() >= NPC_SPAWN_CHANCE {
            return;
        }
        let appearance = Appearance {
            hat: pick(&mut self.rng, &HAT_COLORS),
            shirt: pick(&mut self.rng, &SHIRT_COLORS),
            pants: pick(&mut self.rng, &PANTS_COLORS),
            skin: SKIN,
            has_hat: self.rng.gen_bool(0.5),
        };
        self.npcs.push(Npc {
            id: format!("npc_{x}_{y}"),
            position: TileCoord::new(x, y).seat_position(),
            appearance,
        });
    }

    fn graveyard(&mut self) {
        for y in 1..MAP_HEIGHT - 1 {
            for x in 1..MAP_WIDTH - 1 {
                let roll = self.rng.gen::<f64>();
                let is_edge = x < 8 || x > 31 || y < 6 || y > 24;
                if !is_edge || self.get(x, y) != TileType::Grass {
                    continue;
                }
                if roll < 0.08 {
                    self.set(x, y, TileType::Tombstone);
                } else if roll < 0.12 {
                    self.set(x, y, TileType::Tree);
                } else if roll < 0.15 {
                    self.set(x, y, TileType::Flower);
                }
            }
        }
        self.fill(18, 0, 21, 8, TileType::Path);
        self.fill(18, 24, 21, MAP_HEIGHT - 1, TileType::Path);
        self.fill(0, 14, 8, 16, TileType::Path);
        self.fill(32, 14, MAP_WIDTH - 1, 16, TileType::Path);
    }

    fn chapel(&mut self) {
        self.room(BUILDING_LEFT, BUILDING_TOP, BUILDING_RIGHT, DIVIDER_ROW, TileType::Floor);
        for x in [13, 16, 23, 26] {
            self.set(x, BUILDING_TOP, TileType::Window);
        }
        self.fill(19, BUILDING_TOP + 1, 20, DIVIDER_ROW, TileType::Carpet);

        self.register(19, 9, "priest", InteractableKind::Priest, Some("Shh..."));
        self.register(20, 9, "priest_alt", InteractableKind::Priest, Some("Shh..."));

        let altar_row = BUILDING_TOP + 2;
        self.set(19, altar_row, TileType::Altar);
        self.set(20, altar_row, TileType::Altar);
        self.set(18, altar_row, TileType::Candle);
        self.set(21, altar_row, TileType::Candle);
        self.set(17, altar_row, TileType::Podium);

        for y in PEW_ROWS {
            for x in LEFT_PEWS.into_iter().chain(RIGHT_PEWS) {
                self.seat(x, y, format!("pew_{y}_{x}"));
                self.maybe_spawn_npc(x, y);
            }
        }
    }

    fn reception(&mut self) {
        self.room(BUILDING_LEFT, DIVIDER_ROW, BUILDING_RIGHT, BUILDING_BOTTOM, TileType::Floor);
        self.fill(BUILDING_LEFT + 1, DIVIDER_ROW, BUILDING_RIGHT - 1, DIVIDER_ROW, TileType::Wall);
        for x in [19, 20] {
            self.set(x, DIVIDER_ROW, TileType::Door);
            self.set(x, BUILDING_BOTTOM, TileType::Door);
        }
        self.set(18, BUILDING_BOTTOM, TileType::Candle);
        self.set(21, BUILDING_BOTTOM, TileType::Candle);
        self.set(BUILDING_LEFT, 20, TileType::Door);
        self.set(BUILDING_RIGHT, 20, TileType::Door);

        self.set(24, 20, TileType::Desk);
        self.set(25, 20, TileType::Desk);
        let greeting = Some("Applications here.");
        self.register(24, 21, "receptionist", InteractableKind::Receptionist, greeting);
        self.register(25, 21, "receptionist_alt", InteractableKind::Receptionist, greeting);

        self.set(15, DIVIDER_ROW, TileType::Wall);
        self.register(15, 18, "notice_board", InteractableKind::NoticeBoard, Some("History"));

        self.seat(12, 19, "wait_19_12".to_string());
        self.seat(12, 21, "wait_21_12".to_string());

        self.set(11, 23, TileType::Flower);
        self.set(28, 23, TileType::Flower);
        self.set(11, 18, TileType::Candle);
        self.set(28, 18, TileType::Candle);
    }

    fn finish(self) -> Result<GameMap, MapError> {
        GameMap::new(
            MAP_WIDTH,
            MAP_HEIGHT,
            &self.tiles,
            self.interactables,
            self.npcs,
        )
    }
}

fn pick(rng: &mut SmallRng, palette: &[Rgba]) -> Rgba {
    palette.choose(rng).copied().unwrap_or(SKIN)
}

/// Builds the graveyard, chapel and reception layout. The layout is fixed;
/// only decoration and pew occupancy depend on `seed`.
pub(crate) fn generate_map(seed: u64) -> Result<GameMap, MapError> {
    let mut builder = MapBuilder::new(seed);
    builder.graveyard();
    builder.chapel();
    builder.reception();
    builder.finish()
}
