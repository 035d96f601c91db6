//! Turns a read-only view of the session into draw commands: tiles,
//! characters, the ceremony props, speech bubbles and the HUD.

use std::time::Duration;

use engine::{
    line_advance, text_width_px, world_to_screen, Camera2D, RenderFrame, Rgba, TextAnchor, Vec2,
    Viewport,
};

use super::dialog::{ApplicationForm, Dialog, FormField, WardrobeRow, WardrobeState};
use super::director::{CeremonyDirector, DirectorPhase};
use super::funeral::FuneralBoard;
use super::movement::{Facing, Player};
use super::world::{
    hex, is_in_chapel, Appearance, GameMap, Interactable, InteractableKind, TileType, TILE_SIZE,
};

const CLEAR: Rgba = hex(0x0b0b12);
const BLACK: Rgba = hex(0x000000);
const WHITE: Rgba = hex(0xffffff);
const GOLD: Rgba = hex(0xe4b85d);
const GREY: Rgba = hex(0x9e9e9e);
const PANEL: Rgba = [16, 16, 24, 235];
const NIGHT: Rgba = [10, 10, 40, 60];

const HEARSE_X_TILE: f32 = 18.0;
const HEARSE_SIZE: Vec2 = Vec2::new(160.0, 80.0);
const COFFIN_SIZE: Vec2 = Vec2::new(96.0, 48.0);
const BEARER_SIZE: Vec2 = Vec2::new(32.0, 40.0);
const BEARER_OFFSETS: [Vec2; 4] = [
    Vec2::new(-24.0, -32.0),
    Vec2::new(88.0, -32.0),
    Vec2::new(-24.0, 32.0),
    Vec2::new(88.0, 32.0),
];
const BURIAL_SINK: Duration = Duration::from_millis(3000);

const BUBBLE_CHARS: usize = 28;
const TEXT_SCALE: i32 = 2;

fn tiles(count: f32) -> f32 {
    count * TILE_SIZE
}

fn altar_spot() -> Vec2 {
    Vec2::new(tiles(19.0), tiles(8.0) + 10.0)
}

fn priest_spot() -> Vec2 {
    Vec2::new(tiles(19.0), tiles(7.0))
}

fn receptionist_spot() -> Vec2 {
    Vec2::new(tiles(25.0), tiles(20.0) - 25.0)
}

/// Everything the drawing pass reads.
pub(crate) struct StageView<'a> {
    pub(crate) map: &'a GameMap,
    pub(crate) player: &'a Player,
    pub(crate) director: &'a CeremonyDirector,
    pub(crate) board: &'a FuneralBoard,
    pub(crate) dialog: Option<&'a Dialog>,
    pub(crate) notification: Option<&'a str>,
    pub(crate) nearest: Option<&'a Interactable>,
    pub(crate) zoom: f32,
    pub(crate) eulogies_in_flight: usize,
}

/// Where the ceremony props stand for the current phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CeremonyProps {
    pub(crate) hearse: Option<Vec2>,
    /// Origin of the coffin-sized block the four bearers surround.
    pub(crate) bearers: Option<Vec2>,
    pub(crate) coffin: Option<(Vec2, u8)>,
}

pub(crate) fn ceremony_props(director: &CeremonyDirector) -> CeremonyProps {
    let phase = director.phase();
    let t = director.phase_progress();
    let column = tiles(19.0);
    let lane = |from: f32, to: f32| Vec2::new(column, from).lerp(Vec2::new(column, to), t);

    let hearse_row = match phase {
        DirectorPhase::Idle => None,
        DirectorPhase::Arrival => Some(35.0 + (25.0 - 35.0) * t),
        DirectorPhase::HearseLeave => Some(25.0 + (35.0 - 25.0) * t),
        _ => Some(25.0),
    };
    let hearse = hearse_row.map(|row| Vec2::new(tiles(HEARSE_X_TILE), tiles(row)));

    let bearers = match phase {
        DirectorPhase::Procession => Some(lane(tiles(24.0), altar_spot().y)),
        DirectorPhase::BearersReturn => Some(lane(tiles(8.0), tiles(17.0))),
        DirectorPhase::Preaching
        | DirectorPhase::PreAmen
        | DirectorPhase::Amen
        | DirectorPhase::Burial => Some(Vec2::new(column, tiles(17.0))),
        DirectorPhase::BearersLeave => Some(lane(tiles(17.0), tiles(25.0))),
        _ => None,
    };

    let coffin = match phase {
        DirectorPhase::Procession => bearers.map(|at| (at, 255)),
        DirectorPhase::BearersReturn
        | DirectorPhase::Preaching
        | DirectorPhase::PreAmen
        | DirectorPhase::Amen => Some((altar_spot(), 255)),
        DirectorPhase::Burial => {
            let sunk = (director.phase_elapsed().as_secs_f32() / BURIAL_SINK.as_secs_f32()).min(1.0);
            let alpha = (255.0 * (1.0 - sunk)).round() as u8;
            Some((altar_spot() + Vec2::new(0.0, TILE_SIZE * sunk), alpha))
        }
        _ => None,
    };

    CeremonyProps {
        hearse,
        bearers,
        coffin,
    }
}

/// What the priest is saying, if anything.
pub(crate) fn priest_line(director: &CeremonyDirector) -> Option<String> {
    let name = &director.active_request()?.deceased_name;
    match director.phase() {
        DirectorPhase::Preaching => director
            .current_chunk()
            .map(|chunk| format!("{name}: {chunk}")),
        DirectorPhase::PreAmen => Some(format!("Rest in peace, {name}.")),
        DirectorPhase::Amen => Some("AMEN.".to_string()),
        DirectorPhase::Burial => Some("*Dirt Sounds*".to_string()),
        _ => None,
    }
}

/// Greedy word wrap; words longer than `max_chars` get a line of their own.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub(crate) fn draw_stage(frame: &mut RenderFrame, view: &StageView<'_>) {
    let mut camera = Camera2D {
        position: view.player.center(),
        ..Camera2D::default()
    };
    camera.set_zoom_clamped(view.zoom);
    frame.set_camera(camera);
    frame.set_clear_color(CLEAR);

    draw_tiles(frame, view.map, &camera);
    let props = ceremony_props(view.director);
    if let Some(hearse) = props.hearse {
        draw_hearse(frame, hearse);
    }
    draw_character(frame, receptionist_spot(), &receptionist_look(), Facing::Down);
    for npc in view.map.npcs() {
        draw_character(frame, npc.position, &npc.appearance, Facing::Up);
    }
    draw_character(frame, priest_spot(), &priest_look(), Facing::Down);
    if let Some((origin, alpha)) = props.coffin {
        draw_coffin(frame, origin, alpha);
    }
    if let Some(origin) = props.bearers {
        for offset in BEARER_OFFSETS {
            draw_bearer(frame, origin + offset);
        }
    }
    draw_character(
        frame,
        view.player.position,
        &view.player.appearance,
        view.player.facing,
    );
    draw_canopies(frame, view.map, &camera);

    let (width, height) = frame.window_size();
    frame.hud_rect(Vec2::ZERO, Vec2::new(width as f32, height as f32), NIGHT);

    let viewport = Viewport { width, height };
    draw_bubbles(frame, view, &camera, viewport);
    draw_hud(frame, view);
    if let Some(dialog) = view.dialog {
        draw_dialog(frame, dialog, view.board, &view.player.appearance);
    }
}

fn receptionist_look() -> Appearance {
    Appearance {
        hat: hex(0x333333),
        shirt: hex(0x5d4037),
        pants: hex(0x212121),
        has_hat: false,
        ..Appearance::default()
    }
}

fn priest_look() -> Appearance {
    Appearance {
        hat: hex(0x000000),
        shirt: hex(0x212121),
        pants: hex(0x212121),
        has_hat: true,
        ..Appearance::default()
    }
}

fn visible_cells(map: &GameMap, camera: &Camera2D, window: (u32, u32)) -> (u32, u32, u32, u32) {
    let zoom = camera.effective_zoom();
    let half = Vec2::new(window.0 as f32 / zoom / 2.0, window.1 as f32 / zoom / 2.0);
    let min = camera.position - half;
    let max = camera.position + half;
    let clamp = |value: f32, limit: u32| (value / TILE_SIZE).floor().clamp(0.0, limit as f32) as u32;
    (
        clamp(min.x, map.width() - 1),
        clamp(min.y, map.height() - 1),
        clamp(max.x, map.width() - 1),
        clamp(max.y, map.height() - 1),
    )
}

fn tile_color(tile: TileType) -> Rgba {
    match tile {
        TileType::Floor => hex(0x3e3a4a),
        TileType::Wall => hex(0x5d5470),
        TileType::Grass | TileType::Tombstone | TileType::Tree | TileType::Flower => hex(0x2e5c2e),
        TileType::Door => hex(0x6d4c41),
        TileType::Altar => hex(0xd7ccc8),
        TileType::Water => hex(0x1e5aa8),
        TileType::Chair | TileType::Bench | TileType::Podium | TileType::Candle => hex(0x3e3a4a),
        TileType::Carpet => hex(0x8b1a1a),
        TileType::Path => hex(0x8d7b68),
        TileType::Desk => hex(0x5d4037),
        TileType::Window => hex(0x4fc3f7),
    }
}

fn draw_tiles(frame: &mut RenderFrame, map: &GameMap, camera: &Camera2D) {
    let (x0, y0, x1, y1) = visible_cells(map, camera, frame.window_size());
    let cell = Vec2::new(TILE_SIZE, TILE_SIZE);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let Some(tile) = map.tile(x, y) else {
                continue;
            };
            let origin = Vec2::new(tiles(x as f32), tiles(y as f32));
            frame.world_rect(origin, cell, tile_color(tile));
            draw_tile_detail(frame, tile, origin);
        }
    }
}

fn draw_tile_detail(frame: &mut RenderFrame, tile: TileType, at: Vec2) {
    let rect = |frame: &mut RenderFrame, x: f32, y: f32, w: f32, h: f32, color: Rgba| {
        frame.world_rect(at + Vec2::new(x, y), Vec2::new(w, h), color);
    };
    match tile {
        TileType::Wall => rect(frame, 0.0, 40.0, 48.0, 8.0, hex(0x3f3850)),
        TileType::Tombstone => {
            rect(frame, 14.0, 10.0, 20.0, 30.0, hex(0x9e9e9e));
            rect(frame, 20.0, 16.0, 8.0, 2.0, hex(0x616161));
        }
        TileType::Tree => rect(frame, 20.0, 24.0, 8.0, 24.0, hex(0x5d4037)),
        TileType::Flower => {
            rect(frame, 12.0, 20.0, 6.0, 6.0, hex(0xf06292));
            rect(frame, 28.0, 28.0, 6.0, 6.0, hex(0xffeb3b));
        }
        TileType::Candle => {
            rect(frame, 20.0, 18.0, 8.0, 22.0, hex(0xfff8e1));
            rect(frame, 21.0, 10.0, 6.0, 8.0, hex(0xffa726));
        }
        TileType::Podium => rect(frame, 10.0, 12.0, 28.0, 36.0, hex(0x6d4c41)),
        TileType::Bench | TileType::Chair => {
            rect(frame, 4.0, 20.0, 40.0, 12.0, hex(0x6d4c41));
            rect(frame, 4.0, 8.0, 40.0, 6.0, hex(0x4e342e));
        }
        TileType::Desk => rect(frame, 0.0, 0.0, 48.0, 10.0, hex(0x795548)),
        TileType::Window => rect(frame, 6.0, 6.0, 36.0, 30.0, hex(0x81d4fa)),
        TileType::Door => rect(frame, 34.0, 22.0, 4.0, 4.0, GOLD),
        TileType::Altar => rect(frame, 0.0, 0.0, 48.0, 8.0, GOLD),
        _ => {}
    }
}

fn draw_canopies(frame: &mut RenderFrame, map: &GameMap, camera: &Camera2D) {
    let (x0, y0, x1, y1) = visible_cells(map, camera, frame.window_size());
    for y in y0..=y1 {
        for x in x0..=x1 {
            if map.tile(x, y) == Some(TileType::Tree) {
                let origin = Vec2::new(tiles(x as f32) - 6.0, tiles(y as f32) - 24.0);
                frame.world_rect(origin, Vec2::new(60.0, 50.0), hex(0x1b5e20));
            }
        }
    }
}

/// Body rectangles of a 48x48 character sprite, relative to its top-left.
fn character_parts(look: &Appearance, facing: Facing) -> Vec<(Vec2, Vec2, Rgba)> {
    let part = |x: f32, y: f32, w: f32, h: f32, color: Rgba| (Vec2::new(x, y), Vec2::new(w, h), color);
    let mut parts = vec![
        part(15.0, 34.0, 8.0, 12.0, look.pants),
        part(25.0, 34.0, 8.0, 12.0, look.pants),
        part(12.0, 20.0, 24.0, 15.0, look.shirt),
        part(14.0, 6.0, 20.0, 15.0, look.skin),
    ];
    if look.has_hat {
        parts.push(part(12.0, 2.0, 24.0, 6.0, look.hat));
    }
    match facing {
        Facing::Down => {
            parts.push(part(18.0, 12.0, 3.0, 3.0, BLACK));
            parts.push(part(27.0, 12.0, 3.0, 3.0, BLACK));
        }
        Facing::Left => parts.push(part(16.0, 12.0, 3.0, 3.0, BLACK)),
        Facing::Right => parts.push(part(29.0, 12.0, 3.0, 3.0, BLACK)),
        Facing::Up => {}
    }
    parts
}

fn draw_character(frame: &mut RenderFrame, at: Vec2, look: &Appearance, facing: Facing) {
    for (offset, size, color) in character_parts(look, facing) {
        frame.world_rect(at + offset, size, color);
    }
}

fn draw_character_preview(frame: &mut RenderFrame, at: Vec2, look: &Appearance, scale: f32) {
    for (offset, size, color) in character_parts(look, Facing::Down) {
        frame.hud_rect(at + offset * scale, size * scale, color);
    }
}

fn draw_hearse(frame: &mut RenderFrame, at: Vec2) {
    frame.world_rect(at, HEARSE_SIZE, hex(0x212121));
    frame.world_rect(at + Vec2::new(100.0, 8.0), Vec2::new(50.0, 24.0), hex(0x90a4ae));
    frame.world_rect(at + Vec2::new(20.0, 70.0), Vec2::new(28.0, 14.0), BLACK);
    frame.world_rect(at + Vec2::new(112.0, 70.0), Vec2::new(28.0, 14.0), BLACK);
    frame.world_outline(at, HEARSE_SIZE, GREY);
}

fn draw_coffin(frame: &mut RenderFrame, at: Vec2, alpha: u8) {
    if alpha == 0 {
        return;
    }
    frame.world_rect(at, COFFIN_SIZE, [93, 64, 55, alpha]);
    frame.world_rect(
        at + Vec2::new(44.0, 8.0),
        Vec2::new(8.0, 32.0),
        [GOLD[0], GOLD[1], GOLD[2], alpha],
    );
}

fn draw_bearer(frame: &mut RenderFrame, at: Vec2) {
    frame.world_rect(at + Vec2::new(0.0, 16.0), BEARER_SIZE - Vec2::new(0.0, 16.0), hex(0x212121));
    frame.world_rect(at + Vec2::new(8.0, 0.0), Vec2::new(16.0, 16.0), hex(0xffdbac));
}

fn draw_bubble(frame: &mut RenderFrame, anchor: (i32, i32), text: &str, highlight: bool) {
    let lines = wrap_text(text, BUBBLE_CHARS);
    if lines.is_empty() {
        return;
    }
    let line_height = line_advance(TEXT_SCALE) as f32;
    let widest = lines
        .iter()
        .map(|line| text_width_px(line, TEXT_SCALE))
        .max()
        .unwrap_or(0) as f32;
    let size = Vec2::new(widest + 12.0, lines.len() as f32 * line_height + 10.0);
    let origin = Vec2::new(anchor.0 as f32 - size.x / 2.0, anchor.1 as f32 - size.y - 6.0);
    frame.hud_rect(origin, size, if highlight { GOLD } else { WHITE });
    frame.hud_outline(origin, size, BLACK);
    for (row, line) in lines.iter().enumerate() {
        let at = Vec2::new(anchor.0 as f32, origin.y + 6.0 + row as f32 * line_height);
        frame.hud_text(at, TextAnchor::TopCenter, line, BLACK, TEXT_SCALE);
    }
}

fn above(spot: Vec2, camera: &Camera2D, viewport: Viewport) -> (i32, i32) {
    world_to_screen(spot + Vec2::new(TILE_SIZE / 2.0, 0.0), camera, viewport)
}

fn draw_bubbles(frame: &mut RenderFrame, view: &StageView<'_>, camera: &Camera2D, viewport: Viewport) {
    if let Some(line) = priest_line(view.director) {
        draw_bubble(frame, above(priest_spot(), camera, viewport), &line, false);
    }

    if view.director.phase() == DirectorPhase::Amen {
        for npc in view.map.npcs() {
            if is_in_chapel(npc.position) {
                draw_bubble(frame, above(npc.position, camera, viewport), "amen", false);
            }
        }
    }

    let player_chants =
        view.director.phase() == DirectorPhase::Amen && is_in_chapel(view.player.position);
    let player_label = if player_chants { "AMEN" } else { "You" };
    let (px, py) = above(view.player.position, camera, viewport);
    frame.hud_text(
        Vec2::new(px as f32, py as f32 - 14.0),
        TextAnchor::TopCenter,
        player_label,
        if player_chants { GOLD } else { WHITE },
        TEXT_SCALE,
    );

    if view.dialog.is_some() {
        return;
    }
    if let Some(target) = view.nearest {
        if target.kind == InteractableKind::Receptionist {
            draw_bubble(frame, above(receptionist_spot(), camera, viewport), "How can I help?", false);
        }
        draw_bubble(frame, above(target.cell.origin(), camera, viewport), "[F]", true);
    }
}

fn draw_hud(frame: &mut RenderFrame, view: &StageView<'_>) {
    let (width, height) = frame.window_size();
    let (width, height) = (width as f32, height as f32);

    frame.hud_rect(Vec2::new(8.0, 8.0), Vec2::new(300.0, 52.0), PANEL);
    frame.hud_text(Vec2::new(16.0, 14.0), TextAnchor::TopLeft, "CYBERRIP", GOLD, 3);
    let mut queue_line = format!("{} in Queue", view.board.queue_len());
    if view.eulogies_in_flight > 0 {
        queue_line.push_str(&format!(" ({} writing)", view.eulogies_in_flight));
    }
    frame.hud_text(Vec2::new(16.0, 40.0), TextAnchor::TopLeft, &queue_line, WHITE, TEXT_SCALE);

    let chapel = match view.director.active_request() {
        Some(request) => format!("In Chapel: {}", request.deceased_name),
        None => "Chapel is empty...".to_string(),
    };
    frame.hud_text(Vec2::new(width / 2.0, 14.0), TextAnchor::TopCenter, &chapel, WHITE, TEXT_SCALE);

    let controls = format!(
        "WASD: Move  F: Interact  C: Wardrobe  Z: Zoom: {:.2}x",
        view.zoom
    );
    frame.hud_text(
        Vec2::new(12.0, height - 22.0),
        TextAnchor::TopLeft,
        &controls,
        GREY,
        TEXT_SCALE,
    );

    if let Some(text) = view.notification {
        let size = Vec2::new(text_width_px(text, TEXT_SCALE) as f32 + 24.0, 30.0);
        let origin = Vec2::new((width - size.x) / 2.0, height - 90.0);
        frame.hud_rect(origin, size, PANEL);
        frame.hud_outline(origin, size, GOLD);
        frame.hud_text(
            Vec2::new(width / 2.0, origin.y + 8.0),
            TextAnchor::TopCenter,
            text,
            WHITE,
            TEXT_SCALE,
        );
    }
}

struct Panel {
    origin: Vec2,
    size: Vec2,
    cursor_y: f32,
}

impl Panel {
    fn open(frame: &mut RenderFrame, title: &str, size: Vec2) -> Self {
        let (width, height) = frame.window_size();
        let origin = Vec2::new(
            (width as f32 - size.x) / 2.0,
            (height as f32 - size.y) / 2.0,
        );
        frame.hud_rect(origin, size, PANEL);
        frame.hud_outline(origin, size, GOLD);
        frame.hud_text(
            Vec2::new(origin.x + size.x / 2.0, origin.y + 16.0),
            TextAnchor::TopCenter,
            title,
            GOLD,
            3,
        );
        Self {
            origin,
            size,
            cursor_y: origin.y + 56.0,
        }
    }

    fn line(&mut self, frame: &mut RenderFrame, text: &str, color: Rgba) {
        frame.hud_text(
            Vec2::new(self.origin.x + 20.0, self.cursor_y),
            TextAnchor::TopLeft,
            text,
            color,
            TEXT_SCALE,
        );
        self.cursor_y += line_advance(TEXT_SCALE) as f32 + 4.0;
    }

    fn centered(&mut self, frame: &mut RenderFrame, text: &str, color: Rgba) {
        frame.hud_text(
            Vec2::new(self.origin.x + self.size.x / 2.0, self.cursor_y),
            TextAnchor::TopCenter,
            text,
            color,
            TEXT_SCALE,
        );
        self.cursor_y += line_advance(TEXT_SCALE) as f32 + 4.0;
    }

    fn gap(&mut self) {
        self.cursor_y += 10.0;
    }
}

fn draw_dialog(frame: &mut RenderFrame, dialog: &Dialog, board: &FuneralBoard, look: &Appearance) {
    match dialog {
        Dialog::Intro => draw_intro(frame, dialog.title()),
        Dialog::Application(form) => draw_application(frame, dialog.title(), form),
        Dialog::NoticeBoard => draw_notice_board(frame, dialog.title(), board),
        Dialog::Wardrobe(state) => draw_wardrobe(frame, dialog.title(), state, look),
    }
}

fn draw_intro(frame: &mut RenderFrame, title: &str) {
    let mut panel = Panel::open(frame, title, Vec2::new(560.0, 300.0));
    panel.centered(frame, "The 8-Bit Funeral Home", GREY);
    panel.gap();
    panel.centered(frame, "Welcome, Director.", WHITE);
    panel.gap();
    panel.line(frame, "Take applications at the reception desk.", WHITE);
    panel.line(frame, "Check the notice board for the schedule.", WHITE);
    panel.line(frame, "Take a seat in the chapel and pay respects.", WHITE);
    panel.gap();
    panel.centered(frame, "[ENTER] ENTER CHAPEL", GOLD);
}

fn draw_application(frame: &mut RenderFrame, title: &str, form: &ApplicationForm) {
    let mut panel = Panel::open(frame, title, Vec2::new(560.0, 260.0));
    let fields = [
        (FormField::Name, "Name of the Deceased", &form.name),
        (FormField::Cause, "Cause of Death", &form.cause),
    ];
    for (field, label, value) in fields {
        let focused = form.focus == field;
        panel.line(frame, label, GREY);
        let caret = if focused { "_" } else { "" };
        panel.line(frame, &format!("> {value}{caret}"), if focused { GOLD } else { WHITE });
        panel.gap();
    }
    panel.centered(frame, "[TAB] Next  [ENTER] Submit  [ESC] Close", GREY);
}

fn draw_notice_board(frame: &mut RenderFrame, title: &str, board: &FuneralBoard) {
    let mut panel = Panel::open(frame, title, Vec2::new(640.0, 460.0));
    panel.line(frame, "Upcoming", GOLD);
    if board.queue_len() == 0 {
        panel.line(frame, "  No funerals scheduled.", GREY);
    }
    for request in board.queue().take(6) {
        panel.line(
            frame,
            &format!("  {} - {}", request.deceased_name, request.cause_of_death),
            WHITE,
        );
    }
    panel.gap();
    panel.line(frame, "Recently Departed", GOLD);
    if board.history_len() == 0 {
        panel.line(frame, "  Nobody yet.", GREY);
    }
    for request in board.history().take(6) {
        panel.line(
            frame,
            &format!("  {} - {}", request.deceased_name, request.cause_of_death),
            WHITE,
        );
    }
    panel.gap();
    panel.centered(frame, "[ENTER] Close", GREY);
}

fn draw_wardrobe(frame: &mut RenderFrame, title: &str, state: &WardrobeState, look: &Appearance) {
    let mut panel = Panel::open(frame, title, Vec2::new(420.0, 300.0));
    for row in WardrobeRow::ALL {
        let selected = state.row == row;
        let value = match row {
            WardrobeRow::Shirt => color_label(look.shirt),
            WardrobeRow::Pants => color_label(look.pants),
            WardrobeRow::Hat => color_label(look.hat),
            WardrobeRow::WearHat => (if look.has_hat { "Yes" } else { "No" }).to_string(),
        };
        let marker = if selected { ">" } else { " " };
        panel.line(
            frame,
            &format!("{marker} {:<9} < {value} >", row.label()),
            if selected { GOLD } else { WHITE },
        );
    }
    draw_character_preview(
        frame,
        Vec2::new(panel.origin.x + panel.size.x - 120.0, panel.origin.y + 60.0),
        look,
        2.0,
    );
    panel.gap();
    panel.centered(frame, "[UP/DOWN] Pick  [LEFT/RIGHT] Change", GREY);
    panel.centered(frame, "[ENTER] Done", GREY);
}

fn color_label(color: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
