use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

/// Side length of the square board, in cells.
pub const GRID_SIZE: i32 = 20;

/// Movement interval at the start of every session, in milliseconds.
pub const INITIAL_TICK_INTERVAL_MS: u64 = 200;

/// Fastest movement interval the speed curve can reach.
pub const MIN_TICK_INTERVAL_MS: u64 = 25;

/// Period of the food relocation trigger.
pub const FOOD_RELOCATE_INTERVAL_MS: u64 = 5_000;

/// Period of the special item generation trigger.
pub const SPECIAL_ITEM_INTERVAL_MS: u64 = 5_000;

/// How long an uneaten special item stays on the board.
pub const SPECIAL_ITEM_LIFETIME_MS: u64 = 3_000;

/// Number of entries kept in the persisted score history.
pub const SCORE_HISTORY_LEN: usize = 10;

/// Name recorded when the player declines to give one.
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Rejection-sampling attempts before the spawner enumerates free cells.
pub const SPAWN_SAMPLE_ATTEMPTS: usize = 64;

/// Returns the movement interval after one food has been eaten at `current`.
#[must_use]
pub fn next_tick_interval(current: u64) -> u64 {
    let decrement = match current {
        151.. => 5,
        101..=150 => 3,
        51..=100 => 2,
        26..=50 => 1,
        _ => 0,
    };
    current.saturating_sub(decrement).max(MIN_TICK_INTERVAL_MS)
}

/// Colors used by the terminal front-end.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    /// Growth items are drawn gold.
    pub growth_item: Color,
    /// Shrink items are drawn purple.
    pub shrink_item: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_score: Color,
    pub hud_label: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    growth_item: Color::Yellow,
    shrink_item: Color::Magenta,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_score: Color::White,
    hud_label: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Terminal columns used to draw one board cell.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_CELL: &str = "██";
pub const GLYPH_FOOD: &str = "◖◗";
pub const GLYPH_SPECIAL_ITEM: &str = "◆◆";

/// Delay between input polls in the front-end loop.
pub const FRAME_POLL_MS: u64 = 16;

/// Most wall-clock time a single front-end frame feeds into the session.
pub const MAX_FRAME_ADVANCE_MS: u64 = 250;

/// Caps the elapsed time of one frame so a stalled terminal (suspend, slow
/// redraw) resumes where it left off instead of replaying a burst of moves.
#[must_use]
pub fn clamp_frame_advance(elapsed: Duration) -> Duration {
    elapsed.min(Duration::from_millis(MAX_FRAME_ADVANCE_MS))
}
