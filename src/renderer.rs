use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::board::{self, Cell};
use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_CELL, GLYPH_FOOD, GLYPH_SPECIAL_ITEM, GRID_SIZE, PALETTE,
    Palette,
};
use crate::game::RenderFrame;
use crate::score::ScoreEntry;
use crate::spawner::SpecialKind;
use crate::ui::hud::{HudInfo, render_hud, render_scoreboard};
use crate::ui::menu::{SessionSummary, render_game_over_menu, render_start_menu};
use crate::ui::prompt::{NamePrompt, render_name_prompt};

const SCOREBOARD_WIDTH: u16 = 26;

/// Which popup, if any, sits on top of the board.
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    None,
    Start,
    NamePrompt(&'a NamePrompt),
    GameOver(&'a SessionSummary),
}

/// Front-end state that is not part of the game session.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub frame: &'a RenderFrame,
    pub high_score: i32,
    pub history: &'a [ScoreEntry],
    pub overlay: Overlay<'a>,
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, scene: Scene<'_>) {
    let palette = &PALETTE;
    let board_width = u16::try_from(GRID_SIZE).unwrap_or(u16::MAX) * CELL_WIDTH + 2;
    let board_height = u16::try_from(GRID_SIZE).unwrap_or(u16::MAX) + 2;

    let [column] = Layout::horizontal([Constraint::Length(board_width + SCOREBOARD_WIDTH)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [board_row, hud_row] =
        Layout::vertical([Constraint::Length(board_height), Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(column);
    let [play_area, scoreboard_area] = Layout::horizontal([
        Constraint::Length(board_width),
        Constraint::Length(SCOREBOARD_WIDTH),
    ])
    .areas(board_row);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(palette.border_fg).bg(palette.border_bg))
        .style(Style::new().bg(palette.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    if scene.frame.running {
        render_cell(frame, inner, scene.frame.food, GLYPH_FOOD, Style::new().fg(palette.food));
    }
    if let Some(item) = scene.frame.special_item {
        let color = match item.kind {
            SpecialKind::Growth => palette.growth_item,
            SpecialKind::Shrink => palette.shrink_item,
        };
        render_cell(frame, inner, item.position, GLYPH_SPECIAL_ITEM, Style::new().fg(color));
    }
    render_snake(frame, inner, &scene.frame.snake, palette);

    render_scoreboard(frame, scoreboard_area, scene.history, palette);
    render_hud(
        frame,
        hud_row,
        HudInfo {
            score: scene.frame.score,
            high_score: scene.high_score,
            length: scene.frame.snake.len(),
        },
        palette,
    );

    match scene.overlay {
        Overlay::None => {}
        Overlay::Start => render_start_menu(frame, play_area, scene.high_score, palette),
        Overlay::NamePrompt(prompt) => render_name_prompt(frame, play_area, prompt, palette),
        Overlay::GameOver(summary) => {
            render_game_over_menu(frame, play_area, summary, scene.high_score);
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snake: &[Cell], palette: &Palette) {
    let last = snake.len().saturating_sub(1);

    // Tail first so the head wins where stacked segments overlap.
    for (index, segment) in snake.iter().enumerate().rev() {
        let style = if index == 0 {
            Style::new()
                .fg(palette.snake_head)
                .add_modifier(Modifier::BOLD)
        } else if index == last {
            Style::new().fg(palette.snake_tail)
        } else {
            Style::new().fg(palette.snake_body)
        };
        render_cell(frame, inner, *segment, GLYPH_CELL, style);
    }
}

fn render_cell(frame: &mut Frame<'_>, inner: Rect, cell: Cell, glyph: &str, style: Style) {
    let Some((x, y)) = cell_to_terminal(inner, cell) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

/// Maps a 1-indexed board cell to the terminal position of its left column.
fn cell_to_terminal(inner: Rect, cell: Cell) -> Option<(u16, u16)> {
    if !board::is_in_bounds(cell) {
        return None;
    }

    let column = u16::try_from(cell.x - 1).ok()?;
    let row = u16::try_from(cell.y - 1).ok()?;

    let x = inner.x.saturating_add(column.saturating_mul(CELL_WIDTH));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
