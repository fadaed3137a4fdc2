use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::{Palette, SCORE_HISTORY_LEN};
use crate::score::{ScoreEntry, format_score};

/// Values shown on the score row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub score: i32,
    pub high_score: i32,
    pub length: usize,
}

/// Draws the `Length | Score | Hi` row below the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo, palette: &Palette) {
    frame.render_widget(
        Paragraph::new(score_line(info, palette)).alignment(Alignment::Right),
        area,
    );
}

fn score_line(info: HudInfo, palette: &Palette) -> Line<'static> {
    let label = Style::default().fg(palette.hud_label);
    let value = Style::default().fg(palette.hud_score);
    let score_style = if info.score > info.high_score {
        value.fg(palette.menu_title).add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::styled("Length ", label),
        Span::styled(info.length.to_string(), value),
        Span::styled(" │ Score ", label),
        Span::styled(format_score(info.score), score_style),
        Span::styled(" │ Hi ", label),
        Span::styled(format_score(info.high_score), value),
    ])
}

/// Draws the ranked list of the last best scores.
pub fn render_scoreboard(
    frame: &mut Frame<'_>,
    area: Rect,
    history: &[ScoreEntry],
    palette: &Palette,
) {
    let block = Block::bordered()
        .title(" last scores ")
        .border_style(Style::default().fg(palette.hud_label));
    let inner_width = usize::from(block.inner(area).width);

    let lines: Vec<Line<'_>> = if history.is_empty() {
        vec![Line::styled("no games yet", Style::default().fg(palette.hud_label))]
    } else {
        history
            .iter()
            .take(SCORE_HISTORY_LEN)
            .enumerate()
            .map(|(rank, entry)| scoreboard_row(rank + 1, entry, inner_width, palette))
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn scoreboard_row(
    rank: usize,
    entry: &ScoreEntry,
    width: usize,
    palette: &Palette,
) -> Line<'static> {
    let rank_text = format!("{rank:>2}. ");
    let value_text = format!(" {}", entry.value);
    let name_width = width
        .saturating_sub(rank_text.width())
        .saturating_sub(value_text.width());
    let name = fit_to_width(&entry.name, name_width);

    Line::from(vec![
        Span::styled(rank_text, Style::default().fg(palette.hud_label)),
        Span::styled(name, Style::default().fg(palette.hud_score)),
        Span::styled(value_text, Style::default().fg(palette.menu_title)),
    ])
}

/// Truncates or pads `text` to exactly `width` terminal columns.
fn fit_to_width(text: &str, width: usize) -> String {
    let mut fitted = String::new();
    let mut used = 0;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        fitted.push(c);
        used += w;
    }

    fitted.extend(std::iter::repeat_n(' ', width - used));
    fitted
}
