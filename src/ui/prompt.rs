use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Palette;
use crate::input::PromptInput;
use crate::ui::menu::centered_popup;

const MAX_NAME_CHARS: usize = 16;

/// What the prompt wants after an edit.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PromptState {
    Editing,
    /// The player confirmed; empty text means no name.
    Submitted(Option<String>),
    Cancelled,
}

/// Single-line "name your snake" text field.
#[derive(Debug, Clone, Default)]
pub struct NamePrompt {
    text: String,
}

impl NamePrompt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one edit and reports whether the prompt is finished.
    pub fn apply(&mut self, input: PromptInput) -> PromptState {
        match input {
            PromptInput::Char(c) => {
                if self.text.chars().count() < MAX_NAME_CHARS {
                    self.text.push(c);
                }
                PromptState::Editing
            }
            PromptInput::Backspace => {
                let _ = self.text.pop();
                PromptState::Editing
            }
            PromptInput::Submit => {
                let name = self.text.trim();
                PromptState::Submitted((!name.is_empty()).then(|| name.to_owned()))
            }
            PromptInput::Cancel => PromptState::Cancelled,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Draws the name prompt as a centered popup.
pub fn render_name_prompt(frame: &mut Frame<'_>, area: Rect, prompt: &NamePrompt, palette: &Palette) {
    let popup = centered_popup(area, 80, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("What's the name of your snake?"),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                prompt.text().to_owned(),
                Style::default()
                    .fg(palette.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(""),
        Line::styled(
            "[Enter] OK  [Esc] Skip",
            Style::default().fg(palette.menu_footer),
        ),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" player ")),
        popup,
    );
}
