use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Context, Controller, ViewContext};
use crate::error::AuthError;
use crate::events::{Effect, Page};
use crate::theme::THEME;

pub struct PasswordController {
    secret: String,
    input: String,
}

impl PasswordController {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            input: String::new(),
        }
    }

    fn verify(&self) -> Result<(), AuthError> {
        if self.input == self.secret {
            Ok(())
        } else {
            Err(AuthError::WrongPassword)
        }
    }
}

impl Controller for PasswordController {
    fn page(&self) -> Page {
        Page::Password
    }

    async fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context<'_>) -> Effect {
        match key.code {
            KeyCode::Enter => match self.verify() {
                Ok(()) => {
                    self.input.clear();
                    tracing::info!("operator logged in");
                    Effect::Navigate(Page::Menu)
                }
                Err(e) => Effect::error(e),
            },
            KeyCode::Backspace => {
                self.input.pop();
                Effect::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                Effect::None
            }
            _ => Effect::None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _view: &ViewContext<'_>) {
        let width = area.width.min(50);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(3) / 2;
        let popup = Rect::new(x, y, width, area.height.min(3));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .title(" Enter password ")
            .style(Style::default().bg(THEME.surface));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let masked = "*".repeat(self.input.chars().count());
        frame.render_widget(
            Paragraph::new(Span::styled(masked, Style::default().fg(THEME.text))),
            inner,
        );

        let cursor_x = inner.x + self.input.chars().count() as u16;
        if cursor_x < inner.right() {
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}
