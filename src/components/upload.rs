use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Context, Controller, ViewContext};
use crate::data::addresses;
use crate::events::{Effect, Page};
use crate::theme::THEME;

/// Load the recipient list from the configured address file.
pub struct UploadController {
    last_error: Option<String>,
}

impl UploadController {
    pub fn new() -> Self {
        Self { last_error: None }
    }
}

impl Controller for UploadController {
    fn page(&self) -> Page {
        Page::Upload
    }

    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        match key.code {
            KeyCode::Enter => {
                let path = &ctx.services.addresses_path;
                match addresses::parse_wallet_addresses(path) {
                    Ok(list) => {
                        let count = list.len();
                        tracing::info!("loaded {count} wallet addresses from {}", path.display());
                        ctx.state.uploaded_addresses = list;
                        self.last_error = None;
                        Effect::success_then(
                            format!("loaded {count} wallet addresses"),
                            Page::Confirm,
                        )
                    }
                    Err(e) => {
                        let message = e.to_string();
                        self.last_error = Some(message.clone());
                        Effect::ShowError(message)
                    }
                }
            }
            KeyCode::Esc => Effect::Navigate(Page::Airdrop),
            _ => Effect::None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &ViewContext<'_>) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(" File:      ", THEME.muted_style()),
                Span::styled(
                    view.services.addresses_path.display().to_string(),
                    Style::default().fg(THEME.text),
                ),
            ]),
            Line::from(vec![
                Span::styled(" Loaded:    ", THEME.muted_style()),
                Span::styled(
                    view.state.uploaded_addresses.len().to_string(),
                    THEME.accent_style(),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                " One address per line, 0x followed by 40 hex digits. Press Enter to load.",
                THEME.muted_style(),
            )),
        ];
        if let Some(ref err) = self.last_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {err}"),
                THEME.error_style(),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Wallet addresses ")
                .borders(Borders::ALL)
                .border_style(THEME.border_focused_style()),
        );
        frame.render_widget(paragraph, area);
    }
}
