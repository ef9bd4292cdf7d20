use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Context, Controller, ViewContext};
use crate::events::{Effect, Page};
use crate::theme::THEME;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NftId,
    Uri,
}

/// Collect the token id and the URI to set before minting.
pub struct AirdropController {
    phase: Phase,
    nft_id: String,
    uri: String,
}

impl AirdropController {
    pub fn new() -> Self {
        Self {
            phase: Phase::NftId,
            nft_id: String::new(),
            uri: String::new(),
        }
    }

    fn handle_nft_id(&mut self, key: KeyEvent) -> Effect {
        match key.code {
            // length is checked on Enter so an over-long id is rejected, not cut
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.nft_id.push(c);
                Effect::None
            }
            KeyCode::Backspace => {
                self.nft_id.pop();
                Effect::None
            }
            KeyCode::Enter => match utils::validate_nft_id(&self.nft_id) {
                Ok(()) => {
                    self.phase = Phase::Uri;
                    Effect::None
                }
                Err(e) => Effect::error(e),
            },
            KeyCode::Esc => Effect::Navigate(Page::Menu),
            _ => Effect::None,
        }
    }

    fn handle_uri(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.uri.push(c);
                Effect::None
            }
            KeyCode::Backspace => {
                self.uri.pop();
                Effect::None
            }
            KeyCode::Enter => {
                if let Err(e) = utils::validate_url(&self.uri) {
                    return Effect::error(e);
                }
                ctx.state.nft_id = self.nft_id.clone();
                ctx.state.token_uri = self.uri.clone();
                // re-entry starts over at the id with both values prefilled
                self.phase = Phase::NftId;
                Effect::Navigate(Page::Upload)
            }
            KeyCode::Esc => {
                self.uri.clear();
                self.phase = Phase::NftId;
                Effect::None
            }
            _ => Effect::None,
        }
    }
}

impl Controller for AirdropController {
    fn page(&self) -> Page {
        Page::Airdrop
    }

    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        match self.phase {
            Phase::NftId => self.handle_nft_id(key),
            Phase::Uri => self.handle_uri(key, ctx),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &ViewContext<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let contract = view
            .state
            .selected_contract
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        let summary = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(" Contract:    ", THEME.muted_style()),
                Span::styled(contract, THEME.address_style()),
            ]),
            Line::from(vec![
                Span::styled(" Current URI: ", THEME.muted_style()),
                Span::styled(
                    view.state.current_token_uri.as_str(),
                    Style::default().fg(THEME.text),
                ),
            ]),
        ]);
        frame.render_widget(summary, chunks[0]);

        let fields = [
            (Phase::NftId, " NFT ID ", chunks[1], self.nft_id.as_str()),
            (Phase::Uri, " Token URI ", chunks[2], self.uri.as_str()),
        ];
        for (phase, title, rect, value) in fields {
            let focused = phase == self.phase;
            let border = if focused {
                THEME.border_focused_style()
            } else {
                THEME.border_style()
            };
            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border);
            let inner = block.inner(rect);
            frame.render_widget(Paragraph::new(value).block(block), rect);

            let cursor_x = inner.x + value.chars().count() as u16;
            if focused && cursor_x < inner.right() {
                frame.set_cursor_position((cursor_x, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Harness;

    #[tokio::test]
    async fn test_id_then_esc_clears_uri() {
        let mut h = Harness::new();
        let mut c = AirdropController::new();

        h.type_str(&mut c, "12").await;
        assert_eq!(h.press(&mut c, KeyCode::Enter).await, Effect::None);
        assert_eq!(c.phase, Phase::Uri);

        h.type_str(&mut c, "https://x").await;
        assert_eq!(h.press(&mut c, KeyCode::Esc).await, Effect::None);
        assert_eq!(c.phase, Phase::NftId);
        assert_eq!(c.nft_id, "12");
        assert!(c.uri.is_empty());
    }

    #[tokio::test]
    async fn test_id_accepts_digits_only() {
        let mut h = Harness::new();
        let mut c = AirdropController::new();
        h.type_str(&mut c, "1a2-3").await;
        assert_eq!(c.nft_id, "123");
        h.type_str(&mut c, "45678901234").await;
        assert_eq!(c.nft_id, "12345678901234");
    }

    #[tokio::test]
    async fn test_too_long_id_rejected_on_enter() {
        let mut h = Harness::new();
        let mut c = AirdropController::new();
        h.type_str(&mut c, "12345678901").await;
        assert_eq!(c.nft_id.len(), utils::MAX_NFT_ID_LENGTH + 1);

        assert_eq!(
            h.press(&mut c, KeyCode::Enter).await,
            Effect::ShowError("NFT ID is too long (max 10 digits)".to_string())
        );
        assert_eq!(c.phase, Phase::NftId);
        assert!(h.state.nft_id.is_empty());

        h.press(&mut c, KeyCode::Backspace).await;
        assert_eq!(h.press(&mut c, KeyCode::Enter).await, Effect::None);
        assert_eq!(c.phase, Phase::Uri);
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let mut h = Harness::new();
        let mut c = AirdropController::new();
        assert_eq!(
            h.press(&mut c, KeyCode::Enter).await,
            Effect::ShowError("NFT ID cannot be empty".to_string())
        );
        assert_eq!(c.phase, Phase::NftId);
        assert_eq!(h.press(&mut c, KeyCode::Esc).await, Effect::Navigate(Page::Menu));
    }

    #[tokio::test]
    async fn test_invalid_uri_rejected() {
        let mut h = Harness::new();
        let mut c = AirdropController::new();
        h.type_str(&mut c, "12").await;
        h.press(&mut c, KeyCode::Enter).await;
        h.type_str(&mut c, "not-a-url").await;

        assert_eq!(
            h.press(&mut c, KeyCode::Enter).await,
            Effect::ShowError("invalid URL format".to_string())
        );
        assert_eq!(c.phase, Phase::Uri);
        assert!(h.state.token_uri.is_empty());
    }

    #[tokio::test]
    async fn test_valid_input_stored() {
        let mut h = Harness::new();
        let mut c = AirdropController::new();
        h.type_str(&mut c, "7").await;
        h.press(&mut c, KeyCode::Enter).await;
        h.type_str(&mut c, "https://meta.example/7.json").await;

        assert_eq!(h.press(&mut c, KeyCode::Enter).await, Effect::Navigate(Page::Upload));
        assert_eq!(h.state.nft_id, "7");
        assert_eq!(h.state.token_uri, "https://meta.example/7.json");
    }

    #[tokio::test]
    async fn test_render_shows_fields() {
        let mut h = Harness::new();
        h.state.current_token_uri = "https://old.example".to_string();
        let mut c = AirdropController::new();
        h.type_str(&mut c, "42").await;
        let text = h.render(&mut c);
        assert!(text.contains("https://old.example"));
        assert!(text.contains("42"));
    }
}
