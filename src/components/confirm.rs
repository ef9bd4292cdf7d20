use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Context, Controller, ViewContext};
use crate::data::types::AirdropReceipt;
use crate::events::{Effect, Page};
use crate::state::SharedState;
use crate::theme::THEME;
use crate::utils;

/// Recipients shown before the list is cut off.
const PREVIEW_COUNT: usize = 5;

/// Review the airdrop, then set the URI and mint to every recipient.
pub struct ConfirmController;

impl ConfirmController {
    pub fn new() -> Self {
        Self
    }

    fn ready(state: &SharedState) -> bool {
        state.selected_contract.is_some() && !state.uploaded_addresses.is_empty()
    }

    async fn send(&self, ctx: &mut Context<'_>) -> Effect {
        let Some(contract) = ctx.state.selected_contract else {
            return Effect::error("no contract selected");
        };
        if ctx.state.uploaded_addresses.is_empty() {
            return Effect::error("no wallet addresses loaded");
        }

        let nft = &ctx.services.nft;
        let state = &*ctx.state;

        if let Err(e) = nft.set_uri(contract, &state.token_uri).await {
            return Effect::error(format!("failed to set URI: {e}"));
        }
        let tx_hash = match nft
            .mint_to_multiple(contract, &state.uploaded_addresses, &state.nft_id)
            .await
        {
            Ok(hash) => hash,
            Err(e) => return Effect::error(format!("failed to send NFTs: {e}")),
        };

        let recipients = state.uploaded_addresses.len();
        tracing::info!(
            "airdropped NFT {} to {recipients} wallets on {contract}, tx {tx_hash}",
            state.nft_id
        );
        ctx.state.last_airdrop = Some(AirdropReceipt {
            tx_hash,
            recipients,
            sent_at: Utc::now(),
        });
        Effect::success_then(format!("NFTs sent, tx {tx_hash}"), Page::Menu)
    }
}

impl Controller for ConfirmController {
    fn page(&self) -> Page {
        Page::Confirm
    }

    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        match key.code {
            KeyCode::Enter => self.send(ctx).await,
            KeyCode::Esc => Effect::Navigate(Page::Menu),
            _ => Effect::None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &ViewContext<'_>) {
        let state = view.state;
        let contract = state
            .selected_contract
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());

        let field = |label: &'static str, value: String, style: Style| {
            Line::from(vec![
                Span::styled(format!(" {label:<12}"), THEME.muted_style()),
                Span::styled(value, style),
            ])
        };
        let text_style = Style::default().fg(THEME.text);

        let mut lines = vec![
            field(
                "Recipients",
                state.uploaded_addresses.len().to_string(),
                THEME.accent_style(),
            ),
            field("Contract", contract, THEME.address_style()),
            field("NFT ID", state.nft_id.clone(), text_style),
            field("Token URI", state.token_uri.clone(), text_style),
            Line::from(""),
        ];

        for address in state.uploaded_addresses.iter().take(PREVIEW_COUNT) {
            lines.push(Line::from(Span::styled(
                format!("   {address}"),
                THEME.address_style(),
            )));
        }
        let hidden = state.uploaded_addresses.len().saturating_sub(PREVIEW_COUNT);
        if hidden > 0 {
            lines.push(Line::from(Span::styled(
                format!("   ... and {hidden} more"),
                THEME.muted_style(),
            )));
        }

        if let Some(ref receipt) = state.last_airdrop {
            lines.push(Line::from(""));
            lines.push(field(
                "Last airdrop",
                format!(
                    "{} to {} wallets at {}",
                    utils::truncate_hash(&receipt.tx_hash),
                    receipt.recipients,
                    utils::format_datetime(&receipt.sent_at)
                ),
                THEME.hash_style(),
            ));
        }

        lines.push(Line::from(""));
        let prompt = if Self::ready(state) {
            Span::styled(" Press Enter to send, Esc to cancel", THEME.accent_style())
        } else {
            Span::styled(
                " Select a contract and load addresses first",
                THEME.error_style(),
            )
        };
        lines.push(Line::from(prompt));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(" Confirm airdrop ")
                .borders(Borders::ALL)
                .border_style(THEME.border_focused_style()),
        );
        frame.render_widget(paragraph, area);
    }

    fn busy_label(&self, key: &KeyEvent, state: &SharedState) -> Option<&'static str> {
        (key.code == KeyCode::Enter && Self::ready(state)).then_some("Sending airdrop...")
    }
}
