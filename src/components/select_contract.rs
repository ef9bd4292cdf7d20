use alloy::primitives::Address;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Context, Controller, ViewContext};
use crate::events::{Effect, Page};
use crate::theme::THEME;
use crate::utils;

/// Choose which deployed contract the airdrop targets.
pub struct SelectContractController {
    list_state: ListState,
}

impl SelectContractController {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }
}

impl Controller for SelectContractController {
    fn page(&self) -> Page {
        Page::SelectContract
    }

    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        let len = ctx.state.deployed.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *ctx.cursor = utils::step_cursor(*ctx.cursor, -1, len);
                Effect::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *ctx.cursor = utils::step_cursor(*ctx.cursor, 1, len);
                Effect::None
            }
            KeyCode::Enter => {
                if let Some(err) = &ctx.state.registry_error {
                    return Effect::error(err);
                }
                let Some(record) = ctx.state.deployed.get(*ctx.cursor) else {
                    return Effect::error("no deployed contracts, deploy one first");
                };
                let address = match record.address.parse::<Address>() {
                    Ok(address) => address,
                    Err(e) => {
                        return Effect::error(format!(
                            "registry holds an invalid address {}: {e}",
                            record.address
                        ));
                    }
                };
                let token_uri = record.token_uri.clone();
                tracing::info!("selected contract {address} (URI {token_uri})");

                ctx.state.selected_contract = Some(address);
                ctx.state.current_token_uri = token_uri;
                Effect::Navigate(Page::Airdrop)
            }
            KeyCode::Esc => Effect::Navigate(Page::Menu),
            _ => Effect::None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &ViewContext<'_>) {
        let block = Block::default()
            .title(" Select a contract ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());

        if let Some(err) = &view.state.registry_error {
            let failed = Paragraph::new(Span::styled(err.as_str(), THEME.error_style()))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(failed, area);
            return;
        }
        if view.state.deployed.is_empty() {
            let empty = Paragraph::new(Span::styled("No deployed contracts", THEME.muted_style()))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = view
            .state
            .deployed
            .iter()
            .map(|record| {
                let choice = record.choice();
                ListItem::new(Line::from(vec![
                    Span::styled(choice.address, THEME.address_style()),
                    Span::styled(format!("  {}", choice.deploy_time), THEME.muted_style()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");

        self.list_state.select(Some(view.cursor));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
