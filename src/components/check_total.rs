use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Context, Controller, ViewContext};
use crate::data::types::DeployedContract;
use crate::events::{Effect, Page};
use crate::theme::THEME;
use crate::utils;

/// Read-only table of every contract in the registry.
pub struct CheckTotalController {
    table_state: TableState,
}

impl CheckTotalController {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
        }
    }
}

fn build_rows(contracts: &[DeployedContract]) -> Vec<Row<'static>> {
    contracts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)).style(THEME.accent_style()),
                Cell::from(c.address.clone()).style(THEME.address_style()),
                Cell::from(c.token_uri.clone()),
                Cell::from(utils::format_rfc3339(&c.deploy_time)).style(THEME.muted_style()),
            ])
        })
        .collect()
}

impl Controller for CheckTotalController {
    fn page(&self) -> Page {
        Page::CheckTotal
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
            KeyCode::Enter => match &ctx.state.registry_error {
                Some(err) => Effect::error(err),
                None if len == 0 => Effect::error("no deployed contracts"),
                None => Effect::None,
            },
            KeyCode::Esc => Effect::Navigate(Page::Menu),
            _ => Effect::None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &ViewContext<'_>) {
        let contracts = &view.state.deployed;
        let outer_block = Block::default()
            .title(format!(" Deployed Contracts ({}) ", contracts.len()))
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());

        if let Some(err) = &view.state.registry_error {
            let failed = Paragraph::new(Span::styled(err.as_str(), THEME.error_style()))
                .block(outer_block)
                .wrap(Wrap { trim: true });
            frame.render_widget(failed, area);
            return;
        }
        if contracts.is_empty() {
            let empty = Paragraph::new(Span::styled("No deployed contracts", THEME.muted_style()))
                .block(outer_block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("#"),
            Cell::from("Address"),
            Cell::from("Token URI"),
            Cell::from("Deployed"),
        ])
        .style(THEME.table_header_style());

        let widths = [
            Constraint::Length(4),
            Constraint::Length(44),
            Constraint::Min(20),
            Constraint::Length(22),
        ];
        let table = Table::new(build_rows(contracts), widths)
            .header(header)
            .block(outer_block)
            .row_highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");

        self.table_state.select(Some(view.cursor));
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::components::test_support::Harness;

    #[tokio::test]
    async fn test_empty_registry() {
        let mut h = Harness::new();
        let mut c = CheckTotalController::new();
        assert!(h.render(&mut c).contains("No deployed contracts"));
        assert_eq!(
            h.press(&mut c, KeyCode::Enter).await,
            Effect::ShowError("no deployed contracts".to_string())
        );
        assert_eq!(h.press(&mut c, KeyCode::Esc).await, Effect::Navigate(Page::Menu));
    }

    #[tokio::test]
    async fn test_unreadable_registry_reported() {
        let mut h = Harness::new();
        h.state.registry_error =
            Some("failed to read registry deployed_contracts.json".to_string());
        let mut c = CheckTotalController::new();

        let text = h.render(&mut c);
        assert!(text.contains("failed to read registry"));
        assert!(!text.contains("No deployed contracts"));
        assert_eq!(
            h.press(&mut c, KeyCode::Enter).await,
            Effect::ShowError("failed to read registry deployed_contracts.json".to_string())
        );
    }

    #[tokio::test]
    async fn test_table_rows() {
        let mut h = Harness::new();
        h.state.deployed = vec![DeployedContract {
            address: "0x1111111111111111111111111111111111111111".to_string(),
            token_uri: "https://a.example".to_string(),
            abi: "[]".to_string(),
            deploy_time: Utc.with_ymd_and_hms(2024, 1, 31, 18, 4, 5).unwrap(),
        }];
        let mut c = CheckTotalController::new();
        assert_eq!(h.press(&mut c, KeyCode::Enter).await, Effect::None);

        let text = h.render(&mut c);
        assert!(text.contains("Deployed Contracts (1)"));
        assert!(text.contains("0x1111111111111111111111111111111111111111"));
        assert!(text.contains("2024-01-31T18:04:05Z"));
    }
}
