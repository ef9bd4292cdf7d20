use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Context, Controller, ViewContext};
use crate::data::types::{AvailableContract, DeployParams};
use crate::events::{Effect, Page};
use crate::state::SharedState;
use crate::theme::THEME;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Select,
    Uri,
}

/// Pick a compiled contract, enter its initial token URI and deploy it.
pub struct DeployContractController {
    contracts: Vec<AvailableContract>,
    phase: Phase,
    chosen: usize,
    uri: String,
    list_state: ListState,
}

impl DeployContractController {
    pub fn new(contracts: Vec<AvailableContract>) -> Self {
        Self {
            contracts,
            phase: Phase::Select,
            chosen: 0,
            uri: String::new(),
            list_state: ListState::default(),
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Select;
        self.uri.clear();
    }

    fn handle_select(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        let len = self.contracts.len();
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
                if len == 0 {
                    return Effect::error("no deployable contracts found");
                }
                self.chosen = (*ctx.cursor).min(len - 1);
                self.phase = Phase::Uri;
                Effect::None
            }
            KeyCode::Esc => Effect::Navigate(Page::Deploy),
            _ => Effect::None,
        }
    }

    async fn handle_uri(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        match key.code {
            KeyCode::Enter => self.deploy(ctx).await,
            KeyCode::Esc => {
                self.reset();
                *ctx.cursor = self.chosen;
                Effect::None
            }
            KeyCode::Backspace => {
                self.uri.pop();
                Effect::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.uri.push(c);
                Effect::None
            }
            _ => Effect::None,
        }
    }

    async fn deploy(&mut self, ctx: &mut Context<'_>) -> Effect {
        if let Err(e) = utils::validate_url(&self.uri) {
            return Effect::error(e);
        }
        let Some(contract) = self.contracts.get(self.chosen) else {
            self.reset();
            return Effect::error("no deployable contracts found");
        };

        tracing::info!(
            "deploying {} from {} with URI {}",
            contract.contract_name,
            contract.file_path.display(),
            self.uri
        );
        let params = DeployParams {
            bytecode: contract.bytecode.clone(),
            abi: Some(contract.abi.clone()),
            initial_uri: self.uri.clone(),
            ..Default::default()
        };
        let address = match ctx.services.nft.deploy(params).await {
            Ok(address) => address,
            Err(e) => return Effect::error(format!("failed to deploy contract: {e}")),
        };

        let record = match ctx
            .services
            .registry
            .save(&address.to_string(), &self.uri, &contract.abi)
        {
            Ok(record) => record,
            Err(e) => {
                return Effect::error(format!(
                    "contract deployed at {address} but was not saved: {e}"
                ));
            }
        };
        if ctx.state.registry_error.is_none() {
            ctx.state.deployed.push(record);
        } else {
            // the earlier load failed, so the mirror is missing older records
            match ctx.services.registry.list() {
                Ok(all) => {
                    ctx.state.deployed = all;
                    ctx.state.registry_error = None;
                }
                Err(e) => ctx.state.registry_error = Some(e.to_string()),
            }
        }

        self.reset();
        Effect::success_then(format!("contract deployed at {address}"), Page::Menu)
    }

    fn render_select(&mut self, frame: &mut Frame, area: Rect, cursor: usize) {
        let block = Block::default()
            .title(" Select a contract to deploy ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());

        if self.contracts.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No deployable contracts found",
                THEME.muted_style(),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .contracts
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(c.contract_name.clone(), Style::default().fg(THEME.text)),
                    Span::styled(format!("  {}", c.file_path.display()), THEME.muted_style()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");

        self.list_state.select(Some(cursor));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_uri(&self, frame: &mut Frame, area: Rect) {
        let name = self
            .contracts
            .get(self.chosen)
            .map(|c| c.contract_name.as_str())
            .unwrap_or("-");

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let summary = Paragraph::new(Line::from(vec![
            Span::styled(" Contract: ", THEME.muted_style()),
            Span::styled(name, THEME.accent_style()),
        ]));
        frame.render_widget(summary, chunks[0]);

        let input = Block::default()
            .title(" Initial token URI ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style());
        let inner = input.inner(chunks[1]);
        frame.render_widget(input, chunks[1]);
        frame.render_widget(
            Paragraph::new(Span::styled(self.uri.as_str(), Style::default().fg(THEME.text))),
            inner,
        );

        let cursor_x = inner.x + self.uri.chars().count() as u16;
        if cursor_x < inner.right() {
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}

impl Controller for DeployContractController {
    fn page(&self) -> Page {
        Page::DeployContract
    }

    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        match self.phase {
            Phase::Select => self.handle_select(key, ctx),
            Phase::Uri => self.handle_uri(key, ctx).await,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &ViewContext<'_>) {
        match self.phase {
            Phase::Select => self.render_select(frame, area, view.cursor),
            Phase::Uri => self.render_uri(frame, area),
        }
    }

    fn busy_label(&self, key: &KeyEvent, _state: &SharedState) -> Option<&'static str> {
        let deploying = self.phase == Phase::Uri
            && key.code == KeyCode::Enter
            && utils::validate_url(&self.uri).is_ok();
        deploying.then_some("Deploying contract...")
    }
}
