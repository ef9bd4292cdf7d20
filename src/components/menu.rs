use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Context, Controller, ViewContext};
use crate::events::{Effect, Page};
use crate::theme::THEME;
use crate::utils;

const MAIN_ENTRIES: &[(&str, Page)] = &[
    ("Deploy Contract", Page::Deploy),
    ("Airdrop NFT", Page::SelectContract),
    ("Deployed Contracts", Page::CheckTotal),
];

const DEPLOY_ENTRIES: &[(&str, Page)] = &[
    ("Deploy NFT Contract", Page::DeployContract),
    ("View Deployed Contracts", Page::CheckTotal),
];

/// A fixed list of labelled destinations.
pub struct MenuController {
    page: Page,
    entries: &'static [(&'static str, Page)],
    back: Option<Page>,
    list_state: ListState,
}

impl MenuController {
    fn new(page: Page, entries: &'static [(&'static str, Page)], back: Option<Page>) -> Self {
        Self {
            page,
            entries,
            back,
            list_state: ListState::default(),
        }
    }

    pub fn main() -> Self {
        Self::new(Page::Menu, MAIN_ENTRIES, None)
    }

    pub fn deploy() -> Self {
        Self::new(Page::Deploy, DEPLOY_ENTRIES, Some(Page::Menu))
    }
}

impl Controller for MenuController {
    fn page(&self) -> Page {
        self.page
    }

    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect {
        let len = self.entries.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *ctx.cursor = utils::step_cursor(*ctx.cursor, -1, len);
                Effect::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *ctx.cursor = utils::step_cursor(*ctx.cursor, 1, len);
                Effect::None
            }
            KeyCode::Enter => match self.entries.get(*ctx.cursor) {
                Some((_, target)) => Effect::Navigate(*target),
                None => Effect::None,
            },
            KeyCode::Esc => self.back.map_or(Effect::None, Effect::Navigate),
            _ => Effect::None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &ViewContext<'_>) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|(label, _)| ListItem::new(Line::from(*label)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" {} ", self.page.title()))
                    .borders(Borders::ALL)
                    .border_style(THEME.border_focused_style()),
            )
            .style(Style::default().fg(THEME.text))
            .highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");

        self.list_state.select(Some(view.cursor));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::Harness;

    #[tokio::test]
    async fn test_main_menu_targets() {
        let mut h = Harness::new();
        let mut menu = MenuController::main();

        assert_eq!(h.press(&mut menu, KeyCode::Enter).await, Effect::Navigate(Page::Deploy));
        h.press(&mut menu, KeyCode::Down).await;
        assert_eq!(
            h.press(&mut menu, KeyCode::Enter).await,
            Effect::Navigate(Page::SelectContract)
        );
        h.press(&mut menu, KeyCode::Down).await;
        assert_eq!(
            h.press(&mut menu, KeyCode::Enter).await,
            Effect::Navigate(Page::CheckTotal)
        );
    }

    #[tokio::test]
    async fn test_cursor_clamps() {
        let mut h = Harness::new();
        let mut menu = MenuController::main();

        h.press(&mut menu, KeyCode::Up).await;
        assert_eq!(h.cursor, 0);
        for _ in 0..10 {
            h.press(&mut menu, KeyCode::Down).await;
        }
        assert_eq!(h.cursor, 2);
        h.press(&mut menu, KeyCode::Up).await;
        assert_eq!(h.cursor, 1);
    }

    #[tokio::test]
    async fn test_main_menu_ignores_esc() {
        let mut h = Harness::new();
        let mut menu = MenuController::main();
        assert_eq!(h.press(&mut menu, KeyCode::Esc).await, Effect::None);
    }

    #[tokio::test]
    async fn test_deploy_menu() {
        let mut h = Harness::new();
        let mut menu = MenuController::deploy();

        assert_eq!(
            h.press(&mut menu, KeyCode::Enter).await,
            Effect::Navigate(Page::DeployContract)
        );
        h.press(&mut menu, KeyCode::Down).await;
        h.press(&mut menu, KeyCode::Down).await;
        assert_eq!(
            h.press(&mut menu, KeyCode::Enter).await,
            Effect::Navigate(Page::CheckTotal)
        );
        assert_eq!(h.press(&mut menu, KeyCode::Esc).await, Effect::Navigate(Page::Menu));
    }

    #[test]
    fn test_render_lists_entries() {
        let h = Harness::new();
        let text = h.render(&mut MenuController::main());
        assert!(text.contains("Main Menu"));
        assert!(text.contains("Airdrop NFT"));
        assert!(text.contains("Deployed Contracts"));
    }
}
