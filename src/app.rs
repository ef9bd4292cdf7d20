use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::airdrop::AirdropController;
use crate::components::check_total::CheckTotalController;
use crate::components::confirm::ConfirmController;
use crate::components::deploy_contract::DeployContractController;
use crate::components::header::Header;
use crate::components::menu::MenuController;
use crate::components::password::PasswordController;
use crate::components::select_contract::SelectContractController;
use crate::components::status_bar::StatusBar;
use crate::components::upload::UploadController;
use crate::components::{Context, Controller, ViewContext};
use crate::data::Services;
use crate::data::types::{AvailableContract, DeployedContract};
use crate::error::RegistryError;
use crate::events::{Effect, Page};
use crate::state::SharedState;
use crate::theme::THEME;

/// Navigation state and the banners shown for one key cycle.
#[derive(Debug)]
pub struct Session {
    pub page: Page,
    pub cursor: usize,
    pub error_banner: Option<String>,
    pub success_banner: Option<String>,
    pub busy: Option<&'static str>,
}

impl Session {
    fn new() -> Self {
        Self {
            page: Page::Password,
            cursor: 0,
            error_banner: None,
            success_banner: None,
            busy: None,
        }
    }
}

/// Bind `$c` to the controller for the current page and evaluate `$body`.
macro_rules! with_controller {
    ($app:ident, $c:ident => $body:expr) => {
        match $app.session.page {
            Page::Password => {
                let $c = &mut $app.password;
                $body
            }
            Page::Menu => {
                let $c = &mut $app.main_menu;
                $body
            }
            Page::Deploy => {
                let $c = &mut $app.deploy_menu;
                $body
            }
            Page::DeployContract => {
                let $c = &mut $app.deploy_contract;
                $body
            }
            Page::SelectContract => {
                let $c = &mut $app.select_contract;
                $body
            }
            Page::Airdrop => {
                let $c = &mut $app.airdrop;
                $body
            }
            Page::Upload => {
                let $c = &mut $app.upload;
                $body
            }
            Page::Confirm => {
                let $c = &mut $app.confirm;
                $body
            }
            Page::CheckTotal => {
                let $c = &mut $app.check_total;
                $body
            }
        }
    };
}

pub struct App {
    session: Session,
    state: SharedState,
    services: Services,

    // Chrome
    header: Header,
    status_bar: StatusBar,

    // Pages
    password: PasswordController,
    main_menu: MenuController,
    deploy_menu: MenuController,
    deploy_contract: DeployContractController,
    select_contract: SelectContractController,
    airdrop: AirdropController,
    upload: UploadController,
    confirm: ConfirmController,
    check_total: CheckTotalController,

    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(
        services: Services,
        password: String,
        contracts: Vec<AvailableContract>,
        deployed: Result<Vec<DeployedContract>, RegistryError>,
        tick_rate_ms: u64,
    ) -> Self {
        Self {
            session: Session::new(),
            state: SharedState::from_registry(deployed),
            header: Header::new(services.nft.address()),
            services,
            status_bar: StatusBar,
            password: PasswordController::new(password),
            main_menu: MenuController::main(),
            deploy_menu: MenuController::deploy(),
            deploy_contract: DeployContractController::new(contracts),
            select_contract: SelectContractController::new(),
            airdrop: AirdropController::new(),
            upload: UploadController::new(),
            confirm: ConfirmController::new(),
            check_total: CheckTotalController::new(),
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> Result<()> {
        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event, &mut terminal).await?;
                }
            }
        }

        tracing::info!("console closed");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // header (1) | page (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0], self.session.page);

        let view = ViewContext {
            cursor: self.session.cursor,
            state: &self.state,
            services: &self.services,
        };
        with_controller!(self, c => c.render(frame, chunks[1], &view));

        self.status_bar.render(frame, chunks[2], &self.session);
    }

    async fn handle_terminal_event<B: Backend>(
        &mut self,
        event: Event,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        // Only handle key press events (not release/repeat) for cross-platform compat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            tracing::info!("quit requested on {}", self.session.page.title());
            self.should_quit = true;
            return Ok(());
        }

        self.session.error_banner = None;
        self.session.success_banner = None;

        // The handler blocks until the transaction is mined, so paint the
        // busy banner before awaiting it.
        let busy = with_controller!(self, c => c.busy_label(&key, &self.state));
        if let Some(label) = busy {
            self.session.busy = Some(label);
            terminal.draw(|frame| self.render(frame))?;
        }

        let effect = self.dispatch(key).await;
        self.session.busy = None;
        self.apply(effect);
        Ok(())
    }

    async fn dispatch(&mut self, key: KeyEvent) -> Effect {
        let mut ctx = Context {
            cursor: &mut self.session.cursor,
            state: &mut self.state,
            services: &self.services,
        };
        with_controller!(self, c => {
            tracing::trace!("key on {}", c.page().title());
            c.handle_key(key, &mut ctx).await
        })
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Navigate(page) => self.navigate(page),
            Effect::ShowError(message) => {
                tracing::error!("{}: {message}", self.session.page.title());
                self.session.error_banner = Some(message);
            }
            Effect::ShowSuccess { message, next } => {
                if let Some(page) = next {
                    self.navigate(page);
                }
                tracing::info!("{message}");
                self.session.success_banner = Some(message);
            }
        }
    }

    fn navigate(&mut self, page: Page) {
        tracing::debug!("{} -> {}", self.session.page.title(), page.title());
        self.session.page = page;
        self.session.cursor = 0;
    }
}
