pub mod airdrop;
pub mod check_total;
pub mod confirm;
pub mod deploy_contract;
pub mod header;
pub mod menu;
pub mod password;
pub mod select_contract;
pub mod status_bar;
pub mod upload;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::data::Services;
use crate::events::{Effect, Page};
use crate::state::SharedState;

/// Mutable session data lent to a controller while it handles one key.
pub struct Context<'a> {
    pub cursor: &'a mut usize,
    pub state: &'a mut SharedState,
    pub services: &'a Services,
}

/// Read-only view of the same data for rendering.
pub struct ViewContext<'a> {
    pub cursor: usize,
    pub state: &'a SharedState,
    pub services: &'a Services,
}

/// One screen of the console.
pub trait Controller {
    fn page(&self) -> Page;

    /// Handle a key press. Network transactions are awaited here, so the
    /// console does not read the next key until they finish.
    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context<'_>) -> Effect;

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &ViewContext<'_>);

    /// Banner to show while `key` is being handled, for keys that start a
    /// long-running transaction.
    fn busy_label(&self, _key: &KeyEvent, _state: &SharedState) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use alloy::node_bindings::{Anvil, AnvilInstance};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    use super::*;
    use crate::data::nft::NftService;
    use crate::data::registry::Registry;

    /// First account of a local hardhat/anvil node.
    pub const HARDHAT_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    /// Nothing listens here, so every transaction fails at the nonce fetch.
    pub const DEAD_RPC: &str = "http://127.0.0.1:1";

    /// Creation code for a contract whose runtime is a lone STOP, so every
    /// call to it succeeds whatever the calldata.
    pub const STOP_BYTECODE: &str = "0x6001600c60003960016000f300";
    /// Creation code for a contract whose runtime reverts on every call.
    pub const REVERT_BYTECODE: &str = "0x6005600c60003960056000f360006000fd";

    /// Start a throwaway anvil node. Its first dev account is `HARDHAT_KEY`.
    pub fn local_node() -> AnvilInstance {
        Anvil::new().spawn()
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn services(dir: &TempDir) -> Services {
        services_at(dir, DEAD_RPC)
    }

    pub fn services_at(dir: &TempDir, rpc_url: &str) -> Services {
        Services::new(
            NftService::new(rpc_url, HARDHAT_KEY).unwrap(),
            Registry::new(dir.path().join("deployed_contracts.json")),
            dir.path().join("addresses.txt"),
        )
    }

    /// Collect a test buffer into one string, rows separated by newlines.
    pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    /// Session data plus a temp working directory for driving one controller.
    pub struct Harness {
        _dir: TempDir,
        pub services: Services,
        pub cursor: usize,
        pub state: SharedState,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_rpc(DEAD_RPC)
        }

        pub fn with_rpc(rpc_url: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let services = services_at(&dir, rpc_url);
            Self {
                _dir: dir,
                services,
                cursor: 0,
                state: SharedState::default(),
            }
        }

        pub async fn press<C: Controller>(&mut self, controller: &mut C, code: KeyCode) -> Effect {
            let mut ctx = Context {
                cursor: &mut self.cursor,
                state: &mut self.state,
                services: &self.services,
            };
            controller.handle_key(key(code), &mut ctx).await
        }

        pub async fn type_str<C: Controller>(&mut self, controller: &mut C, input: &str) {
            for c in input.chars() {
                assert_eq!(self.press(controller, KeyCode::Char(c)).await, Effect::None);
            }
        }

        pub fn busy<C: Controller>(&self, controller: &C, code: KeyCode) -> Option<&'static str> {
            controller.busy_label(&key(code), &self.state)
        }

        pub fn render<C: Controller>(&self, controller: &mut C) -> String {
            let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
            let view = ViewContext {
                cursor: self.cursor,
                state: &self.state,
                services: &self.services,
            };
            terminal
                .draw(|frame| {
                    let area = frame.area();
                    controller.render(frame, area, &view);
                })
                .unwrap();
            buffer_text(&terminal)
        }
    }
}
