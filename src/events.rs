/// Screens of the operator console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Password,
    Menu,
    Deploy,
    DeployContract,
    SelectContract,
    Airdrop,
    Upload,
    Confirm,
    CheckTotal,
}

impl Page {
    #[cfg(test)]
    pub const ALL: [Page; 9] = [
        Page::Password,
        Page::Menu,
        Page::Deploy,
        Page::DeployContract,
        Page::SelectContract,
        Page::Airdrop,
        Page::Upload,
        Page::Confirm,
        Page::CheckTotal,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Password => "Login",
            Page::Menu => "Main Menu",
            Page::Deploy => "Deploy",
            Page::DeployContract => "Deploy NFT Contract",
            Page::SelectContract => "Select Contract",
            Page::Airdrop => "Airdrop NFT",
            Page::Upload => "Upload Wallet Addresses",
            Page::Confirm => "Confirm Airdrop",
            Page::CheckTotal => "Deployed Contracts",
        }
    }
}

/// What a controller asks the app to do after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Switch page and reset the list cursor.
    Navigate(Page),
    ShowError(String),
    /// Show a success banner, after navigating to `next` when given.
    ShowSuccess {
        message: String,
        next: Option<Page>,
    },
}

impl Effect {
    pub fn error(message: impl std::fmt::Display) -> Self {
        Effect::ShowError(message.to_string())
    }

    pub fn success_then(message: impl Into<String>, next: Page) -> Self {
        Effect::ShowSuccess {
            message: message.into(),
            next: Some(next),
        }
    }
}
