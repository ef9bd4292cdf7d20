pub mod abi;
pub mod addresses;
pub mod artifacts;
pub mod nft;
pub mod provider;
pub mod registry;
pub mod types;

use std::path::PathBuf;

use crate::data::nft::NftService;
use crate::data::registry::Registry;

/// Disk and network capabilities lent to page controllers.
pub struct Services {
    pub nft: NftService,
    pub registry: Registry,
    pub addresses_path: PathBuf,
}

impl Services {
    pub fn new(nft: NftService, registry: Registry, addresses_path: impl Into<PathBuf>) -> Self {
        Self {
            nft,
            registry,
            addresses_path: addresses_path.into(),
        }
    }
}
