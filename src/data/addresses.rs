use std::fs;
use std::path::Path;

use alloy::primitives::Address;

use crate::error::AddressFileError;
use crate::utils;

pub const DEFAULT_ADDRESSES_FILE: &str = "addresses.txt";

/// Read a newline-delimited list of wallet addresses.
///
/// Lines are trimmed and blank lines skipped. The first malformed line fails
/// the whole read, reported by its 1-indexed line number.
pub fn parse_wallet_addresses(path: &Path) -> Result<Vec<Address>, AddressFileError> {
    let content = fs::read_to_string(path).map_err(|source| AddressFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_address_list(&content)
}

pub fn parse_address_list(content: &str) -> Result<Vec<Address>, AddressFileError> {
    let mut addresses = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let invalid = || AddressFileError::InvalidLine {
            line: i + 1,
            content: line.to_string(),
        };
        if !utils::is_eth_address(line) {
            return Err(invalid());
        }
        let address = line.parse::<Address>().map_err(|_| invalid())?;
        addresses.push(address);
    }

    if addresses.is_empty() {
        return Err(AddressFileError::Empty);
    }

    Ok(addresses)
}
