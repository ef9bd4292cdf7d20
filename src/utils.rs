use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};

use crate::error::ValidationError;

pub const MAX_NFT_ID_LENGTH: usize = 10;
pub const MAX_URL_LENGTH: usize = 255;

/// Characters allowed after the scheme in a token URI.
const URL_EXTRA_CHARS: &str = "-._~:/?#[]@!$&'()*+,;=";

/// Truncate a B256 hash to "0xabcd...ef12" format
pub fn truncate_hash(hash: &B256) -> String {
    truncate_hex(&format!("{hash}"))
}

/// Truncate an address to "0xabcd...ef12" format
pub fn truncate_address(addr: &Address) -> String {
    truncate_hex(&format!("{addr}"))
}

pub fn truncate_hex(s: &str) -> String {
    if s.len() > 14 && s.is_ascii() {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s.to_string()
    }
}

/// Format a timestamp as RFC 3339 with second precision
pub fn format_rfc3339(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Format a timestamp as "2024-01-31 18:04:05"
pub fn format_datetime(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Matches `^0x[0-9a-fA-F]{40}$`.
pub fn is_eth_address(input: &str) -> bool {
    input.len() == 42
        && input.starts_with("0x")
        && input[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Matches `^(http|https)://[a-zA-Z0-9\-._~:/?#\[\]@!$&'()*+,;=]+$`.
pub fn is_valid_url(input: &str) -> bool {
    let rest = match input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || URL_EXTRA_CHARS.contains(c))
}

pub fn validate_nft_id(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyNftId);
    }
    if input.len() > MAX_NFT_ID_LENGTH {
        return Err(ValidationError::NftIdTooLong {
            max: MAX_NFT_ID_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_url(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if input.len() > MAX_URL_LENGTH {
        return Err(ValidationError::UrlTooLong {
            max: MAX_URL_LENGTH,
        });
    }
    if !is_valid_url(input) {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(())
}

/// Move a list cursor by `delta`, clamped to `[0, len - 1]` (0 for empty lists).
pub fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len - 1;
    cursor.min(last).saturating_add_signed(delta).min(last)
}
