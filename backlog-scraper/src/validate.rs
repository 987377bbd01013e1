//! Input checks shared by the catalog clients.
//!
//! Every check runs before a request is built, so bad input never reaches
//! the network.

use crate::error::CatalogError;

/// Length of a SteamID64 in decimal digits.
const STEAM_ID_DIGITS: usize = 17;

/// Trim a search query, rejecting blank input.
pub fn validate_query(query: &str) -> Result<&str, CatalogError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation(
            "search query must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Parse a numeric provider id such as an IGDB game id.
pub fn validate_numeric_id(id: &str) -> Result<u64, CatalogError> {
    let trimmed = id.trim();
    trimmed
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| CatalogError::Validation(format!("'{id}' is not a numeric id")))
}

/// Check that an account id is a 17-digit SteamID64.
pub fn validate_steam_id(account: &str) -> Result<&str, CatalogError> {
    let trimmed = account.trim();
    if trimmed.len() == STEAM_ID_DIGITS && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed)
    } else {
        Err(CatalogError::Validation(format!(
            "'{account}' is not a SteamID64 (expected {STEAM_ID_DIGITS} digits)"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries() {
        assert_eq!(validate_query("  Hades ").unwrap(), "Hades");
        assert!(matches!(validate_query(""), Err(CatalogError::Validation(_))));
        assert!(matches!(validate_query(" \t\n"), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn numeric_ids() {
        assert_eq!(validate_numeric_id("1942").unwrap(), 1942);
        assert_eq!(validate_numeric_id(" 7 ").unwrap(), 7);
        assert!(validate_numeric_id("0").is_err());
        assert!(validate_numeric_id("-3").is_err());
        assert!(validate_numeric_id("hades").is_err());
        assert!(validate_numeric_id("").is_err());
    }

    #[test]
    fn steam_ids() {
        assert_eq!(validate_steam_id("76561197960287930").unwrap(), "76561197960287930");
        assert!(validate_steam_id("7656119796028793").is_err());
        assert!(validate_steam_id("765611979602879301").is_err());
        assert!(validate_steam_id("7656119796028793x").is_err());
        assert!(validate_steam_id("gaben").is_err());
    }
}
