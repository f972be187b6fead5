//! Environment-driven settings.
//!
//! Secrets and deployment-specific values live in the environment (or `.env`)
//! rather than in config.toml.

/// Placeholder value shipped in sample configuration; treated as unset.
pub const MAP_TOKEN_PLACEHOLDER: &str = "YOUR_MAPBOX_TOKEN";

/// Gets the map-service access token from `MAP_ACCESS_TOKEN`.
///
/// The stock map itself is rendered elsewhere; the dashboard only needs to
/// know whether a usable token is configured.
///
/// # Returns
///
/// `Some(token)` when set to something other than blank or the placeholder.
#[must_use]
pub fn map_access_token() -> Option<String> {
    std::env::var("MAP_ACCESS_TOKEN")
        .ok()
        .and_then(|token| usable_map_token(&token))
}

fn usable_map_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    if token.is_empty() || token == MAP_TOKEN_PLACEHOLDER {
        None
    } else {
        Some(token.to_string())
    }
}

/// Gets the Discord bot token from `DISCORD_BOT_TOKEN`.
pub fn discord_token() -> crate::errors::Result<String> {
    std::env::var("DISCORD_BOT_TOKEN").map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_token_is_unset() {
        assert_eq!(usable_map_token(MAP_TOKEN_PLACEHOLDER), None);
        assert_eq!(usable_map_token("   "), None);
        assert_eq!(usable_map_token(" pk.abc "), Some("pk.abc".to_string()));
    }
}
