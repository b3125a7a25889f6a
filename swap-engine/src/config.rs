//! Configuration for the swap engine

use custody_core::types::AccountId;
use serde::{Deserialize, Serialize};

/// Swap engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Account that physically holds escrowed assets and funds
    pub escrow_account: AccountId,

    /// Minimum distance between creation and expiry (anti-flash-expiry guard)
    pub min_expiry_window_secs: u64,

    /// Maximum number of assets a counter-offer may carry
    pub max_assets_per_proposal: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            escrow_account: AccountId::new("swap-escrow"),
            min_expiry_window_secs: 300, // 5 minutes
            max_assets_per_proposal: 16,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(account) = std::env::var("SWAP_ESCROW_ACCOUNT") {
            config.escrow_account = AccountId::new(account);
        }

        if let Ok(secs) = std::env::var("SWAP_MIN_EXPIRY_WINDOW_SECS") {
            config.min_expiry_window_secs = secs
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid expiry window: {}", e)))?;
        }

        if let Ok(max) = std::env::var("SWAP_MAX_ASSETS_PER_PROPOSAL") {
            config.max_assets_per_proposal = max
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid asset cap: {}", e)))?;
        }

        Ok(config)
    }
}
