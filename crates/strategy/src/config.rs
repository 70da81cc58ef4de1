use serde::{Deserialize, Serialize};

/// Top-level strategy config file (TOML).
///
/// Example `config/strategy.toml`:
/// ```toml
/// [smc]
/// order_block_lookback = 50
/// choch_window = 20
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    pub smc: SmcParams,
}

/// Tuning parameters for the SMC detectors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmcParams {
    /// Earliest candle index eligible to form an order block.
    #[serde(default = "default_order_block_lookback")]
    pub order_block_lookback: usize,
    /// Trailing window length for the CHoCH rolling extrema.
    #[serde(default = "default_choch_window")]
    pub choch_window: usize,
}

impl Default for SmcParams {
    fn default() -> Self {
        Self {
            order_block_lookback: default_order_block_lookback(),
            choch_window: default_choch_window(),
        }
    }
}

fn default_order_block_lookback() -> usize {
    50
}

fn default_choch_window() -> usize {
    20
}

impl StrategyFileConfig {
    /// Load from a TOML file. Exits process on error.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
            panic!("Failed to read strategy config at '{path}': {e}")
        });
        toml::from_str(&content).unwrap_or_else(|e| {
            panic!("Failed to parse strategy config at '{path}': {e}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_parameters() {
        let params = SmcParams::default();
        assert_eq!(params.order_block_lookback, 50);
        assert_eq!(params.choch_window, 20);
    }

    #[test]
    fn parses_full_config() {
        let cfg: StrategyFileConfig = toml::from_str(
            r#"
            [smc]
            order_block_lookback = 30
            choch_window = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.smc.order_block_lookback, 30);
        assert_eq!(cfg.smc.choch_window, 10);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: StrategyFileConfig = toml::from_str("[smc]\n").unwrap();
        assert_eq!(cfg.smc.order_block_lookback, 50);
        assert_eq!(cfg.smc.choch_window, 20);
    }
}
