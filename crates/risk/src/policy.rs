use serde::{Deserialize, Serialize};

use common::{Error, Result};

/// Compiled-in ceiling on simultaneous open trades. Not user-configurable;
/// caps whatever `max_open_trades` a policy file asks for.
pub const HARD_MAX_OPEN_TRADES: usize = 5;

/// User-configurable risk budget. Loaded once at startup and passed by
/// reference into the sizing entry points; the core never mutates it.
/// Callers that support live policy updates must not swap it mid-call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Fraction of equity risked on a single trade (e.g. 0.01 = 1%).
    pub max_risk_per_trade: f64,
    /// Fraction of equity allowed in a single position's notional.
    pub max_position_size: f64,
    /// Target profit distance as a multiple of the stop distance.
    pub reward_risk_ratio: f64,
    /// Portfolio drawdown from peak that halts trading (e.g. 0.15 = 15%).
    pub max_drawdown: f64,
    /// Maximum concurrent open trades.
    pub max_open_trades: usize,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            max_risk_per_trade: 0.01,
            max_position_size: 0.05,
            reward_risk_ratio: 2.0,
            max_drawdown: 0.15,
            max_open_trades: 3,
        }
    }
}

impl RiskPolicy {
    /// Range-check every field. Call once after loading configuration.
    pub fn validate(&self) -> Result<()> {
        fraction_in_unit_range("max_risk_per_trade", self.max_risk_per_trade)?;
        fraction_in_unit_range("max_position_size", self.max_position_size)?;
        fraction_in_unit_range("max_drawdown", self.max_drawdown)?;

        if !self.reward_risk_ratio.is_finite() || self.reward_risk_ratio < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "reward_risk_ratio must be a finite value >= 0, got {}",
                self.reward_risk_ratio
            )));
        }

        Ok(())
    }

    /// True when another trade may be opened under both the configured
    /// limit and the compiled-in hard ceiling.
    pub fn allows_new_trade(&self, open_trades: usize) -> bool {
        open_trades < self.max_open_trades.min(HARD_MAX_OPEN_TRADES)
    }
}

fn fraction_in_unit_range(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{name} must be a fraction in (0, 1], got {value}"
        )))
    }
}
