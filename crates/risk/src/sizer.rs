use tracing::{debug, info};

use common::{BlockKind, Error, OrderSide, Result, Signal, TradePlan};

use crate::policy::RiskPolicy;

/// Confidence floor below which a signal is never actionable.
pub const MIN_CONFIDENCE: f64 = 0.6;

/// Confidence required to source entry and stop from an order block.
/// Signals in [`MIN_CONFIDENCE`, `BLOCK_STOP_CONFIDENCE`) pass the composer
/// but are declined here.
pub const BLOCK_STOP_CONFIDENCE: f64 = 0.7;

/// Size a trade from a signal under the given risk budget.
///
/// Returns `Ok(None)` when the signal is declined — low confidence or no
/// order block to anchor the stop. A decline is a normal outcome, distinct
/// from the error cases (invalid inputs, zero-width stop).
///
/// Stateless: identical arguments always produce an identical plan.
pub fn calculate_position(
    signal: &Signal,
    equity: f64,
    policy: &RiskPolicy,
) -> Result<Option<TradePlan>> {
    if !equity.is_finite() || equity < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "equity must be non-negative and finite, got {equity}"
        )));
    }
    if !(0.0..=1.0).contains(&signal.confidence) {
        return Err(Error::InvalidParameter(format!(
            "signal confidence must be in [0, 1], got {}",
            signal.confidence
        )));
    }

    if signal.confidence < MIN_CONFIDENCE {
        debug!(
            symbol = %signal.symbol,
            confidence = signal.confidence,
            "Signal declined: below confidence floor"
        );
        return Ok(None);
    }

    let Some(block) = signal.recent_order_blocks.last() else {
        debug!(symbol = %signal.symbol, "Signal declined: no order block to anchor the stop");
        return Ok(None);
    };

    if signal.confidence < BLOCK_STOP_CONFIDENCE {
        debug!(
            symbol = %signal.symbol,
            confidence = signal.confidence,
            "Signal declined: too weak for a block-sourced stop"
        );
        return Ok(None);
    }

    let (side, entry, stop_loss) = match block.kind {
        BlockKind::Bullish => (OrderSide::Buy, block.high, block.low),
        BlockKind::Bearish => (OrderSide::Sell, block.low, block.high),
    };

    let stop_distance = (entry - stop_loss).abs();
    if stop_distance == 0.0 {
        return Err(Error::DegenerateStop { price: entry });
    }

    let mut risk_amount = equity * policy.max_risk_per_trade;
    let mut size = risk_amount / stop_distance;

    // Cap the position's notional at max_position_size of equity. A clamped
    // size risks less than the full budget, so the risked amount is
    // re-derived to keep the plan invariant.
    if entry > 0.0 {
        let max_units = equity * policy.max_position_size / entry;
        if size > max_units {
            debug!(
                symbol = %signal.symbol,
                size,
                max_units,
                "Position size clamped to max_position_size"
            );
            size = max_units;
            risk_amount = size * stop_distance;
        }
    }

    // `entry - stop_loss` is signed, so the target lands on the correct
    // side for both long and short plans.
    let take_profit = entry + (entry - stop_loss) * policy.reward_risk_ratio;

    let plan = TradePlan {
        side,
        entry,
        stop_loss,
        take_profit,
        size,
        risk_amount,
        potential_profit: size * (take_profit - entry).abs(),
    };

    info!(
        symbol = %signal.symbol,
        side = %plan.side,
        entry = plan.entry,
        stop_loss = plan.stop_loss,
        take_profit = plan.take_profit,
        size = plan.size,
        risk_amount = plan.risk_amount,
        "Trade plan sized"
    );

    Ok(Some(plan))
}
