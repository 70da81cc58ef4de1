use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use common::{BlockKind, Direction, OrderBlock, Signal};
use risk::{calculate_position, RiskPolicy, MIN_CONFIDENCE};

fn block(kind: BlockKind, high: f64, low: f64) -> OrderBlock {
    OrderBlock {
        kind,
        high,
        low,
        time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        confirmed: false,
    }
}

fn signal(confidence: f64, blocks: Vec<OrderBlock>) -> Signal {
    Signal {
        symbol: "BTCUSD".into(),
        direction: Direction::Buy,
        confidence,
        structure_strength: confidence,
        recent_order_blocks: blocks,
        latest_choch: None,
        latest_engulfing: None,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

proptest! {
    /// Any confidence under the floor is declined, whatever the inputs.
    #[test]
    fn declines_below_confidence_floor(
        confidence in 0.0f64..0.6,
        equity in 0.0f64..1_000_000.0,
        low in 1.0f64..1_000.0,
        span in 0.1f64..100.0,
        bullish in any::<bool>(),
    ) {
        prop_assume!(confidence < MIN_CONFIDENCE);
        let kind = if bullish { BlockKind::Bullish } else { BlockKind::Bearish };
        let sig = signal(confidence, vec![block(kind, low + span, low)]);
        let plan = calculate_position(&sig, equity, &RiskPolicy::default()).unwrap();
        prop_assert!(plan.is_none());
    }

    /// Every accepted plan risks exactly the stated amount.
    #[test]
    fn accepted_plans_satisfy_the_risk_invariant(
        confidence in 0.7f64..=1.0,
        equity in 1.0f64..1_000_000.0,
        low in 1.0f64..10_000.0,
        span in 0.01f64..500.0,
        bullish in any::<bool>(),
    ) {
        let kind = if bullish { BlockKind::Bullish } else { BlockKind::Bearish };
        let sig = signal(confidence, vec![block(kind, low + span, low)]);
        let plan = calculate_position(&sig, equity, &RiskPolicy::default())
            .unwrap()
            .expect("a strong signal with a block must size a plan");

        let realized = plan.size * (plan.entry - plan.stop_loss).abs();
        let tolerance = 1e-9 * plan.risk_amount.max(1.0);
        prop_assert!((realized - plan.risk_amount).abs() <= tolerance);
        prop_assert!(plan.size >= 0.0);
        prop_assert!(plan.risk_amount <= equity * RiskPolicy::default().max_risk_per_trade + tolerance);
    }

    /// The take-profit always sits on the far side of the entry from the stop.
    #[test]
    fn take_profit_is_directionally_consistent(
        confidence in 0.7f64..=1.0,
        equity in 1.0f64..1_000_000.0,
        low in 1.0f64..10_000.0,
        span in 0.01f64..500.0,
        bullish in any::<bool>(),
    ) {
        let kind = if bullish { BlockKind::Bullish } else { BlockKind::Bearish };
        let sig = signal(confidence, vec![block(kind, low + span, low)]);
        let plan = calculate_position(&sig, equity, &RiskPolicy::default())
            .unwrap()
            .expect("a strong signal with a block must size a plan");

        if bullish {
            prop_assert!(plan.take_profit >= plan.entry && plan.entry > plan.stop_loss);
        } else {
            prop_assert!(plan.take_profit <= plan.entry && plan.entry < plan.stop_loss);
        }
    }

    /// Sizing on randomized inputs must never panic; degenerate blocks may
    /// error, but errors are returned, not thrown.
    #[test]
    fn sizing_never_panics_on_extreme_inputs(
        confidence in 0.0f64..=1.0,
        equity in 0.0f64..1e12,
        a in 0.0001f64..1e9,
        b in 0.0001f64..1e9,
        bullish in any::<bool>(),
    ) {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        let kind = if bullish { BlockKind::Bullish } else { BlockKind::Bearish };
        let sig = signal(confidence, vec![block(kind, high, low)]);
        let _ = calculate_position(&sig, equity, &RiskPolicy::default());
    }

    /// Identical inputs always produce the identical decision.
    #[test]
    fn sizing_is_idempotent(
        confidence in 0.0f64..=1.0,
        equity in 0.0f64..1_000_000.0,
        low in 1.0f64..10_000.0,
        span in 0.01f64..500.0,
    ) {
        let sig = signal(confidence, vec![block(BlockKind::Bullish, low + span, low)]);
        let first = calculate_position(&sig, equity, &RiskPolicy::default())
            .ok()
            .flatten();
        let second = calculate_position(&sig, equity, &RiskPolicy::default())
            .ok()
            .flatten();
        prop_assert_eq!(first, second);
    }
}
