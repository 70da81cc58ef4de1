use tracing::debug;

use common::{
    BlockKind, Candle, ChochEvent, ChochKind, Direction, EngulfingEvent, EngulfingKind, Error,
    OrderBlock, Result, Signal,
};

use crate::config::SmcParams;
use crate::detectors::{ChochDetector, EngulfingDetector, OrderBlockDetector};
use crate::ScoreProvider;

/// Number of order blocks carried on a signal, most recent last.
pub const MAX_RECENT_BLOCKS: usize = 3;

/// Weighted contribution of each structural component to the fused score.
const ORDER_BLOCK_WEIGHT: f64 = 0.4;
const CHOCH_WEIGHT: f64 = 0.3;
const ENGULFING_WEIGHT: f64 = 0.3;

/// Merges the three detector outputs with a model confidence score into a
/// single `Signal`. Deterministic given identical inputs; holds no state
/// between calls.
#[derive(Debug, Clone)]
pub struct SignalComposer {
    order_blocks: OrderBlockDetector,
    choch: ChochDetector,
    engulfing: EngulfingDetector,
}

impl SignalComposer {
    pub fn new(params: &SmcParams) -> Self {
        Self {
            order_blocks: OrderBlockDetector::new(params.order_block_lookback),
            choch: ChochDetector::new(params.choch_window),
            engulfing: EngulfingDetector::new(),
        }
    }

    /// Evaluate the series with an externally supplied confidence score.
    pub fn generate(&self, candles: &[Candle], symbol: &str, confidence: f64) -> Result<Signal> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::InvalidParameter(format!(
                "confidence must be in [0, 1], got {confidence}"
            )));
        }

        let mut signal = self.evaluate(candles, symbol)?;
        signal.confidence = confidence;
        Ok(signal)
    }

    /// Evaluate the series and blend the structure score with an external
    /// capability's score. The blended confidence is the arithmetic mean of
    /// the two.
    pub fn generate_with(
        &self,
        candles: &[Candle],
        symbol: &str,
        provider: &dyn ScoreProvider,
    ) -> Result<Signal> {
        let mut signal = self.evaluate(candles, symbol)?;

        let score = provider.score(candles);
        if !(0.0..=1.0).contains(&score) {
            return Err(Error::InvalidParameter(format!(
                "score provider returned {score}, outside [0, 1]"
            )));
        }

        signal.confidence = (signal.structure_strength + score) / 2.0;
        Ok(signal)
    }

    fn evaluate(&self, candles: &[Candle], symbol: &str) -> Result<Signal> {
        let last = candles.last().ok_or_else(|| {
            Error::InsufficientData("cannot generate a signal from an empty candle series".into())
        })?;

        let mut blocks = self.order_blocks.detect(candles);
        if blocks.len() > MAX_RECENT_BLOCKS {
            blocks.drain(..blocks.len() - MAX_RECENT_BLOCKS);
        }
        let latest_choch = self.choch.detect(candles).pop();
        let latest_engulfing = self.engulfing.detect(candles).pop();

        let (direction, structure_strength) =
            fuse(blocks.last(), latest_choch.as_ref(), latest_engulfing.as_ref());

        debug!(
            symbol,
            %direction,
            structure_strength,
            order_blocks = blocks.len(),
            "Composed SMC signal"
        );

        Ok(Signal {
            symbol: symbol.to_string(),
            direction,
            confidence: structure_strength,
            structure_strength,
            recent_order_blocks: blocks,
            latest_choch,
            latest_engulfing,
            timestamp: last.open_time,
        })
    }
}

/// The latest order block dictates direction and carries the largest
/// weight; CHoCH and engulfing reinforce the score and only set the
/// direction while it is still neutral.
fn fuse(
    block: Option<&OrderBlock>,
    choch: Option<&ChochEvent>,
    engulfing: Option<&EngulfingEvent>,
) -> (Direction, f64) {
    let mut strength = 0.0;
    let mut direction = Direction::Neutral;

    if let Some(block) = block {
        strength += ORDER_BLOCK_WEIGHT;
        direction = match block.kind {
            BlockKind::Bullish => Direction::Buy,
            BlockKind::Bearish => Direction::Sell,
        };
    }

    if let Some(event) = choch {
        strength += CHOCH_WEIGHT;
        if direction == Direction::Neutral {
            direction = match event.kind {
                ChochKind::Bullish => Direction::Buy,
                ChochKind::Bearish => Direction::Sell,
            };
        }
    }

    if let Some(event) = engulfing {
        strength += ENGULFING_WEIGHT;
        if direction == Direction::Neutral {
            direction = match event.kind {
                EngulfingKind::Bullish => Direction::Buy,
                EngulfingKind::Bearish => Direction::Sell,
            };
        }
    }

    (direction, strength.min(1.0))
}
