use common::{BlockKind, Candle, OrderBlock};

/// Order block scanner (supply/demand zone origins).
///
/// A bullish block is an up-bodied candle immediately followed by a
/// down-bodied one; a bearish block is the mirror image. The zone spans the
/// first candle's high/low. Returns `None`-equivalent empty output (no
/// error) when the series is shorter than `lookback + 2`.
#[derive(Debug, Clone)]
pub struct OrderBlockDetector {
    /// Earliest candle index eligible to form a block.
    pub lookback: usize,
}

impl OrderBlockDetector {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }

    /// Scan a candle slice (oldest first). Blocks are emitted oldest first,
    /// always unconfirmed — confirmation is the strategy layer's call.
    pub fn detect(&self, candles: &[Candle]) -> Vec<OrderBlock> {
        let mut blocks = Vec::new();
        if candles.len() < self.lookback + 2 {
            return blocks;
        }

        // The last index needs a one-candle look-ahead, so it is excluded.
        for i in self.lookback..candles.len() - 1 {
            let origin = &candles[i];
            let next = &candles[i + 1];

            let kind = if origin.is_up_body() && next.is_down_body() {
                BlockKind::Bullish
            } else if origin.is_down_body() && next.is_up_body() {
                BlockKind::Bearish
            } else {
                continue;
            };

            blocks.push(OrderBlock {
                kind,
                high: origin.high,
                low: origin.low,
                time: origin.open_time,
                confirmed: false,
            });
        }

        blocks
    }
}
