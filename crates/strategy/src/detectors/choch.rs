use common::{Candle, ChochEvent, ChochKind};

/// Change-of-character scanner.
///
/// Each candle from index 2 onward is compared against the rolling extrema
/// of the up-to-`window` candles before it; the candle is excluded from its
/// own reference window. A strict break of the rolling high is bullish,
/// otherwise a strict break of the rolling low is bearish. At most one
/// event per candle.
#[derive(Debug, Clone)]
pub struct ChochDetector {
    pub window: usize,
}

impl ChochDetector {
    pub const DEFAULT_WINDOW: usize = 20;

    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn detect(&self, candles: &[Candle]) -> Vec<ChochEvent> {
        let mut events = Vec::new();

        for i in 2..candles.len() {
            let start = i.saturating_sub(self.window);
            let reference = &candles[start..i];
            let recent_high = reference
                .iter()
                .map(|c| c.high)
                .fold(f64::NEG_INFINITY, f64::max);
            let recent_low = reference
                .iter()
                .map(|c| c.low)
                .fold(f64::INFINITY, f64::min);

            let current = &candles[i];
            if current.high > recent_high {
                events.push(ChochEvent {
                    kind: ChochKind::Bullish,
                    price: current.high,
                    time: current.open_time,
                });
            } else if current.low < recent_low {
                events.push(ChochEvent {
                    kind: ChochKind::Bearish,
                    price: current.low,
                    time: current.open_time,
                });
            }
        }

        events
    }
}

impl Default for ChochDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}
