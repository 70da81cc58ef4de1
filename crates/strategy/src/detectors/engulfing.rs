use common::{Candle, EngulfingEvent, EngulfingKind};

/// Engulfing pattern scanner.
///
/// A bullish engulfing is a down-bodied candle whose body is fully
/// contained by the next candle's up body; bearish is the mirror image.
/// Strength is the ratio of the engulfing reach to the engulfed body.
/// Events whose strength denominator is not strictly positive are skipped
/// rather than emitted with an infinite or NaN value; in particular a flat
/// (open == close) previous candle never produces an event.
#[derive(Debug, Clone, Default)]
pub struct EngulfingDetector;

impl EngulfingDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, candles: &[Candle]) -> Vec<EngulfingEvent> {
        let mut events = Vec::new();

        for pair in candles.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);

            if prev.is_down_body() && curr.close > prev.open && curr.open < prev.close {
                let engulfed = prev.open - prev.close;
                if engulfed > 0.0 {
                    events.push(EngulfingEvent {
                        kind: EngulfingKind::Bullish,
                        time: curr.open_time,
                        strength: (curr.close - curr.open) / engulfed,
                    });
                }
            } else if prev.is_up_body() && curr.close < prev.open && curr.open > prev.close {
                let reach = curr.open - prev.open;
                if reach > 0.0 {
                    events.push(EngulfingEvent {
                        kind: EngulfingKind::Bearish,
                        time: curr.open_time,
                        strength: (curr.open - curr.close) / reach,
                    });
                }
            }
        }

        events
    }
}
