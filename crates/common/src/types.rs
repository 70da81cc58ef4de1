use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One closed OHLCV bar from the exchange feed.
/// Immutable once ingested; detectors never mutate candles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// True when the candle closed above its open.
    pub fn is_up_body(&self) -> bool {
        self.close > self.open
    }

    /// True when the candle closed below its open.
    pub fn is_down_body(&self) -> bool {
        self.close < self.open
    }

    /// Absolute body size. Zero for flat (open == close) candles.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }
}

/// A validated, time-ordered candle sequence.
///
/// Enforces the ingestion invariant: open times strictly increasing, no
/// duplicates. Derefs to `[Candle]` so detectors can take plain slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries(Vec<Candle>);

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self> {
        for pair in candles.windows(2) {
            if pair[1].open_time <= pair[0].open_time {
                return Err(Error::InvalidParameter(format!(
                    "candle open times must be strictly increasing: {} then {}",
                    pair[0].open_time, pair[1].open_time
                )));
            }
        }
        Ok(Self(candles))
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Candle> {
        self.0
    }
}

impl std::ops::Deref for CandleSeries {
    type Target = [Candle];

    fn deref(&self) -> &[Candle] {
        &self.0
    }
}

/// Direction of an order block zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockKind {
    Bullish,
    Bearish,
}

/// A candle identified as the origin of a strong directional move,
/// treated as a supply/demand zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    pub kind: BlockKind,
    pub high: f64,
    pub low: f64,
    pub time: DateTime<Utc>,
    /// Always emitted `false`; confirmation is the strategy layer's call.
    pub confirmed: bool,
}

/// Direction of a change-of-character break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChochKind {
    #[serde(rename = "BULLISH_CHOCH")]
    Bullish,
    #[serde(rename = "BEARISH_CHOCH")]
    Bearish,
}

/// A break of the most recent local extremum (market structure shift).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChochEvent {
    pub kind: ChochKind,
    pub price: f64,
    pub time: DateTime<Utc>,
}

/// Direction of an engulfing candle pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngulfingKind {
    #[serde(rename = "BULLISH_ENGULFING")]
    Bullish,
    #[serde(rename = "BEARISH_ENGULFING")]
    Bearish,
}

/// A two-candle formation where the second body fully contains the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngulfingEvent {
    pub kind: EngulfingKind,
    pub time: DateTime<Utc>,
    /// Ratio of the engulfing body to the engulfed body. Strictly positive
    /// for every emitted event; unbounded above.
    pub strength: f64,
}

/// Fused directional bias of the structural components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
    #[default]
    Neutral,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
            Direction::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Signal emitted by the composer, passed to the Position Sizer and the
/// dashboard/reporting boundary. Built fresh per evaluation; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub direction: Direction,
    /// Model/blended confidence in [0, 1].
    pub confidence: f64,
    /// Weighted score of the structural components alone, in [0, 1].
    pub structure_strength: f64,
    /// Up to the last 3 detected order blocks, most recent last.
    pub recent_order_blocks: Vec<OrderBlock>,
    pub latest_choch: Option<ChochEvent>,
    pub latest_engulfing: Option<EngulfingEvent>,
    /// Open time of the last candle in the evaluated series.
    pub timestamp: DateTime<Utc>,
}

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A fully sized trade, ready for the (external) execution layer.
///
/// Invariant: `size * (entry - stop_loss).abs()` equals `risk_amount`
/// within numeric tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub side: OrderSide,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Position size in base asset units.
    pub size: f64,
    /// Equity at risk if the stop is hit.
    pub risk_amount: f64,
    /// Equity gained if the target is hit.
    pub potential_profit: f64,
}
