pub mod policy;
pub mod sizer;

pub use policy::{RiskPolicy, HARD_MAX_OPEN_TRADES};
pub use sizer::{calculate_position, BLOCK_STOP_CONFIDENCE, MIN_CONFIDENCE};
