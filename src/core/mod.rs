pub mod mode;
pub mod throttle;
pub mod types;

pub use mode::ModeEvaluator;
pub use throttle::{Throttle, ThrottleOptions, Throttled, throttle};
pub use types::{Dimension, Length, ModeContext};
