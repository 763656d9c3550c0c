//! Elapsed-time measurement over pluggable clocks.
//!
//! - [`IntervalTimer`] measures one start/stop pair.
//! - [`SplitTimer`] records a start plus a fixed number of splits, which may be taken
//!   concurrently from several threads, and reports the per-segment durations.

pub mod clock;
pub mod cycle_clock;
pub mod error;
pub mod format;
pub mod interval;
pub mod split;

pub use clock::{Clock, ManualClock, Period, SteadyClock, SystemClock, Timestamp};
pub use cycle_clock::CycleClock;
pub use error::TimerError;
pub use interval::{IntervalTimer, DEFAULT_FORMAT_WIDTH, DEFAULT_REPORT_WIDTH};
pub use split::{SplitTimer, DEFAULT_REPORT_PRECISION};

pub type Result<T> = std::result::Result<T, TimerError>;
