//! # Splitwatch: elapsed-time measurement for instrumentation code
//!
//! - Single-interval timing between a start and a stop
//! - Multi-point split timing with lock-free concurrent splits
//! - Steady, wall, cycle-counter and manual clock sources
//! - Comma separated reports for benchmark output

pub mod config;
pub mod utils;

pub use split_timer;
pub use split_timer::{
    Clock, CycleClock, IntervalTimer, ManualClock, Period, SplitTimer, SteadyClock, SystemClock,
    TimerError, Timestamp,
};

pub use config::{ReportSettings, TimerConfig};

pub type Result<T> = anyhow::Result<T>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
