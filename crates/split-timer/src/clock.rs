//! Clock sources the timers read from.
//!
//! A [`Clock`] hands out [`Timestamp`]s: nanosecond counts since an origin chosen by the
//! clock itself. Timestamps from different clock types are not comparable with each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use once_cell::sync::Lazy;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Capability to read the current time.
///
/// `IS_STEADY` and `PERIOD` describe the clock type rather than an instance, so the timers
/// can answer `steady()` and `resolution_us()` without holding a clock value.
pub trait Clock: Clone + Send + Sync {
    /// Whether readings never go backwards and advance at a uniform rate.
    const IS_STEADY: bool;

    /// Smallest time step the clock can represent, in seconds.
    const PERIOD: Period;

    /// Read the current time.
    fn now(&self) -> Timestamp;
}

/// Tick length of a clock expressed as the ratio `num / den` seconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Period {
    pub num: u64,
    pub den: u64,
}

impl Period {
    pub const NANOSECOND: Period = Period::new(1, 1_000_000_000);

    pub const fn new(num: u64, den: u64) -> Self {
        Self { num, den }
    }

    /// Tick length in microseconds.
    #[inline]
    pub fn as_micros(&self) -> f64 {
        self.num as f64 * 1_000_000.0 / self.den as f64
    }
}

/// A point in time on some clock, in nanoseconds since that clock's origin.
///
/// The default value (zero) stands for "never recorded".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp { nanos: 0 };

    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    #[inline]
    pub fn from_duration(since_origin: Duration) -> Self {
        Self::from_nanos(saturating_nanos(since_origin))
    }

    #[inline]
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Signed nanoseconds from `earlier` to `self`. Negative when `earlier` is the later one.
    #[inline]
    pub fn nanos_since(&self, earlier: Timestamp) -> i64 {
        self.nanos.wrapping_sub(earlier.nanos) as i64
    }

    /// Signed seconds from `earlier` to `self`.
    #[inline]
    pub fn seconds_since(&self, earlier: Timestamp) -> f64 {
        self.nanos_since(earlier) as f64 / NANOS_PER_SEC
    }
}

#[inline]
fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

static STEADY_ORIGIN: Lazy<Instant> = Lazy::new(Instant::now);

/// Monotonic clock backed by [`Instant`], counting from the first use in this process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SteadyClock;

impl Clock for SteadyClock {
    const IS_STEADY: bool = true;
    const PERIOD: Period = Period::NANOSECOND;

    #[inline]
    fn now(&self) -> Timestamp {
        Timestamp::from_duration(STEADY_ORIGIN.elapsed())
    }
}

/// Wall clock counting from the Unix epoch. It can be adjusted while a process runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    const IS_STEADY: bool = false;
    const PERIOD: Period = Period::NANOSECOND;

    #[inline]
    fn now(&self) -> Timestamp {
        let nanos = Utc::now()
            .timestamp_nanos_opt()
            .map_or(0, |nanos| u64::try_from(nanos).unwrap_or(0));
        Timestamp::from_nanos(nanos)
    }
}

#[derive(Debug)]
struct ManualClockState {
    next: AtomicU64,
    tick: AtomicU64,
}

/// Deterministic clock for tests.
///
/// Every reading returns the current value and then advances it by the tick, so a sequence
/// of `N` readings is spaced exactly one tick apart. Clones share the same state, which lets
/// a test keep a handle to a clock that a timer owns.
#[derive(Clone, Debug)]
pub struct ManualClock {
    state: Arc<ManualClockState>,
}

impl ManualClock {
    /// Clock whose first reading is zero.
    pub fn new(tick: Duration) -> Self {
        Self::starting_at(Duration::ZERO, tick)
    }

    /// Clock whose first reading is `origin`.
    pub fn starting_at(origin: Duration, tick: Duration) -> Self {
        Self {
            state: Arc::new(ManualClockState {
                next: AtomicU64::new(saturating_nanos(origin)),
                tick: AtomicU64::new(saturating_nanos(tick)),
            }),
        }
    }

    /// Moves the next reading to `at`.
    pub fn set(&self, at: Duration) {
        self.state.next.store(saturating_nanos(at), Ordering::SeqCst);
    }

    /// Moves the next reading forward by `by` without consuming a tick.
    pub fn advance(&self, by: Duration) {
        self.state
            .next
            .fetch_add(saturating_nanos(by), Ordering::SeqCst);
    }

    /// Changes the step applied after each reading.
    pub fn set_tick(&self, tick: Duration) {
        self.state.tick.store(saturating_nanos(tick), Ordering::SeqCst);
    }

    /// The value the next reading will return.
    pub fn peek(&self) -> Timestamp {
        Timestamp::from_nanos(self.state.next.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    const IS_STEADY: bool = true;
    const PERIOD: Period = Period::NANOSECOND;

    #[inline]
    fn now(&self) -> Timestamp {
        let tick = self.state.tick.load(Ordering::SeqCst);
        Timestamp::from_nanos(self.state.next.fetch_add(tick, Ordering::SeqCst))
    }
}
