use std::io::{self, Write};

use crate::clock::{Clock, SteadyClock, Timestamp};
use crate::format::format_fixed;

/// Column width used by [`IntervalTimer::formatted`] inside reports.
pub const DEFAULT_FORMAT_WIDTH: usize = 14;
/// Column width used by [`IntervalTimer::report`] when callers have no preference.
pub const DEFAULT_REPORT_WIDTH: usize = 15;

/// Measures the time between one start and one stop.
///
/// Nothing is validated: reading [`seconds`](Self::seconds) before both points were captured
/// returns the difference of whatever is stored, which starts out as zero.
#[derive(Debug, Clone)]
pub struct IntervalTimer<C: Clock = SteadyClock> {
    clock: C,
    start: Timestamp,
    stop: Timestamp,
}

impl<C: Clock + Default> IntervalTimer<C> {
    /// Creates a timer on the default clock, starting it right away if `start` is set.
    pub fn new(start: bool) -> Self {
        Self::with_clock(C::default(), start)
    }
}

impl<C: Clock + Default> Default for IntervalTimer<C> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<C: Clock> IntervalTimer<C> {
    pub fn with_clock(clock: C, start: bool) -> Self {
        let mut timer = Self {
            clock,
            start: Timestamp::ZERO,
            stop: Timestamp::ZERO,
        };
        if start {
            timer.start();
        }
        timer
    }

    /// Whether the underlying clock is steady.
    #[inline]
    pub fn steady() -> bool {
        C::IS_STEADY
    }

    /// Resolution of the underlying clock in microseconds.
    #[inline]
    pub fn resolution_us() -> f64 {
        C::PERIOD.as_micros()
    }

    #[inline]
    pub fn start(&mut self) {
        self.start = self.clock.now();
    }

    #[inline]
    pub fn stop(&mut self) {
        self.stop = self.clock.now();
    }

    #[inline]
    pub fn start_timestamp(&self) -> Timestamp {
        self.start
    }

    #[inline]
    pub fn stop_timestamp(&self) -> Timestamp {
        self.stop
    }

    /// Elapsed seconds from start to stop.
    #[inline]
    pub fn seconds(&self) -> f64 {
        self.stop.seconds_since(self.start)
    }

    /// Elapsed seconds in fixed point with `width - 5` decimals, right-aligned in `width`.
    pub fn formatted(&self, width: usize) -> String {
        format_fixed(self.seconds(), width, width.saturating_sub(5))
    }

    /// Writes the interval as one column of a comma separated row.
    ///
    /// The last column of a row gets a leading space and a newline instead of the comma.
    pub fn report<W: Write>(&self, sink: &mut W, last: bool, width: usize) -> io::Result<()> {
        let column = if last {
            format!(" {}\n", self.formatted(DEFAULT_FORMAT_WIDTH))
        } else {
            format!("{},", self.formatted(DEFAULT_FORMAT_WIDTH))
        };
        write!(sink, "{:>width$}", column, width = width)?;
        sink.flush()
    }
}
