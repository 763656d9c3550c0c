use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::clock::{Clock, SteadyClock, Timestamp};
use crate::error::TimerError;
use crate::format::format_significant;

/// Significant digits used by [`SplitTimer::report`] when callers have no preference.
pub const DEFAULT_REPORT_PRECISION: usize = 15;

/// Records a start point plus up to `N` split points and turns them into `N` segment durations.
///
/// Slot 0 holds the start, slots `1..=N` hold the splits. A shared cursor names the next free
/// slot. [`split`](Self::split) only needs `&self`: the cursor is claimed with a single atomic
/// read-modify-write, so threads splitting the same timer always land in distinct slots.
/// [`start`](Self::start) takes `&mut self` because it must not race with splits.
///
/// The buffer is sized by `N` at compile time and is never reallocated.
pub struct SplitTimer<const N: usize, C: Clock = SteadyClock> {
    clock: C,
    start: AtomicU64,
    splits: [AtomicU64; N],
    cursor: AtomicUsize,
}

impl<const N: usize, C: Clock> SplitTimer<N, C> {
    const NON_EMPTY: () = assert!(N > 0, "a split timer needs room for at least one split");

    pub fn with_clock(clock: C, start: bool) -> Self {
        let () = Self::NON_EMPTY;

        let mut timer = Self {
            clock,
            start: AtomicU64::new(0),
            splits: std::array::from_fn(|_| AtomicU64::new(0)),
            cursor: AtomicUsize::new(0),
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

    /// Number of splits the timer can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Records slot 0 and rewinds the cursor, discarding the previous run.
    pub fn start(&mut self) {
        *self.start.get_mut() = self.clock.now().as_nanos();
        *self.cursor.get_mut() = 1;
        tracing::debug!("Split timer started with capacity {}", N);
    }

    /// Records a split.
    ///
    /// # Panics
    ///
    /// Panics when all `N` splits were already recorded since the last start. This check is
    /// active in every build profile.
    #[inline]
    pub fn split(&self) {
        if let Err(err) = self.try_split() {
            tracing::error!("{}", err);
            panic!("{}", err);
        }
    }

    /// Records a split and returns the slot it was written to.
    ///
    /// On overflow nothing is written and the cursor stays where it was.
    #[inline]
    pub fn try_split(&self) -> Result<usize, TimerError> {
        let index = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cursor| {
                (cursor <= N).then_some(cursor + 1)
            })
            .map_err(|_| TimerError::Overflow { capacity: N })?;

        let now = self.clock.now();
        if let Some(slot) = self.slot(index) {
            slot.store(now.as_nanos(), Ordering::Release);
        }
        tracing::trace!(slot = index, "Split recorded");

        Ok(index)
    }

    /// Segment durations in seconds: slot `i` minus slot `i - 1` for `i` in `1..=N`.
    ///
    /// Slots that were not written during the current run still hold older values.
    pub fn seconds(&self) -> [f64; N] {
        let start = self.timestamp(0);
        let splits: [Timestamp; N] = std::array::from_fn(|i| self.timestamp(i + 1));

        std::array::from_fn(|i| {
            let previous = if i == 0 { start } else { splits[i - 1] };
            splits[i].seconds_since(previous)
        })
    }

    /// Seconds from the start to the last slot.
    pub fn total_seconds(&self) -> f64 {
        self.timestamp(N).seconds_since(self.timestamp(0))
    }

    /// Writes all segment durations as a comma separated list with `precision`
    /// significant digits.
    pub fn report<W: Write>(&self, sink: &mut W, precision: usize) -> io::Result<()> {
        for (i, seconds) in self.seconds().iter().enumerate() {
            if i > 0 {
                sink.write_all(b",")?;
            }
            sink.write_all(format_significant(*seconds, precision).as_bytes())?;
        }
        sink.flush()
    }

    /// All `N + 1` slots in recording order.
    pub fn timestamps(&self) -> Vec<Timestamp> {
        (0..=N).map(|index| self.timestamp(index)).collect()
    }

    /// Timestamp stored in `index`, or zero past the end.
    #[inline]
    pub fn timestamp(&self, index: usize) -> Timestamp {
        self.slot(index)
            .map(|slot| Timestamp::from_nanos(slot.load(Ordering::Acquire)))
            .unwrap_or_default()
    }

    /// Next slot a split would claim. `N + 1` once the timer is full.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Splits recorded since the last start.
    #[inline]
    pub fn recorded(&self) -> usize {
        self.cursor().saturating_sub(1)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursor() > N
    }

    #[inline]
    fn slot(&self, index: usize) -> Option<&AtomicU64> {
        match index {
            0 => Some(&self.start),
            _ => self.splits.get(index - 1),
        }
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> Option<&mut AtomicU64> {
        match index {
            0 => Some(&mut self.start),
            _ => self.splits.get_mut(index - 1),
        }
    }
}

impl<const N: usize, C: Clock + Default> SplitTimer<N, C> {
    /// Creates a timer on the default clock, starting it right away if `start` is set.
    pub fn new(start: bool) -> Self {
        Self::with_clock(C::default(), start)
    }
}

impl<const N: usize, C: Clock + Default> Default for SplitTimer<N, C> {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Copies every slot and the current cursor value into a timer with its own cursor.
impl<const N: usize, C: Clock> Clone for SplitTimer<N, C> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            start: AtomicU64::new(self.start.load(Ordering::Acquire)),
            splits: std::array::from_fn(|i| AtomicU64::new(self.splits[i].load(Ordering::Acquire))),
            cursor: AtomicUsize::new(self.cursor()),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clock.clone_from(&source.clock);
        for index in 0..=N {
            let value = source.timestamp(index).as_nanos();
            if let Some(slot) = self.slot_mut(index) {
                *slot.get_mut() = value;
            }
        }
        *self.cursor.get_mut() = source.cursor();
    }
}

impl<const N: usize, C: Clock + fmt::Debug> fmt::Debug for SplitTimer<N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitTimer")
            .field("clock", &self.clock)
            .field("cursor", &self.cursor())
            .field("timestamps", &self.timestamps())
            .finish()
    }
}
