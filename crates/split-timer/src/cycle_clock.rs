use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

use crate::clock::{Clock, Period, Timestamp};

const CALIBRATION_ROUNDS: usize = 5;
const CALIBRATION_WINDOW: Duration = Duration::from_millis(10);

/// CPU cycle counter clock (RDTSC on x86/x86_64).
///
/// Cycle readings are converted to nanoseconds with a frequency measured once per process
/// against the monotonic clock. The measurement runs in [`CycleClock::new`], so readings
/// themselves never wait on it. The counter is not guaranteed to be synchronized across cores
/// or to tick at a constant rate on every CPU, so the clock does not claim to be steady.
#[derive(Copy, Clone, Debug)]
pub struct CycleClock {
    calibration: &'static Calibration,
}

#[derive(Debug)]
struct Calibration {
    /// Cycles per second.
    frequency: f64,
    baseline_cycles: u64,
}

static CALIBRATION: Lazy<Calibration> = Lazy::new(Calibration::measure);

impl Calibration {
    fn measure() -> Self {
        let mut frequencies = Vec::with_capacity(CALIBRATION_ROUNDS);

        for _ in 0..CALIBRATION_ROUNDS {
            let start_time = Instant::now();
            let start_cycles = read_cycles();

            // Busy wait keeps the core awake for a more stable reading
            while start_time.elapsed() < CALIBRATION_WINDOW {
                std::hint::spin_loop();
            }

            let end_cycles = read_cycles();
            let elapsed_secs = start_time.elapsed().as_secs_f64();
            let cycle_diff = end_cycles.wrapping_sub(start_cycles) as f64;

            frequencies.push(cycle_diff / elapsed_secs);
        }

        frequencies.sort_by(f64::total_cmp);
        let frequency = frequencies
            .get(frequencies.len() / 2)
            .copied()
            .filter(|hz| hz.is_finite() && *hz > 0.0)
            .unwrap_or(1_000_000_000.0);

        tracing::debug!(
            "Cycle clock calibrated at {:.3} GHz over {} rounds",
            frequency / 1e9,
            CALIBRATION_ROUNDS
        );

        Self {
            frequency,
            baseline_cycles: read_cycles(),
        }
    }
}

impl CycleClock {
    /// Returns a handle to the process-wide calibration, measuring it first if needed.
    ///
    /// The first call in a process busy-waits for the calibration rounds.
    pub fn new() -> Self {
        Self {
            calibration: Lazy::force(&CALIBRATION),
        }
    }

    /// Measured counter frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.calibration.frequency
    }

    #[inline]
    pub fn cycles_to_nanos(&self, cycles: u64) -> u64 {
        (cycles as f64 / self.calibration.frequency * 1_000_000_000.0) as u64
    }
}

impl Clock for CycleClock {
    const IS_STEADY: bool = false;
    const PERIOD: Period = Period::NANOSECOND;

    #[inline]
    fn now(&self) -> Timestamp {
        let elapsed = read_cycles().saturating_sub(self.calibration.baseline_cycles);
        Timestamp::from_nanos(self.cycles_to_nanos(elapsed))
    }
}

#[inline]
fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        // SAFETY: RDTSC has no preconditions on x86_64.
        unsafe { std::arch::x86_64::_rdtsc() }
    }
    #[cfg(target_arch = "x86")]
    {
        // SAFETY: RDTSC has no preconditions on x86.
        unsafe { std::arch::x86::_rdtsc() }
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    {
        // No portable cycle counter, count nanoseconds instead.
        crate::clock::SteadyClock.now().as_nanos()
    }
}
