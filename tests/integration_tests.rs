//! End-to-end tests of the timers through the public facade

use std::time::Duration;

use splitwatch::{IntervalTimer, ManualClock, SplitTimer, SteadyClock, TimerConfig};

fn fifty_ms_clock() -> ManualClock {
    ManualClock::starting_at(Duration::from_secs(10), Duration::from_millis(50))
}

#[test]
fn test_three_splits_at_fifty_ms() {
    let mut timer = SplitTimer::<3, _>::with_clock(fifty_ms_clock(), false);

    timer.start();
    timer.split();
    timer.split();
    timer.split();

    let seconds = timer.seconds();
    assert_eq!(seconds.len(), 3);
    for split in seconds {
        assert!(split > 0.04 && split < 0.06, "split {}", split);
    }

    let mut out = Vec::new();
    timer.report(&mut out, 15).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0.05,0.05,0.05");
}

#[test]
fn test_interval_of_1234_ms() {
    let clock = ManualClock::new(Duration::from_millis(1234));
    let mut timer = IntervalTimer::with_clock(clock, false);

    timer.start();
    timer.stop();

    assert!((timer.seconds() - 1.234).abs() < 1e-9);
}

#[test]
fn test_split_copy_construct() {
    let x = SplitTimer::<3, _>::with_clock(fifty_ms_clock(), true);
    x.split();
    x.split();
    let y = x.clone();

    assert_eq!(y.cursor(), 3);
    assert_eq!(x.timestamp(0), y.timestamp(0));
    assert_eq!(x.timestamp(1), y.timestamp(1));
    assert_eq!(x.timestamp(2), y.timestamp(2));
}

#[test]
fn test_split_copy_assign() {
    let x = SplitTimer::<3, _>::with_clock(fifty_ms_clock(), true);
    x.split();
    x.split();
    let mut y = SplitTimer::<3, _>::with_clock(fifty_ms_clock(), false);

    y.clone_from(&x);
    assert_eq!(y.cursor(), 3);
    assert_eq!(x.timestamp(0), y.timestamp(0));
    assert_eq!(x.timestamp(1), y.timestamp(1));
    assert_eq!(x.timestamp(2), y.timestamp(2));

    // The copy fills its last slot without touching the original
    y.split();
    assert!(y.is_full());
    assert!(!x.is_full());
    assert_eq!(x.timestamp(3).as_nanos(), 0);
}

#[test]
fn test_restart_after_full_run() {
    let clock = fifty_ms_clock();
    let mut timer = SplitTimer::<2, _>::with_clock(clock.clone(), true);
    timer.split();
    timer.split();
    assert!(timer.try_split().is_err());

    clock.set_tick(Duration::from_millis(200));
    timer.start();
    assert_eq!(timer.cursor(), 1);
    timer.split();
    timer.split();

    for split in timer.seconds() {
        assert!((split - 0.2).abs() < 1e-9, "split {}", split);
    }
}

#[test]
fn test_real_clock_measures_sleep() {
    let mut timer = SplitTimer::<2, SteadyClock>::new(true);
    std::thread::sleep(Duration::from_millis(5));
    timer.split();
    std::thread::sleep(Duration::from_millis(5));
    timer.split();

    for split in timer.seconds() {
        assert!(split >= 0.005, "split {}", split);
    }

    timer.start();
    assert_eq!(timer.recorded(), 0);
}

#[test]
fn test_config_round_trip_drives_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timer.toml");
    let path = path.to_str().unwrap();

    let mut config = TimerConfig::default();
    config.report.split_precision = 2;
    config.report.interval_width = 20;
    config.save_to_file(path).unwrap();

    let loaded = TimerConfig::load_from_file(path).unwrap();
    assert_eq!(loaded, config);

    let clock = ManualClock::new(Duration::from_nanos(33_333_333));
    let timer = SplitTimer::<2, _>::with_clock(clock.clone(), true);
    timer.split();
    timer.split();

    let mut out = Vec::new();
    loaded.report_splits(&timer, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0.033,0.033");

    let mut interval = IntervalTimer::with_clock(clock, true);
    interval.stop();
    let mut out = Vec::new();
    loaded.report_interval(&interval, &mut out, true).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "        0.033333333\n");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(TimerConfig::load_from_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_clock_guarantees() {
    assert!(SplitTimer::<1, SteadyClock>::steady());
    assert!(!SplitTimer::<1, splitwatch::SystemClock>::steady());
    assert!(!IntervalTimer::<splitwatch::CycleClock>::steady());
    assert!((SplitTimer::<1, SteadyClock>::resolution_us() - 0.001).abs() < 1e-12);
}

#[test]
fn test_summary_of_segments() {
    let timer = SplitTimer::<2, _>::with_clock(fifty_ms_clock(), true);
    timer.split();
    timer.split();

    assert_eq!(
        splitwatch::utils::segments_summary(&timer.seconds()),
        "50.00ms | 50.00ms"
    );
}
