//! Configuration management

use std::io::{self, Write};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use split_timer::{Clock, IntervalTimer, SplitTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub start_immediately: bool,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Column width for interval reports.
    pub interval_width: usize,
    /// Significant digits for split reports.
    pub split_precision: usize,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            start_immediately: false,
            report: ReportSettings::default(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            interval_width: split_timer::DEFAULT_REPORT_WIDTH,
            split_precision: split_timer::DEFAULT_REPORT_PRECISION,
        }
    }
}

impl TimerConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TimerConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn interval_timer<C: Clock + Default>(&self) -> IntervalTimer<C> {
        IntervalTimer::new(self.start_immediately)
    }

    pub fn split_timer<const N: usize, C: Clock + Default>(&self) -> SplitTimer<N, C> {
        SplitTimer::new(self.start_immediately)
    }

    pub fn report_interval<C: Clock, W: Write>(
        &self,
        timer: &IntervalTimer<C>,
        sink: &mut W,
        last: bool,
    ) -> io::Result<()> {
        timer.report(sink, last, self.report.interval_width)
    }

    pub fn report_splits<const N: usize, C: Clock, W: Write>(
        &self,
        timer: &SplitTimer<N, C>,
        sink: &mut W,
    ) -> io::Result<()> {
        timer.report(sink, self.report.split_precision)
    }
}
