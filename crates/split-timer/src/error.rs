use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    /// More splits were requested than the timer has slots for.
    #[error("split timer overflows {capacity} splits")]
    Overflow { capacity: usize },
}
