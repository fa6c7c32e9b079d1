use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("tracking was cancelled before the transaction reached a terminal state")]
    Cancelled,
}
