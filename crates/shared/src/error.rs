use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTokenError {
    #[error("unknown quarter '{0}' (expected one of: Fall 2025, Winter 2026, Spring 2026)")]
    Quarter(String),
    #[error("unknown weekday '{0}' (expected monday through friday)")]
    Weekday(String),
    #[error("unknown time block '{0}' (expected morning, afternoon or evening)")]
    TimeBlock(String),
}
