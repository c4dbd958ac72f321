use std::fmt;

#[derive(Debug)]
pub enum WeldError {
    File(String),
    MalformedInput(String),
    CapacityExceeded { requested: usize, remaining: usize },
    IndexOverflow(usize),
}

impl fmt::Display for WeldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeldError::File(msg) => write!(f, "File Error: {}", msg),
            WeldError::MalformedInput(msg) => write!(f, "Malformed Input: {}", msg),
            WeldError::CapacityExceeded {
                requested,
                remaining,
            } => write!(
                f,
                "Capacity Exceeded: requested {} bytes with {} remaining",
                requested, remaining
            ),
            WeldError::IndexOverflow(count) => write!(
                f,
                "Index Overflow: {} unique vertices do not fit in 16-bit indices",
                count
            ),
        }
    }
}

impl std::error::Error for WeldError {}

pub type WeldResult<T> = Result<T, WeldError>;
