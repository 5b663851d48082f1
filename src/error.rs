use thiserror::Error;

/// Returned by [`Deque::at`](crate::Deque::at) and
/// [`Deque::at_mut`](crate::Deque::at_mut) when the index is not below the
/// current length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("index {index} out of range for deque of length {len}")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}
