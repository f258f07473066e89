//! Result of ticking a node.

/// Outcome of a single node evaluation.
///
/// Conditions answer immediately and actions commit immediately, so two
/// states are enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Maps a boolean check onto a status.
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        Status::from_bool(value)
    }
}
