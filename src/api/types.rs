use std::fmt::Display;

/// Lifecycle of a verification job on the explorer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobState {
    Submitted,
    Pending,
    Verified,
    Failed,
    TimedOut,
}

impl JobState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Verified | Self::Failed | Self::TimedOut)
    }
}

impl Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submitted => write!(f, "Submitted"),
            Self::Pending => write!(f, "Pending"),
            Self::Verified => write!(f, "Verified"),
            Self::Failed => write!(f, "Failed"),
            Self::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// Outcome of a single status query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatusCheck {
    /// Carries the explorer's receipt text.
    Verified(String),
    Failed(String),
    /// Carries the explorer's progress text.
    Pending(String),
}

impl StatusCheck {
    pub const fn state(&self) -> JobState {
        match self {
            Self::Verified(_) => JobState::Verified,
            Self::Failed(_) => JobState::Failed,
            Self::Pending(_) => JobState::Pending,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Verified(m) | Self::Failed(m) | Self::Pending(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!JobState::Submitted.is_terminal());
        assert!(!JobState::Pending.is_terminal());
        assert!(JobState::Verified.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(JobState::TimedOut.is_terminal());
    }
}
