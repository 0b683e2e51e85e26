//! Result types for OTP verification

/// What happened to a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; the record is gone
    Verified,
    /// Wrong code; the record survives with this many attempts left
    Mismatch { remaining_attempts: u32 },
    /// Attempt budget used up; the record is gone
    Exhausted,
    /// No live code for the identifier
    Missing,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }
}
