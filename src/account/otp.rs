//! One-time confirmation codes for debits.

use std::fmt;

use rand::Rng;

/// A 4-digit confirmation code.
///
/// Drawn from a non-cryptographic generator. It adds a confirmation step in
/// front of debits and is not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Otp(String);

impl Otp {
    const RANGE: std::ops::RangeInclusive<u16> = 1000..=9999;

    fn generate(rng: &mut impl Rng) -> Self {
        Otp(rng.random_range(Self::RANGE).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holds at most one outstanding OTP.
///
/// A new code replaces the previous one. Codes never expire and are not
/// consumed by verification.
#[derive(Debug, Default)]
pub struct OtpGuard {
    current: Option<Otp>,
}

impl OtpGuard {
    pub fn issue(&mut self, rng: &mut impl Rng) -> &Otp {
        self.current.insert(Otp::generate(rng))
    }

    pub fn current(&self) -> Option<&Otp> {
        self.current.as_ref()
    }

    /// Exact string comparison against the outstanding code; false when none was issued.
    pub fn verify(&self, candidate: &str) -> bool {
        self.current
            .as_ref()
            .is_some_and(|otp| otp.as_str() == candidate)
    }
}
