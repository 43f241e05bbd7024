use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when turning user input into an [`Amount`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmountError {
    #[error("'{0}' is not a valid amount")]
    Invalid(String),

    #[error("amount must be finite, got {0}")]
    NonFinite(f64),

    #[error("amount {0} is out of range")]
    OutOfRange(f64),
}

/// Fixed-point currency value with 2 decimal places, stored as a count of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 100;

    pub const ZERO: Amount = Amount(0);

    /// Round a float to the nearest cent, rejecting NaN, infinities and
    /// values that do not fit in the cent counter.
    pub fn try_from_float(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NonFinite(value));
        }
        let scaled = (value * Self::SCALE as f64).round();
        if scaled.abs() >= i64::MAX as f64 {
            return Err(AmountError::OutOfRange(value));
        }
        Ok(Amount(scaled as i64))
    }

    pub fn from_cents(cents: i64) -> Self {
        Amount(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// `None` when the sum does not fit in the cent counter.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / Self::SCALE as u64;
        let frac = abs % Self::SCALE as u64;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| AmountError::Invalid(trimmed.to_string()))?;
        Self::try_from_float(value)
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, amount| acc + amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cents_preserves_value() {
        assert_eq!(Amount::from_cents(12345).cents(), 12345);
    }

    #[test]
    fn from_float_converts_correctly() {
        assert_eq!(Amount::try_from_float(100.0), Ok(Amount::from_cents(10_000)));
        assert_eq!(Amount::try_from_float(1.5), Ok(Amount::from_cents(150)));
        assert_eq!(Amount::try_from_float(0.01), Ok(Amount::from_cents(1)));
    }

    #[test]
    fn from_float_rounds_to_nearest_cent() {
        assert_eq!(Amount::try_from_float(1.236), Ok(Amount::from_cents(124)));
        assert_eq!(Amount::try_from_float(1.234), Ok(Amount::from_cents(123)));
        assert_eq!(Amount::try_from_float(0.1 + 0.2), Ok(Amount::from_cents(30)));
    }

    #[test]
    fn from_float_handles_negative() {
        assert_eq!(Amount::try_from_float(-50.25), Ok(Amount::from_cents(-5025)));
    }

    #[test]
    fn from_float_rejects_non_finite() {
        assert!(matches!(
            Amount::try_from_float(f64::NAN),
            Err(AmountError::NonFinite(_))
        ));
        assert!(matches!(
            Amount::try_from_float(f64::INFINITY),
            Err(AmountError::NonFinite(_))
        ));
    }

    #[test]
    fn from_float_rejects_out_of_range() {
        assert!(matches!(
            Amount::try_from_float(1e300),
            Err(AmountError::OutOfRange(_))
        ));
    }

    #[test]
    fn parse_accepts_plain_and_padded_numbers() {
        assert_eq!("42".parse::<Amount>(), Ok(Amount::from_cents(4200)));
        assert_eq!(" 7.5 ".parse::<Amount>(), Ok(Amount::from_cents(750)));
        assert_eq!("-3".parse::<Amount>(), Ok(Amount::from_cents(-300)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            "ten".parse::<Amount>(),
            Err(AmountError::Invalid("ten".to_string()))
        );
        assert!(matches!("inf".parse::<Amount>(), Err(AmountError::NonFinite(_))));
    }

    #[test]
    fn display_formats_positive() {
        assert_eq!(Amount::from_cents(10_000).to_string(), "100.00");
        assert_eq!(Amount::from_cents(150).to_string(), "1.50");
        assert_eq!(Amount::from_cents(1).to_string(), "0.01");
        assert_eq!(Amount::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn display_formats_negative() {
        assert_eq!(Amount::from_cents(-5000).to_string(), "-50.00");
        assert_eq!(Amount::from_cents(-50).to_string(), "-0.50");
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn arithmetic() {
        let mut a = Amount::from_cents(100);
        a += Amount::from_cents(50);
        assert_eq!(a, Amount::from_cents(150));
        assert_eq!(-a, Amount::from_cents(-150));
        assert_eq!(a + -a, Amount::ZERO);
    }

    #[test]
    fn checked_add_detects_overflow() {
        let big = Amount::from_cents(i64::MAX - 1);
        assert_eq!(
            big.checked_add(Amount::from_cents(1)),
            Some(Amount::from_cents(i64::MAX))
        );
        assert_eq!(big.checked_add(Amount::from_cents(2)), None);
        assert_eq!(Amount::from_cents(-5).checked_add(Amount::from_cents(i64::MIN)), None);
    }

    #[test]
    fn sum() {
        let total: Amount = [100, -30, 5].into_iter().map(Amount::from_cents).sum();
        assert_eq!(total, Amount::from_cents(75));
    }

    #[test]
    fn negative_ordering() {
        let negative = Amount::from_cents(-100);
        let positive = Amount::from_cents(100);
        assert!(negative < Amount::ZERO);
        assert!(Amount::ZERO < positive);
    }
}
