// src/aggregate/wage.rs

use anyhow::{bail, Result};
use std::{fmt, str::FromStr};

/// An hourly wage in whole cents, parsed from the fixed `DDD.DD` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wage {
    cents: u32,
}

impl Wage {
    pub fn from_cents(cents: u32) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u32 {
        self.cents
    }
}

impl FromStr for Wage {
    type Err = anyhow::Error;

    /// Exactly three integer digits, a dot, and two fraction digits.
    fn from_str(s: &str) -> Result<Self> {
        let b = s.as_bytes();
        let well_formed = b.len() == 6
            && b[3] == b'.'
            && b[..3].iter().all(u8::is_ascii_digit)
            && b[4..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            bail!("wage {:?} is not in DDD.DD format", s);
        }
        let digit = |i: usize| u32::from(b[i] - b'0');
        let whole = digit(0) * 100 + digit(1) * 10 + digit(2);
        let frac = digit(4) * 10 + digit(5);
        Ok(Self::from_cents(whole * 100 + frac))
    }
}

impl fmt::Display for Wage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}
