//! Monetary amounts in minor currency units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// ISO-4217 alphabetic currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses a three-letter code, normalising to uppercase.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                format!("'{}' is not a three-letter ISO-4217 code", code),
            ));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Uppercase form, as Mercado Pago expects it (`BRL`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, as Stripe expects it (`brl`).
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Number of minor units per major unit.
    ///
    /// Zero-decimal currencies follow the ISO-4217 table; everything else
    /// the app sells in uses two decimals.
    pub fn minor_units_per_major(&self) -> i64 {
        match self.0.as_str() {
            "CLP" | "JPY" | "KRW" | "PYG" | "VND" => 1,
            _ => 100,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An amount of money held as an integer number of minor units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount_minor: i64,
    currency: CurrencyCode,
}

impl Money {
    /// Creates a strictly positive amount.
    pub fn new(amount_minor: i64, currency: CurrencyCode) -> Result<Self, ValidationError> {
        if amount_minor <= 0 {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("must be positive, got {}", amount_minor),
            ));
        }
        Ok(Self {
            amount_minor,
            currency,
        })
    }

    pub fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Amount in major units (`5000` BRL cents → `50.0`).
    pub fn to_major_units(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_units_per_major() as f64
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    pub fn checked_mul(&self, quantity: u32) -> Option<Money> {
        self.amount_minor
            .checked_mul(i64::from(quantity))
            .map(|amount_minor| Money {
                amount_minor,
                currency: self.currency.clone(),
            })
    }

    /// Adds two amounts of the same currency, returning `None` on a
    /// currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount_minor| Money {
                amount_minor,
                currency: self.currency.clone(),
            })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_major = self.currency.minor_units_per_major();
        if per_major == 1 {
            write!(f, "{} {}", self.amount_minor, self.currency)
        } else {
            write!(
                f,
                "{}.{:02} {}",
                self.amount_minor / per_major,
                self.amount_minor % per_major,
                self.currency
            )
        }
    }
}
