//! Domain primitives: Pesos, EntityKind.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Sub};

/// An amount of money in whole pesos, the store's minor-less currency unit.
///
/// Prices and costs are always integral; fractional values only appear in
/// derived ratios (margin, ROI, markup), which use [`Decimal`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pesos(pub i64);

impl Pesos {
    pub const ZERO: Pesos = Pesos(0);

    /// Create a Pesos amount.
    pub fn new(amount: i64) -> Self {
        Pesos(amount)
    }

    /// Form-entry constructor: negative input is invalid and clamps to zero.
    pub fn clamped(amount: i64) -> Self {
        Pesos(amount.max(0))
    }

    /// Get the underlying amount.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Inventory value of `qty` units at this unit cost.
    pub fn times_qty(&self, qty: u32) -> Pesos {
        Pesos(self.0.saturating_mul(i64::from(qty)))
    }

    /// Lossless decimal view, for ratio math.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl Add for Pesos {
    type Output = Pesos;

    fn add(self, rhs: Pesos) -> Pesos {
        Pesos(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Pesos {
    type Output = Pesos;

    fn sub(self, rhs: Pesos) -> Pesos {
        Pesos(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Pesos {
    fn sum<I: Iterator<Item = Pesos>>(iter: I) -> Pesos {
        iter.fold(Pesos::ZERO, |acc, p| acc + p)
    }
}

impl std::fmt::Display for Pesos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Kind of record a change notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Asset,
    Settings,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Product => write!(f, "product"),
            EntityKind::Asset => write!(f, "asset"),
            EntityKind::Settings => write!(f, "settings"),
        }
    }
}
