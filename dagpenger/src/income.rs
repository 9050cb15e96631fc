//! A person's income over one calendar year.

use anyhow::Error;
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Income (årslønn) earned during a single calendar year.
#[derive(Clone, Copy, Debug, PartialEq, From, Deserialize, Serialize)]
#[serde(try_from = "UncheckedIncome")]
pub struct AnnualIncome {
    year: i32,
    amount: f64,
}

/// The serialized form of an [`AnnualIncome`], before its amount has been checked.
#[derive(Deserialize)]
struct UncheckedIncome {
    year: i32,
    amount: f64,
}

impl TryFrom<UncheckedIncome> for AnnualIncome {
    type Error = Error;

    fn try_from(income: UncheckedIncome) -> Result<Self, Self::Error> {
        Ok(Self {
            year: income.year,
            amount: check_amount(income.amount)?,
        })
    }
}

/// Incomes are a non-negative, finite number of kroner.
fn check_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::msg(format!(
            "income must be a non-negative number of kroner, got {amount}"
        )))
    }
}

impl AnnualIncome {
    pub fn new(year: i32, amount: f64) -> Self {
        Self { year, amount }
    }

    /// The calendar year this income belongs to.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The income for the year, in kroner.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl Display for AnnualIncome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}={}", self.year, self.amount)
    }
}

/// Parse an income of the form `YEAR=AMOUNT`, e.g. `2024=465000`.
impl FromStr for AnnualIncome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, amount) = s
            .split_once('=')
            .ok_or_else(|| Error::msg(format!("expected YEAR=AMOUNT, got {s:?}")))?;
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|err| Error::msg(format!("invalid year {year:?}: {err}")))?;
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|err| Error::msg(format!("invalid amount {amount:?}: {err}")))?;
        Ok(Self {
            year,
            amount: check_amount(amount)?,
        })
    }
}
