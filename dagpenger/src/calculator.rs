//! The dagpenger calculator.
//!
//! A person is entitled to dagpenger if either
//! * their income over the last 3 years totals at least 3G, or
//! * their income in the last year is at least 1.5G.
//!
//! If they are entitled, the daily rate is computed from an annual income basis, which is the
//! larger of the last year's income and the average over the last 3 years. If the last year's
//! income is the larger and exceeds 6G, the basis is capped at 6G. The basis is spread over
//! [`ANNUAL_WORKDAYS`] working days, not 365 calendar days, and rounded up to a whole krone.

use crate::{
    base_amount::BaseAmount,
    caseworker::{Outcome, Specialization},
    income::AnnualIncome,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The number of working days in a Norwegian year.
pub const ANNUAL_WORKDAYS: u32 = 260;

/// How many of the most recent years are averaged.
const AVERAGE_YEARS: u32 = 3;

/// The way the annual income basis for the daily rate is chosen.
#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, Hash, EnumString, Deserialize, Serialize,
)]
pub enum CalculationMethod {
    /// The most recent annual income.
    #[strum(serialize = "SISTE_ÅRSLØNN")]
    #[serde(rename = "SISTE_ÅRSLØNN")]
    LatestAnnualIncome,
    /// The average income over the last 3 years.
    #[strum(serialize = "GJENNOMSNITTET_AV_TRE_ÅR")]
    #[serde(rename = "GJENNOMSNITTET_AV_TRE_ÅR")]
    ThreeYearAverage,
    /// The most recent income exceeds 6G, so the basis is capped at 6G.
    #[strum(serialize = "MAKS_ÅRLIG_DAGPENGERGRUNNLAG")]
    #[serde(rename = "MAKS_ÅRLIG_DAGPENGERGRUNNLAG")]
    MaxAnnualBasis,
}

/// Computes entitlement and daily rate from a register of annual incomes.
#[derive(Clone, Debug)]
pub struct Calculator {
    base_amount: BaseAmount,
    /// Registered incomes, most recent first.
    incomes: Vec<AnnualIncome>,
}

impl Calculator {
    pub fn new(base_amount: BaseAmount) -> Self {
        Self {
            base_amount,
            incomes: vec![],
        }
    }

    /// The base amount this calculator applies.
    pub fn base_amount(&self) -> BaseAmount {
        self.base_amount
    }

    /// Register an annual income.
    pub fn add_income(&mut self, income: impl Into<AnnualIncome>) {
        self.incomes.push(income.into());
        self.sort_newest_first();
    }

    /// Registered incomes, most recent first.
    pub fn incomes(&self) -> &[AnnualIncome] {
        &self.incomes
    }

    /// The income at position `index` in the register, where 0 is the most recent year.
    pub fn income_at(&self, index: usize) -> Option<&AnnualIncome> {
        self.incomes.get(index)
    }

    /// Sum the `years` most recent incomes.
    ///
    /// If fewer than `years` incomes are registered, the sum is 0.
    pub fn sum_recent(&self, years: usize) -> f64 {
        if years > self.incomes.len() {
            return 0.0;
        }
        self.incomes[..years].iter().map(AnnualIncome::amount).sum()
    }

    /// Is the person entitled to dagpenger at all?
    pub fn is_entitled(&self) -> bool {
        if self.sum_recent(AVERAGE_YEARS as usize)
            >= self.base_amount.total_for_years(AVERAGE_YEARS)
        {
            return true;
        }
        match self.latest() {
            Some(latest) => latest >= self.base_amount.minimum_income_for_entitlement(),
            None => false,
        }
    }

    /// Choose how the annual income basis is computed.
    ///
    /// Returns [`None`] if no incomes are registered.
    pub fn calculation_method(&self) -> Option<CalculationMethod> {
        let latest = self.latest()?;
        let average = self.recent_average();
        let method = if latest > average {
            if latest > self.base_amount.max_annual_basis() {
                CalculationMethod::MaxAnnualBasis
            } else {
                CalculationMethod::LatestAnnualIncome
            }
        } else {
            CalculationMethod::ThreeYearAverage
        };
        tracing::debug!(%method, latest, average, "calculation method");
        Some(method)
    }

    /// The annual amount the daily rate is computed from, per [`calculation_method`](Self::calculation_method).
    pub fn annual_basis(&self) -> f64 {
        match self.calculation_method() {
            Some(CalculationMethod::LatestAnnualIncome) => self.latest().unwrap_or_default(),
            Some(CalculationMethod::ThreeYearAverage) => self.recent_average(),
            Some(CalculationMethod::MaxAnnualBasis) => self.base_amount.max_annual_basis(),
            None => 0.0,
        }
    }

    /// The daily rate the person is entitled to, in whole kroner.
    ///
    /// A person without entitlement gets a daily rate of 0.
    pub fn daily_rate(&self) -> f64 {
        if !self.is_entitled() {
            return 0.0;
        }
        (self.annual_basis() / ANNUAL_WORKDAYS as f64).ceil()
    }

    /// Package the result of this calculation for review by a caseworker.
    pub fn outcome(&self) -> Outcome {
        let method = self.calculation_method();
        let category = if !self.is_entitled() {
            Specialization::LowIncomeRejection
        } else if method == Some(CalculationMethod::MaxAnnualBasis) {
            Specialization::GrantedMaxRate
        } else {
            Specialization::Granted
        };
        Outcome::new(self.annual_basis(), self.daily_rate(), method, category)
    }

    fn latest(&self) -> Option<f64> {
        self.income_at(0).map(AnnualIncome::amount)
    }

    fn recent_average(&self) -> f64 {
        self.sum_recent(AVERAGE_YEARS as usize) / AVERAGE_YEARS as f64
    }

    fn sort_newest_first(&mut self) {
        self.incomes.sort_by_key(AnnualIncome::year);
        self.incomes.reverse();
    }
}
