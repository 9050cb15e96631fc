//! Caseworkers (saksbehandlere) who approve dagpenger calculations.
//!
//! Every caseworker specializes in one category of outcome, and only approves outcomes within
//! that category.

use crate::calculator::CalculationMethod;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The categories of outcome a caseworker can specialize in.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Deserialize,
    Serialize,
)]
pub enum Specialization {
    /// Rejected because the person's income is too low.
    #[strum(serialize = "AVSLAG_FOR_LAV_INNTEKT")]
    #[serde(rename = "AVSLAG_FOR_LAV_INNTEKT")]
    LowIncomeRejection,
    #[strum(serialize = "INNVILGET")]
    #[serde(rename = "INNVILGET")]
    Granted,
    /// Granted, with the daily rate capped at the maximum.
    #[strum(serialize = "INNVILGET_MED_MAKSSATS")]
    #[serde(rename = "INNVILGET_MED_MAKSSATS")]
    GrantedMaxRate,
}

/// The outcome of a dagpenger calculation, awaiting approval.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Outcome {
    /// The annual income the daily rate was computed from.
    annual_basis: f64,
    daily_rate: f64,
    method: Option<CalculationMethod>,
    category: Specialization,
    approved: bool,
}

impl Outcome {
    /// A new, unapproved outcome.
    pub fn new(
        annual_basis: f64,
        daily_rate: f64,
        method: Option<CalculationMethod>,
        category: Specialization,
    ) -> Self {
        Self {
            annual_basis,
            daily_rate,
            method,
            category,
            approved: false,
        }
    }

    pub fn annual_basis(&self) -> f64 {
        self.annual_basis
    }

    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    pub fn method(&self) -> Option<CalculationMethod> {
        self.method
    }

    /// Which specialization is needed to process this outcome.
    pub fn category(&self) -> Specialization {
        self.category
    }

    /// Has a caseworker approved this outcome?
    pub fn is_approved(&self) -> bool {
        self.approved
    }
}

/// A caseworker who reviews outcomes within their specialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caseworker {
    specialization: Specialization,
}

impl Caseworker {
    pub fn new(specialization: Specialization) -> Self {
        Self { specialization }
    }

    pub fn specialization(&self) -> Specialization {
        self.specialization
    }

    /// Review an outcome.
    ///
    /// The outcome is approved if it falls within this caseworker's specialization. Outcomes
    /// outside the specialization are left untouched.
    ///
    /// # Returns
    ///
    /// Whether the outcome was approved.
    pub fn process(&self, outcome: &mut Outcome) -> bool {
        if outcome.category != self.specialization {
            tracing::info!(
                "caseworker for {} cannot process outcome in category {}",
                self.specialization,
                outcome.category
            );
            return false;
        }
        outcome.approved = true;
        tracing::info!("outcome approved by caseworker for {}", self.specialization);
        true
    }
}
