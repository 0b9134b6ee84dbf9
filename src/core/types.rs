use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payment counts accepted by the engine: ordinary monthly pay, or the
/// 14-installment schedule with the two seasonal extra payments.
pub const ALLOWED_PAYMENTS_PER_YEAR: [u32; 2] = [12, 14];

/// Which year the user-entered salary belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BaselineStrategy {
    /// The entered salary is the baseline-year salary; every schedule entry
    /// compounds on top of it.
    Forward,
    /// The entered salary already includes the first schedule entry's raise.
    /// The baseline year is reconstructed by dividing that raise back out,
    /// and the underpayment accrued during the first year is reported as an
    /// arrears bucket.
    BackwardDerived,
}

/// How the variable-component toggle maps onto schedule entries.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VariablePolicy {
    /// The toggle gates the variable rate of every entry.
    AllYears,
    /// The toggle gates only the named year; every other entry applies its
    /// variable rate unconditionally.
    SingleYear(i32),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateScheduleEntry {
    pub year: i32,
    /// Guaranteed increase as a fraction (0.02 = 2%).
    pub fixed_rate: f64,
    /// Inflation-linked increase as a fraction, applied per the active policy.
    #[serde(default)]
    pub variable_rate: f64,
    /// Legally enacted, as opposed to projected or under negotiation.
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalculationConfig {
    /// Gross monthly salary in currency units, strictly positive.
    pub base_monthly_salary: f64,
    pub payments_per_year: u32,
    pub include_variable_component: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBreakdown {
    pub year: i32,
    pub fixed_rate_percent: f64,
    pub variable_rate_percent: f64,
    /// Growth versus the baseline year, not versus the previous year.
    pub cumulative_total_percent: f64,
    pub annual_gross_total: f64,
    pub monthly_gross_total: f64,
    pub delta_annual_vs_previous: f64,
    pub delta_monthly_vs_previous: f64,
    pub confirmed: bool,
}

/// One-time lump sum owed for having been paid at the old rate during a year
/// whose raise is retroactive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrearsBucket {
    pub year: i32,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Baseline year first, then one row per schedule entry, ascending.
    pub years: Vec<YearBreakdown>,
    /// Present only in backward-derived mode.
    pub arrears: Option<ArrearsBucket>,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
