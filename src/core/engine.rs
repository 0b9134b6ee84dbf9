use super::types::{
    ALLOWED_PAYMENTS_PER_YEAR, ArrearsBucket, BaselineStrategy, CalculationConfig,
    ProjectionError, ProjectionResult, RateScheduleEntry, VariablePolicy, YearBreakdown,
};

/// Projects salary growth across the raise schedule.
///
/// The result starts with a zero-increase baseline row for the year before the
/// first schedule entry, followed by one row per entry in ascending year
/// order. Cumulative percentages are measured against the baseline year while
/// the delta fields compare against the immediately preceding year. The
/// engine applies no rounding; formatting is the display layer's concern.
pub fn project(
    config: &CalculationConfig,
    schedule: &[RateScheduleEntry],
    strategy: BaselineStrategy,
    policy: VariablePolicy,
) -> Result<ProjectionResult, ProjectionError> {
    validate(config, schedule)?;
    match strategy {
        BaselineStrategy::Forward => Ok(project_forward(config, schedule, policy)),
        BaselineStrategy::BackwardDerived => Ok(project_backward(config, schedule, policy)),
    }
}

fn validate(
    config: &CalculationConfig,
    schedule: &[RateScheduleEntry],
) -> Result<(), ProjectionError> {
    if !config.base_monthly_salary.is_finite() || config.base_monthly_salary <= 0.0 {
        return Err(ProjectionError::InvalidConfig(
            "base monthly salary must be > 0".to_string(),
        ));
    }

    if !ALLOWED_PAYMENTS_PER_YEAR.contains(&config.payments_per_year) {
        return Err(ProjectionError::InvalidConfig(format!(
            "payments per year must be one of {ALLOWED_PAYMENTS_PER_YEAR:?}, got {}",
            config.payments_per_year
        )));
    }

    if schedule.is_empty() {
        return Err(ProjectionError::InvalidConfig(
            "rate schedule must not be empty".to_string(),
        ));
    }

    for pair in schedule.windows(2) {
        if pair[1].year <= pair[0].year {
            return Err(ProjectionError::InvalidConfig(format!(
                "rate schedule years must be strictly increasing, got {} after {}",
                pair[1].year, pair[0].year
            )));
        }
    }

    for entry in schedule {
        for (label, rate) in [("fixed", entry.fixed_rate), ("variable", entry.variable_rate)] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ProjectionError::InvalidConfig(format!(
                    "{label} rate for {} must be a non-negative fraction",
                    entry.year
                )));
            }
        }
    }

    Ok(())
}

fn effective_variable_rate(
    entry: &RateScheduleEntry,
    config: &CalculationConfig,
    policy: VariablePolicy,
) -> f64 {
    let gated = match policy {
        VariablePolicy::AllYears => true,
        VariablePolicy::SingleYear(year) => entry.year == year,
    };
    if gated && !config.include_variable_component {
        0.0
    } else {
        entry.variable_rate
    }
}

fn project_forward(
    config: &CalculationConfig,
    schedule: &[RateScheduleEntry],
    policy: VariablePolicy,
) -> ProjectionResult {
    let payments = f64::from(config.payments_per_year);
    let baseline_annual = config.base_monthly_salary * payments;

    let mut years = Vec::with_capacity(schedule.len() + 1);
    years.push(baseline_row(
        schedule[0].year - 1,
        baseline_annual,
        config.base_monthly_salary,
    ));

    let mut current_annual = baseline_annual;
    for entry in schedule {
        let variable_rate = effective_variable_rate(entry, config, policy);
        let previous_annual = current_annual;
        current_annual *= 1.0 + entry.fixed_rate + variable_rate;
        years.push(entry_row(
            entry,
            variable_rate,
            current_annual,
            previous_annual,
            baseline_annual,
            payments,
        ));
    }

    ProjectionResult { years, arrears: None }
}

fn project_backward(
    config: &CalculationConfig,
    schedule: &[RateScheduleEntry],
    policy: VariablePolicy,
) -> ProjectionResult {
    let payments = f64::from(config.payments_per_year);
    let first = &schedule[0];
    let first_variable = effective_variable_rate(first, config, policy);

    // The entered salary is the first entry's salary; dividing its raise back
    // out reconstructs the baseline year. The first row is emitted from the
    // given salary as-is so it carries no compounding round-trip drift.
    let first_annual = config.base_monthly_salary * payments;
    let baseline_annual = first_annual / (1.0 + first.fixed_rate + first_variable);

    let mut years = Vec::with_capacity(schedule.len() + 1);
    years.push(baseline_row(
        first.year - 1,
        baseline_annual,
        baseline_annual / payments,
    ));
    years.push(entry_row(
        first,
        first_variable,
        first_annual,
        baseline_annual,
        baseline_annual,
        payments,
    ));

    let arrears = ArrearsBucket {
        year: first.year,
        amount: years[1].delta_monthly_vs_previous * payments,
    };

    let mut current_annual = first_annual;
    for entry in &schedule[1..] {
        let variable_rate = effective_variable_rate(entry, config, policy);
        let previous_annual = current_annual;
        current_annual *= 1.0 + entry.fixed_rate + variable_rate;
        years.push(entry_row(
            entry,
            variable_rate,
            current_annual,
            previous_annual,
            baseline_annual,
            payments,
        ));
    }

    ProjectionResult {
        years,
        arrears: Some(arrears),
    }
}

fn baseline_row(year: i32, annual: f64, monthly: f64) -> YearBreakdown {
    YearBreakdown {
        year,
        fixed_rate_percent: 0.0,
        variable_rate_percent: 0.0,
        cumulative_total_percent: 0.0,
        annual_gross_total: annual,
        monthly_gross_total: monthly,
        delta_annual_vs_previous: 0.0,
        delta_monthly_vs_previous: 0.0,
        confirmed: true,
    }
}

fn entry_row(
    entry: &RateScheduleEntry,
    variable_rate: f64,
    annual: f64,
    previous_annual: f64,
    reference_annual: f64,
    payments: f64,
) -> YearBreakdown {
    YearBreakdown {
        year: entry.year,
        fixed_rate_percent: entry.fixed_rate * 100.0,
        variable_rate_percent: variable_rate * 100.0,
        cumulative_total_percent: (annual / reference_annual - 1.0) * 100.0,
        annual_gross_total: annual,
        monthly_gross_total: annual / payments,
        delta_annual_vs_previous: annual - previous_annual,
        delta_monthly_vs_previous: (annual - previous_annual) / payments,
        confirmed: entry.confirmed,
    }
}
