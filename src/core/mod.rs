mod engine;
mod schedule;
mod types;

pub use engine::project;
pub use schedule::{SCHEDULE_TITLE, rdl_14_2025_schedule};
pub use types::{
    ALLOWED_PAYMENTS_PER_YEAR, ArrearsBucket, BaselineStrategy, CalculationConfig,
    ProjectionError, ProjectionResult, RateScheduleEntry, VariablePolicy, YearBreakdown,
};
