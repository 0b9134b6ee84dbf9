use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ArrearsBucket, BaselineStrategy, CalculationConfig, ProjectionError, ProjectionResult,
    RateScheduleEntry, SCHEDULE_TITLE, VariablePolicy, YearBreakdown, project,
    rdl_14_2025_schedule,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliBaselineStrategy {
    Forward,
    BackwardDerived,
}

impl From<CliBaselineStrategy> for BaselineStrategy {
    fn from(value: CliBaselineStrategy) -> Self {
        match value {
            CliBaselineStrategy::Forward => BaselineStrategy::Forward,
            CliBaselineStrategy::BackwardDerived => BaselineStrategy::BackwardDerived,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliVariablePolicy {
    AllYears,
    SingleYear,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiBaselineStrategy {
    Forward,
    #[serde(alias = "backwardDerived", alias = "backward_derived", alias = "backward")]
    BackwardDerived,
}

impl From<ApiBaselineStrategy> for CliBaselineStrategy {
    fn from(value: ApiBaselineStrategy) -> Self {
        match value {
            ApiBaselineStrategy::Forward => CliBaselineStrategy::Forward,
            ApiBaselineStrategy::BackwardDerived => CliBaselineStrategy::BackwardDerived,
        }
    }
}

impl From<CliBaselineStrategy> for ApiBaselineStrategy {
    fn from(value: CliBaselineStrategy) -> Self {
        match value {
            CliBaselineStrategy::Forward => ApiBaselineStrategy::Forward,
            CliBaselineStrategy::BackwardDerived => ApiBaselineStrategy::BackwardDerived,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiVariablePolicy {
    #[serde(alias = "allYears", alias = "all_years", alias = "global")]
    AllYears,
    #[serde(alias = "singleYear", alias = "single_year", alias = "targeted")]
    SingleYear,
}

impl From<ApiVariablePolicy> for CliVariablePolicy {
    fn from(value: ApiVariablePolicy) -> Self {
        match value {
            ApiVariablePolicy::AllYears => CliVariablePolicy::AllYears,
            ApiVariablePolicy::SingleYear => CliVariablePolicy::SingleYear,
        }
    }
}

impl From<CliVariablePolicy> for ApiVariablePolicy {
    fn from(value: CliVariablePolicy) -> Self {
        match value {
            CliVariablePolicy::AllYears => ApiVariablePolicy::AllYears,
            CliVariablePolicy::SingleYear => ApiVariablePolicy::SingleYear,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    #[serde(alias = "salary", alias = "base_monthly_salary")]
    base_monthly_salary: Option<f64>,
    #[serde(alias = "numPayments", alias = "payments_per_year")]
    payments_per_year: Option<u32>,
    #[serde(alias = "includeVariableComponent", alias = "include_variable")]
    include_variable: Option<bool>,
    #[serde(alias = "baseline_strategy")]
    baseline_strategy: Option<ApiBaselineStrategy>,
    #[serde(alias = "variable_policy")]
    variable_policy: Option<ApiVariablePolicy>,
    #[serde(alias = "variable_policy_year")]
    variable_policy_year: Option<i32>,
    schedule: Option<Vec<RateScheduleEntry>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "sueldo",
    about = "Public-sector salary raise simulator over the RDL 14/2025 multi-year schedule"
)]
struct Cli {
    #[arg(long, default_value_t = 2000.0, help = "Gross monthly salary in euros")]
    base_monthly_salary: f64,
    #[arg(
        long,
        default_value_t = 14,
        help = "Salary installments per year: 12, or 14 with the seasonal extras"
    )]
    payments_per_year: u32,
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        help = "Apply the inflation-linked variable component for the gated year(s)"
    )]
    include_variable: bool,
    #[arg(
        long,
        value_enum,
        default_value_t = CliBaselineStrategy::BackwardDerived,
        help = "Whether the entered salary precedes the schedule or already includes its first raise"
    )]
    baseline_strategy: CliBaselineStrategy,
    #[arg(
        long,
        value_enum,
        default_value_t = CliVariablePolicy::SingleYear,
        help = "Whether the variable toggle gates every year or only --variable-policy-year"
    )]
    variable_policy: CliVariablePolicy,
    #[arg(
        long,
        default_value_t = 2026,
        help = "Year gated by the toggle when --variable-policy=single-year"
    )]
    variable_policy_year: i32,
}

#[derive(Debug)]
struct ApiRequest {
    config: CalculationConfig,
    strategy: CliBaselineStrategy,
    policy: CliVariablePolicy,
    policy_year: i32,
    schedule: Vec<RateScheduleEntry>,
}

impl ApiRequest {
    fn variable_policy(&self) -> VariablePolicy {
        match self.policy {
            CliVariablePolicy::AllYears => VariablePolicy::AllYears,
            CliVariablePolicy::SingleYear => VariablePolicy::SingleYear(self.policy_year),
        }
    }
}

/// Headline figures the simulator page shows above the per-year table. The
/// target year is the one after the retroactive raise (the second schedule
/// entry) when the schedule reaches that far.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectSummary {
    target_year: i32,
    consolidated_monthly: f64,
    monthly_gain_vs_previous: f64,
    annual_gain_vs_previous: f64,
    payslip_with_arrears: Option<f64>,
    cumulative_recovery_percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    schedule_title: &'static str,
    baseline_strategy: ApiBaselineStrategy,
    variable_policy: ApiVariablePolicy,
    variable_policy_year: Option<i32>,
    payments_per_year: u32,
    years: Vec<YearBreakdown>,
    arrears: Option<ArrearsBucket>,
    summary: ProjectSummary,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn default_cli_for_api() -> Cli {
    Cli::parse_from(["sueldo"])
}

fn api_request_from_payload(payload: ProjectPayload) -> ApiRequest {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.base_monthly_salary {
        cli.base_monthly_salary = v;
    }
    if let Some(v) = payload.payments_per_year {
        cli.payments_per_year = v;
    }
    if let Some(v) = payload.include_variable {
        cli.include_variable = v;
    }
    if let Some(v) = payload.baseline_strategy {
        cli.baseline_strategy = v.into();
    }
    if let Some(v) = payload.variable_policy {
        cli.variable_policy = v.into();
    }
    if let Some(v) = payload.variable_policy_year {
        cli.variable_policy_year = v;
    }

    let schedule = payload
        .schedule
        .filter(|entries| !entries.is_empty())
        .unwrap_or_else(rdl_14_2025_schedule);

    ApiRequest {
        config: CalculationConfig {
            base_monthly_salary: cli.base_monthly_salary,
            payments_per_year: cli.payments_per_year,
            include_variable_component: cli.include_variable,
        },
        strategy: cli.baseline_strategy,
        policy: cli.variable_policy,
        policy_year: cli.variable_policy_year,
        schedule,
    }
}

fn build_summary(result: &ProjectionResult) -> ProjectSummary {
    let target = result
        .years
        .get(2)
        .or_else(|| result.years.last())
        .expect("projection always emits a baseline row");

    ProjectSummary {
        target_year: target.year,
        consolidated_monthly: target.monthly_gross_total,
        monthly_gain_vs_previous: target.delta_monthly_vs_previous,
        annual_gain_vs_previous: target.delta_annual_vs_previous,
        payslip_with_arrears: result
            .arrears
            .map(|bucket| target.monthly_gross_total + bucket.amount),
        cumulative_recovery_percent: target.cumulative_total_percent,
    }
}

fn build_project_response(request: &ApiRequest, result: ProjectionResult) -> ProjectResponse {
    ProjectResponse {
        schedule_title: SCHEDULE_TITLE,
        baseline_strategy: request.strategy.into(),
        variable_policy: request.policy.into(),
        variable_policy_year: match request.policy {
            CliVariablePolicy::AllYears => None,
            CliVariablePolicy::SingleYear => Some(request.policy_year),
        },
        payments_per_year: request.config.payments_per_year,
        summary: build_summary(&result),
        arrears: result.arrears,
        years: result.years,
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Salary simulator listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = api_request_from_payload(payload);

    match project(
        &request.config,
        &request.schedule,
        request.strategy.into(),
        request.variable_policy(),
    ) {
        Ok(result) => json_response(StatusCode::OK, build_project_response(&request, result)),
        Err(ProjectionError::InvalidConfig(msg)) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(api_request_from_payload(payload))
}
