use super::types::RateScheduleEntry;

/// Title of the agreement the default table is taken from.
pub const SCHEDULE_TITLE: &str = "RDL 14/2025";

/// Multi-year raise table of the 2025-2028 public-sector pay agreement.
/// 2025 and 2026 are enacted; 2027 and 2028 are the negotiated recovery
/// targets and stay flagged as unconfirmed until published.
pub fn rdl_14_2025_schedule() -> Vec<RateScheduleEntry> {
    vec![
        RateScheduleEntry {
            year: 2025,
            fixed_rate: 0.02,
            variable_rate: 0.005,
            confirmed: true,
            description: "2% fijo + 0,5% IPC".to_string(),
        },
        RateScheduleEntry {
            year: 2026,
            fixed_rate: 0.015,
            variable_rate: 0.005,
            confirmed: true,
            description: "1,5% fijo + 0,5% IPC".to_string(),
        },
        RateScheduleEntry {
            year: 2027,
            fixed_rate: 0.015,
            variable_rate: 0.005,
            confirmed: false,
            description: "1,5% Recuperación UGT".to_string(),
        },
        RateScheduleEntry {
            year: 2028,
            fixed_rate: 0.015,
            variable_rate: 0.005,
            confirmed: false,
            description: "1,5% Recuperación UGT".to_string(),
        },
    ]
}
