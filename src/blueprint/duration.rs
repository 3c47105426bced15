//! @acp:module "Duration Allocation"
//! @acp:summary "Parse a total course duration and allot a share to each module role"
//! @acp:domain blueprint
//! @acp:layer logic

use std::sync::LazyLock;

use regex::Regex;

use super::roles::ModuleRole;

/// First run of ASCII digits in a free-text duration
static HOURS_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Hours assumed when a duration carries no number at all
pub const DEFAULT_TOTAL_HOURS: f64 = 8.0;

/// Floor applied to every module's allotment (15 minutes)
pub const MINIMUM_MODULE_HOURS: f64 = 0.25;

/// Parse a duration answer into a total number of hours.
///
/// The fixed choices map directly; free text contributes its first integer
/// (`"12 hours over 3 half days"` is 12); no digits means 8.
pub fn parse_duration_hours(duration: &str) -> f64 {
    match duration {
        "2h" => 2.0,
        "4h" => 4.0,
        "8h" => 8.0,
        "16h" => 16.0,
        other => HOURS_PATTERN
            .find(other)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(DEFAULT_TOTAL_HOURS),
    }
}

/// Render an hour count: minutes under one hour, `Nh` when integral,
/// one decimal otherwise
pub fn format_hours(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} min", (hours * 60.0).round())
    } else if hours.fract() == 0.0 {
        format!("{}h", hours)
    } else {
        // Rounds the exact binary value, so 11h x 0.15 shows as 1.6h
        format!("{:.1}h", hours)
    }
}

/// Hours allotted to `role` out of `total_hours`
pub fn module_hours(total_hours: f64, role: ModuleRole) -> f64 {
    (total_hours * role.weight()).max(MINIMUM_MODULE_HOURS)
}

/// Formatted duration of `role` for a course of `total_duration`
pub fn allocate_module_duration(total_duration: &str, role: ModuleRole) -> String {
    format_hours(module_hours(parse_duration_hours(total_duration), role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_choices() {
        assert_eq!(parse_duration_hours("2h"), 2.0);
        assert_eq!(parse_duration_hours("16h"), 16.0);
    }

    #[test]
    fn test_parse_first_integer_of_free_text() {
        assert_eq!(parse_duration_hours("12 hours over 3 half days"), 12.0);
        assert_eq!(parse_duration_hours("about 3.5 days"), 3.0);
        assert_eq!(parse_duration_hours("two days"), 8.0);
        assert_eq!(parse_duration_hours(""), 8.0);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.3), "18 min");
        assert_eq!(format_hours(0.25), "15 min");
        assert_eq!(format_hours(2.0), "2h");
        assert_eq!(format_hours(1.2000000000000002), "1.2h");
        assert_eq!(format_hours(11.0 * 0.15), "1.6h");
        assert_eq!(format_hours(13.0 * 0.15), "1.9h");
        assert_eq!(format_hours(4.8), "4.8h");
    }

    #[test]
    fn test_minimum_allotment() {
        assert_eq!(module_hours(2.0, ModuleRole::ActionPlan), 0.25);
        assert_eq!(allocate_module_duration("2h", ModuleRole::ActionPlan), "15 min");
    }

    #[test]
    fn test_allocation_for_full_day() {
        let durations: Vec<String> = ModuleRole::all()
            .iter()
            .map(|role| allocate_module_duration("8h", *role))
            .collect();
        assert_eq!(durations, vec!["1.2h", "2.4h", "2h", "1.6h", "48 min"]);
    }
}
