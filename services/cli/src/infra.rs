use chrono::{NaiveDate, NaiveDateTime};
use nbs_discharge::workflows::screening::Scenario;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD HH:MM"))
}

pub(crate) fn parse_scenario(raw: &str) -> Result<Scenario, String> {
    raw.parse::<Scenario>().map_err(|err| err.to_string())
}

pub(crate) fn parse_can_delay(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        _ => Err(format!("expected yes or no, got '{raw}'")),
    }
}
