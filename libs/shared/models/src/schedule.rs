//! Weekday eligibility for sites that only attend on some days.
//!
//! Sites store their days as a comma separated list of Spanish day names,
//! e.g. `"Lunes,Miércoles,Viernes"`.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Day names indexed from Monday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Día de atención inválido: {0}")]
pub struct UnknownWeekday(pub String);

pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// Splits a stored list into its trimmed, non-empty entries.
pub fn parse_allowed_days(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|day| !day.is_empty())
        .collect()
}

/// A date is allowed when its weekday is listed, or when the site lists no days at all.
pub fn is_date_allowed(allowed: Option<&str>, date: NaiveDate) -> bool {
    let days = match allowed {
        Some(list) => parse_allowed_days(list),
        None => return true,
    };
    if days.is_empty() {
        return true;
    }
    let name = weekday_name(date);
    days.iter().any(|day| *day == name)
}

/// Canonicalizes an admin supplied list: known names only, Monday first, no duplicates.
///
/// Returns `None` when the list is blank, which clears the restriction.
pub fn normalize_allowed_days(list: &str) -> Result<Option<String>, UnknownWeekday> {
    let mut selected = [false; 7];
    for day in parse_allowed_days(list) {
        let index = WEEKDAY_NAMES
            .iter()
            .position(|known| known.to_lowercase() == day.to_lowercase())
            .ok_or_else(|| UnknownWeekday(day.to_string()))?;
        selected[index] = true;
    }

    let days: Vec<&str> = WEEKDAY_NAMES
        .iter()
        .zip(selected)
        .filter_map(|(name, on)| on.then_some(*name))
        .collect();

    if days.is_empty() {
        Ok(None)
    } else {
        Ok(Some(days.join(",")))
    }
}
