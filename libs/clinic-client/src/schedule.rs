//! Date checks run before a booking is sent.

use chrono::NaiveDate;

use shared_models::facility::SiteResponse;
use shared_models::schedule::{is_date_allowed, weekday_name};

use crate::error::ClientError;

pub fn parse_date(fecha: &str) -> Result<NaiveDate, ClientError> {
    NaiveDate::parse_from_str(fecha.trim(), "%Y-%m-%d")
        .map_err(|_| ClientError::InvalidDate(fecha.to_string()))
}

pub fn site_accepts(site: &SiteResponse, date: NaiveDate) -> bool {
    is_date_allowed(site.dias_atencion.as_deref(), date)
}

/// Rejects dates that fall on a weekday the site does not attend.
pub fn check_booking_date(site: &SiteResponse, fecha: &str) -> Result<NaiveDate, ClientError> {
    let date = parse_date(fecha)?;
    if !site_accepts(site, date) {
        return Err(ClientError::DateNotAllowed {
            site: site.nombre.clone(),
            weekday: weekday_name(date).to_lowercase(),
        });
    }
    Ok(date)
}
