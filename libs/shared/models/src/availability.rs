use std::fmt;

use serde::{Deserialize, Serialize};

/// Returns the capacity that actually limits bookings. Unset and zero both mean unlimited.
pub fn effective_capacity(capacity: Option<i64>) -> Option<i64> {
    capacity.filter(|c| *c > 0)
}

/// Daily slot usage for a site or company on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    #[serde(rename = "turnos_totales")]
    pub total: Option<i64>,
    #[serde(rename = "turnos_ocupados")]
    pub occupied: i64,
    #[serde(rename = "turnos_disponibles")]
    pub remaining: Option<i64>,
    #[serde(rename = "tiene_disponibilidad")]
    pub has_availability: bool,
}

impl SlotAvailability {
    pub fn from_counts(capacity: Option<i64>, occupied: i64) -> Self {
        match effective_capacity(capacity) {
            None => Self {
                total: None,
                occupied,
                remaining: None,
                has_availability: true,
            },
            Some(total) => {
                let remaining = total - occupied;
                Self {
                    total: Some(total),
                    occupied,
                    remaining: Some(remaining.max(0)),
                    has_availability: remaining > 0,
                }
            }
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.total.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityScope {
    #[serde(rename = "sede")]
    Site,
    #[serde(rename = "empresa")]
    Company,
}

/// A booking rejected because a daily quota is already used up.
///
/// The counts are kept apart from the localized message so callers can
/// render them however they like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityExceeded {
    #[serde(rename = "alcance")]
    pub scope: CapacityScope,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "turnos_ocupados")]
    pub occupied: i64,
    #[serde(rename = "turnos_totales")]
    pub total: i64,
}

impl CapacityExceeded {
    /// Checks a computed availability, returning the rejection when no slot is left.
    pub fn check(
        scope: CapacityScope,
        name: &str,
        date: &str,
        availability: &SlotAvailability,
    ) -> Result<(), CapacityExceeded> {
        match availability.total {
            Some(total) if !availability.has_availability => Err(CapacityExceeded {
                scope,
                name: name.to_string(),
                date: date.to_string(),
                occupied: availability.occupied,
                total,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            CapacityScope::Site => write!(
                f,
                "No hay turnos disponibles para la sede {} en la fecha {}. Turnos ocupados: {}/{}",
                self.name, self.date, self.occupied, self.total
            ),
            CapacityScope::Company => write!(
                f,
                "La empresa {} no tiene cupos disponibles para la fecha {}.",
                self.name, self.date
            ),
        }
    }
}

impl std::error::Error for CapacityExceeded {}
