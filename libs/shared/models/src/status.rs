use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of an appointment. Stored once, by label, in `appointments.status`.
///
/// Any state can be overwritten by any other through the update endpoint;
/// there is no transition table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    #[serde(rename = "Pendiente", alias = "Pending")]
    Pending,
    #[serde(rename = "Confirmada", alias = "Confirmed")]
    Confirmed,
    #[serde(rename = "Cancelada", alias = "Cancelled")]
    Cancelled,
    #[serde(rename = "No asistió", alias = "NoShow", alias = "No-show")]
    NoShow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Estado de cita inválido: {0}")]
pub struct UnknownStatus(pub String);

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pendiente",
            AppointmentStatus::Confirmed => "Confirmada",
            AppointmentStatus::Cancelled => "Cancelada",
            AppointmentStatus::NoShow => "No asistió",
        }
    }

    fn english_name(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "NoShow",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("No-show") {
            return Ok(AppointmentStatus::NoShow);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.label() == wanted || status.english_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStatus(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_and_english_names() {
        assert_eq!("Pendiente".parse::<AppointmentStatus>(), Ok(AppointmentStatus::Pending));
        assert_eq!(" Confirmada ".parse::<AppointmentStatus>(), Ok(AppointmentStatus::Confirmed));
        assert_eq!("cancelled".parse::<AppointmentStatus>(), Ok(AppointmentStatus::Cancelled));
        assert_eq!("No asistió".parse::<AppointmentStatus>(), Ok(AppointmentStatus::NoShow));
        assert_eq!("No-show".parse::<AppointmentStatus>(), Ok(AppointmentStatus::NoShow));
    }

    #[test]
    fn test_parse_unknown_status() {
        let err = "Archivada".parse::<AppointmentStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Estado de cita inválido: Archivada");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"No asistió\"");
        let parsed: AppointmentStatus = serde_json::from_str("\"Confirmed\"").unwrap();
        assert_eq!(parsed, AppointmentStatus::Confirmed);
    }
}
