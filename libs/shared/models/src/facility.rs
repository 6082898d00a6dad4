use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteResponse {
    pub id: i64,
    pub nombre: String,
    pub dias_atencion: Option<String>,
    pub sd_cant_turnos: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSiteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cant_turnos: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dias_atencion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableDaysResponse {
    pub dias_atencion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_permitida: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub nombre: String,
    pub cant_turnos: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCompanyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cant_turnos: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub fecha: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableDaysQuery {
    pub fecha: Option<String>,
}

/// Rejects negative daily quotas sent by the admin screens.
pub fn validate_capacity(capacity: Option<i64>) -> Result<(), String> {
    match capacity {
        Some(c) if c < 0 => Err(format!("La cantidad de turnos no puede ser negativa: {}", c)),
        _ => Ok(()),
    }
}
