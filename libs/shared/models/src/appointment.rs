use serde::{Deserialize, Serialize};

/// Company label shown for patients booked without a sponsoring company.
pub const PRIVATE_PATIENT_LABEL: &str = "Particular";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub nombre_paciente: String,
    pub cedula_paciente: String,
    pub sede: String,
    pub laboratorio: String,
    pub fecha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa_paciente: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub message: String,
    pub cita_id: i64,
}

/// `estado` stays a raw string on the wire so an unknown value yields a readable 400.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub fecha: String,
    pub estado: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub id: i64,
    pub paciente_nombre: String,
    pub paciente_cedula: String,
    pub empresa: String,
    pub sede: String,
    pub laboratorio: String,
    pub fecha: String,
    pub estado: String,
}
