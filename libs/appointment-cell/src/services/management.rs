use tracing::info;

use shared_database::{AppState, Database};
use shared_models::appointment::{AppointmentSummary, UpdateAppointmentRequest};
use shared_models::status::AppointmentStatus;

use crate::models::{required, AppointmentError};

pub struct AppointmentService {
    db: Database,
}

impl AppointmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
        }
    }

    pub fn list(&self) -> Result<Vec<AppointmentSummary>, AppointmentError> {
        Ok(self.db.session(|s| s.list_appointment_summaries())?)
    }

    /// Overwrites date and status. Quotas are not re-checked on reschedule.
    pub fn update(&self, cita_id: i64, request: &UpdateAppointmentRequest) -> Result<(), AppointmentError> {
        let date = required("fecha", &request.fecha)?;
        let status: AppointmentStatus = request.estado.parse()?;

        let updated = self
            .db
            .session(|s| s.update_appointment(cita_id, date, status))?;
        if !updated {
            return Err(AppointmentError::NotFound);
        }

        info!("Appointment {} set to {} on {}", cita_id, status, date);
        Ok(())
    }

    pub fn delete(&self, cita_id: i64) -> Result<(), AppointmentError> {
        if !self.db.session(|s| s.delete_appointment(cita_id))? {
            return Err(AppointmentError::NotFound);
        }

        info!("Appointment {} deleted", cita_id);
        Ok(())
    }
}
