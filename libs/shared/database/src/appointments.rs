//! Appointment (cita) queries.

use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use shared_models::appointment::{AppointmentSummary, PRIVATE_PATIENT_LABEL};
use shared_models::status::AppointmentStatus;

use crate::{DbResult, Session};

const UNKNOWN_PATIENT: &str = "Desconocido";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRecord {
    pub id: i64,
    pub patient_id: i64,
    pub site: String,
    pub lab_test: String,
    pub date: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub site: String,
    pub lab_test: String,
    pub date: String,
    pub status: AppointmentStatus,
}

fn status_from_row(row: &Row<'_>, idx: usize) -> rusqlite::Result<AppointmentStatus> {
    let label: String = row.get(idx)?;
    label
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<AppointmentRecord> {
    Ok(AppointmentRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        site: row.get(2)?,
        lab_test: row.get(3)?,
        date: row.get(4)?,
        status: status_from_row(row, 5)?,
    })
}

impl Session<'_> {
    pub fn insert_appointment(&self, appointment: &NewAppointment) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO appointments (patient_id, site, lab_test, date, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                appointment.patient_id,
                appointment.site,
                appointment.lab_test,
                appointment.date,
                appointment.status.label(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn find_appointment(&self, id: i64) -> DbResult<Option<AppointmentRecord>> {
        self.conn
            .query_row(
                "SELECT id, patient_id, site, lab_test, date, status FROM appointments WHERE id = ?1",
                params![id],
                appointment_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All appointments joined with their patient and the patient's company.
    pub fn list_appointment_summaries(&self) -> DbResult<Vec<AppointmentSummary>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT a.id, p.name, p.national_id, c.name, a.site, a.lab_test, a.date, a.status
            FROM appointments a
            LEFT JOIN patients p ON p.id = a.patient_id
            LEFT JOIN companies c ON c.id = p.company_id
            ORDER BY a.id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let patient_name: Option<String> = row.get(1)?;
            let national_id: Option<String> = row.get(2)?;
            let company: Option<String> = row.get(3)?;
            Ok(AppointmentSummary {
                id: row.get(0)?,
                paciente_nombre: patient_name.unwrap_or_else(|| UNKNOWN_PATIENT.to_string()),
                paciente_cedula: national_id.unwrap_or_else(|| UNKNOWN_PATIENT.to_string()),
                empresa: company.unwrap_or_else(|| PRIVATE_PATIENT_LABEL.to_string()),
                sede: row.get(4)?,
                laboratorio: row.get(5)?,
                fecha: row.get(6)?,
                estado: status_from_row(row, 7)?.label().to_string(),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn update_appointment(&self, id: i64, date: &str, status: AppointmentStatus) -> DbResult<bool> {
        let rows = self.conn.execute(
            r#"
            UPDATE appointments
            SET date = ?2, status = ?3, updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![id, date, status.label()],
        )?;
        Ok(rows > 0)
    }

    pub fn delete_appointment(&self, id: i64) -> DbResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn booked(db: &Database, national_id: &str, company: Option<&str>) -> i64 {
        db.session(|s| -> DbResult<i64> {
            let company_id = match company {
                Some(name) => Some(s.find_or_create_company(name)?.id),
                None => None,
            };
            let patient = s.insert_patient("Paciente", national_id, company_id)?;
            s.insert_appointment(&NewAppointment {
                patient_id: patient,
                site: "SEDE CENTRO".to_string(),
                lab_test: "Perfil lipídico".to_string(),
                date: "2024-03-01".to_string(),
                status: AppointmentStatus::Pending,
            })
        })
        .unwrap()
    }

    #[test]
    fn test_insert_and_find_appointment() {
        let db = Database::open_in_memory().unwrap();
        let id = booked(&db, "100", None);

        let appointment = db.session(|s| s.find_appointment(id)).unwrap().unwrap();
        assert_eq!(appointment.site, "SEDE CENTRO");
        assert_eq!(appointment.status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_summaries_label_private_patients() {
        let db = Database::open_in_memory().unwrap();
        booked(&db, "100", None);
        booked(&db, "200", Some("EMSSANAR"));

        let summaries = db.session(|s| s.list_appointment_summaries()).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].empresa, "Particular");
        assert_eq!(summaries[0].estado, "Pendiente");
        assert_eq!(summaries[1].empresa, "EMSSANAR");
        assert_eq!(summaries[1].paciente_cedula, "200");
    }

    #[test]
    fn test_update_writes_single_status() {
        let db = Database::open_in_memory().unwrap();
        let id = booked(&db, "100", None);

        assert!(db
            .session(|s| s.update_appointment(id, "2024-03-02", AppointmentStatus::NoShow))
            .unwrap());

        let appointment = db.session(|s| s.find_appointment(id)).unwrap().unwrap();
        assert_eq!(appointment.date, "2024-03-02");
        assert_eq!(appointment.status, AppointmentStatus::NoShow);

        let summaries = db.session(|s| s.list_appointment_summaries()).unwrap();
        assert_eq!(summaries[0].estado, "No asistió");
    }

    #[test]
    fn test_update_and_delete_missing_appointment() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db
            .session(|s| s.update_appointment(9999, "2024-03-02", AppointmentStatus::Confirmed))
            .unwrap());
        assert!(!db.session(|s| s.delete_appointment(9999)).unwrap());
    }

    #[test]
    fn test_delete_appointment() {
        let db = Database::open_in_memory().unwrap();
        let id = booked(&db, "100", None);
        assert!(db.session(|s| s.delete_appointment(id)).unwrap());
        assert!(db.session(|s| s.find_appointment(id)).unwrap().is_none());
    }
}
