//! Patient queries.

use rusqlite::{params, OptionalExtension, Row};

use crate::{DbResult, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub id: i64,
    pub name: String,
    pub national_id: String,
    pub company_id: Option<i64>,
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        national_id: row.get(2)?,
        company_id: row.get(3)?,
    })
}

impl Session<'_> {
    pub fn insert_patient(
        &self,
        name: &str,
        national_id: &str,
        company_id: Option<i64>,
    ) -> DbResult<i64> {
        self.conn.execute(
            "INSERT INTO patients (name, national_id, company_id) VALUES (?1, ?2, ?3)",
            params![name, national_id, company_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn find_patient(&self, id: i64) -> DbResult<Option<PatientRecord>> {
        self.conn
            .query_row(
                "SELECT id, name, national_id, company_id FROM patients WHERE id = ?1",
                params![id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn find_patient_by_national_id(&self, national_id: &str) -> DbResult<Option<PatientRecord>> {
        self.conn
            .query_row(
                "SELECT id, name, national_id, company_id FROM patients WHERE national_id = ?1",
                params![national_id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Overwrites the patient's company reference.
    pub fn set_patient_company(&self, id: i64, company_id: i64) -> DbResult<bool> {
        let rows = self.conn.execute(
            "UPDATE patients SET company_id = ?2 WHERE id = ?1",
            params![id, company_id],
        )?;
        Ok(rows > 0)
    }

    pub fn count_patients(&self) -> DbResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count)
    }
}
