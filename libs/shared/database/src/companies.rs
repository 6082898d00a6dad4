//! Company (empresa) queries.

use rusqlite::{params, OptionalExtension, Row};

use crate::{DbResult, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub id: i64,
    pub name: String,
    pub max_per_day: Option<i64>,
    pub priority_quota: Option<i64>,
}

const COMPANY_COLUMNS: &str = "id, name, max_per_day, priority_quota";

fn company_from_row(row: &Row<'_>) -> rusqlite::Result<CompanyRecord> {
    Ok(CompanyRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        max_per_day: row.get(2)?,
        priority_quota: row.get(3)?,
    })
}

impl Session<'_> {
    /// Inserts a company with no daily maximum.
    pub fn insert_company(&self, name: &str) -> DbResult<i64> {
        self.conn
            .execute("INSERT INTO companies (name) VALUES (?1)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_companies(&self) -> DbResult<Vec<CompanyRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM companies ORDER BY id", COMPANY_COLUMNS))?;
        let rows = stmt.query_map([], company_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn find_company(&self, id: i64) -> DbResult<Option<CompanyRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM companies WHERE id = ?1", COMPANY_COLUMNS),
                params![id],
                company_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn find_company_by_name(&self, name: &str) -> DbResult<Option<CompanyRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM companies WHERE name = ?1", COMPANY_COLUMNS),
                params![name],
                company_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Looks a company up by name, creating it when absent.
    pub fn find_or_create_company(&self, name: &str) -> DbResult<CompanyRecord> {
        if let Some(company) = self.find_company_by_name(name)? {
            return Ok(company);
        }
        let id = self.insert_company(name)?;
        Ok(CompanyRecord {
            id,
            name: name.to_string(),
            max_per_day: None,
            priority_quota: None,
        })
    }

    pub fn set_company_capacity(&self, id: i64, capacity: i64) -> DbResult<bool> {
        let rows = self.conn.execute(
            "UPDATE companies SET max_per_day = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, capacity],
        )?;
        Ok(rows > 0)
    }

    /// Appointments on `date` whose patient currently belongs to the company.
    pub fn count_company_appointments(&self, company_id: i64, date: &str) -> DbResult<i64> {
        let count = self.conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM appointments a
            JOIN patients p ON p.id = a.patient_id
            WHERE p.company_id = ?1 AND a.date = ?2
            "#,
            params![company_id, date],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, NewAppointment};
    use shared_models::status::AppointmentStatus;

    #[test]
    fn test_find_or_create_company() {
        let db = Database::open_in_memory().unwrap();

        let created = db.session(|s| s.find_or_create_company("EMSSANAR")).unwrap();
        assert_eq!(created.max_per_day, None);

        let found = db.session(|s| s.find_or_create_company("EMSSANAR")).unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(db.session(|s| s.list_companies()).unwrap().len(), 1);
    }

    #[test]
    fn test_set_company_capacity() {
        let db = Database::open_in_memory().unwrap();
        let id = db.session(|s| s.insert_company("MALLAMAS")).unwrap();

        assert!(db.session(|s| s.set_company_capacity(id, 3)).unwrap());
        assert!(!db.session(|s| s.set_company_capacity(id + 1, 3)).unwrap());

        let company = db.session(|s| s.find_company(id)).unwrap().unwrap();
        assert_eq!(company.max_per_day, Some(3));
    }

    #[test]
    fn test_count_company_appointments_joins_patients() {
        let db = Database::open_in_memory().unwrap();
        let (company, other) = db
            .session(|s| -> DbResult<(i64, i64)> {
                let company = s.insert_company("EMSSANAR")?;
                let other = s.insert_company("MALLAMAS")?;
                let ana = s.insert_patient("Ana", "100", Some(company))?;
                let luis = s.insert_patient("Luis", "200", Some(other))?;
                let sin_empresa = s.insert_patient("Eva", "300", None)?;
                for patient in [ana, ana, luis, sin_empresa] {
                    s.insert_appointment(&NewAppointment {
                        patient_id: patient,
                        site: "SEDE CENTRO".to_string(),
                        lab_test: "Glucosa".to_string(),
                        date: "2024-02-01".to_string(),
                        status: AppointmentStatus::Pending,
                    })?;
                }
                Ok((company, other))
            })
            .unwrap();

        assert_eq!(db.session(|s| s.count_company_appointments(company, "2024-02-01")).unwrap(), 2);
        assert_eq!(db.session(|s| s.count_company_appointments(other, "2024-02-01")).unwrap(), 1);
        assert_eq!(db.session(|s| s.count_company_appointments(company, "2024-02-02")).unwrap(), 0);
    }
}
