//! Site (sede) queries.

use rusqlite::{params, OptionalExtension, Row};

use crate::{DbResult, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub map_coordinates: Option<String>,
    pub capacity_per_day: Option<i64>,
    pub allowed_weekdays: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSite {
    pub name: String,
    pub address: Option<String>,
    pub map_coordinates: Option<String>,
    pub capacity_per_day: Option<i64>,
    pub allowed_weekdays: Option<String>,
}

impl NewSite {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

const SITE_COLUMNS: &str =
    "id, name, address, map_coordinates, capacity_per_day, allowed_weekdays";

fn site_from_row(row: &Row<'_>) -> rusqlite::Result<SiteRecord> {
    Ok(SiteRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        map_coordinates: row.get(3)?,
        capacity_per_day: row.get(4)?,
        allowed_weekdays: row.get(5)?,
    })
}

impl Session<'_> {
    pub fn insert_site(&self, site: &NewSite) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO sites (name, address, map_coordinates, capacity_per_day, allowed_weekdays)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                site.name,
                site.address,
                site.map_coordinates,
                site.capacity_per_day,
                site.allowed_weekdays,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_sites(&self) -> DbResult<Vec<SiteRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM sites ORDER BY id", SITE_COLUMNS))?;
        let rows = stmt.query_map([], site_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn find_site(&self, id: i64) -> DbResult<Option<SiteRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM sites WHERE id = ?1", SITE_COLUMNS),
                params![id],
                site_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn find_site_by_name(&self, name: &str) -> DbResult<Option<SiteRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM sites WHERE name = ?1", SITE_COLUMNS),
                params![name],
                site_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn set_site_capacity(&self, id: i64, capacity: i64) -> DbResult<bool> {
        let rows = self.conn.execute(
            "UPDATE sites SET capacity_per_day = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, capacity],
        )?;
        Ok(rows > 0)
    }

    pub fn set_site_weekdays(&self, id: i64, weekdays: Option<&str>) -> DbResult<bool> {
        let rows = self.conn.execute(
            "UPDATE sites SET allowed_weekdays = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, weekdays],
        )?;
        Ok(rows > 0)
    }

    /// Appointments booked at `site` on exactly `date` (string equality).
    pub fn count_site_appointments(&self, site: &str, date: &str) -> DbResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM appointments WHERE site = ?1 AND date = ?2",
            params![site, date],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
