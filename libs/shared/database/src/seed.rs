//! Startup seeding. Every routine only inserts what is missing.

use rusqlite::params;
use tracing::info;

use shared_models::auth::Role;
use shared_models::status::AppointmentStatus;

use crate::{DbResult, NewSite, Session};

/// Sites created when catalog seeding is enabled.
pub const CATALOG_SITES: [&str; 4] = [
    "SEDE RECUERDO",
    "SEDE VERSALLES",
    "SEDE SAN IGNACIO",
    "SEDE LAS CUADRAS VIP",
];

/// Companies created when catalog seeding is enabled.
pub const CATALOG_COMPANIES: [&str; 2] = ["EMSSANAR", "MALLAMAS"];

const PENDING_ADDRESS: &str = "Dirección pendiente";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub sites_added: usize,
    pub companies_added: usize,
}

impl Session<'_> {
    /// Inserts the fixed roles and appointment statuses.
    pub fn seed_reference_data(&self) -> DbResult<()> {
        for role in Role::ALL {
            self.conn
                .execute("INSERT OR IGNORE INTO roles (name) VALUES (?1)", params![role.label()])?;
        }
        for status in AppointmentStatus::ALL {
            self.conn
                .execute("INSERT OR IGNORE INTO statuses (name) VALUES (?1)", params![status.label()])?;
        }
        Ok(())
    }

    /// Inserts the default site and company catalog.
    pub fn seed_catalog(&self) -> DbResult<SeedReport> {
        let mut report = SeedReport::default();

        for name in CATALOG_SITES {
            if self.find_site_by_name(name)?.is_none() {
                let site = NewSite {
                    address: Some(PENDING_ADDRESS.to_string()),
                    ..NewSite::named(name)
                };
                self.insert_site(&site)?;
                info!("Seeded site {}", name);
                report.sites_added += 1;
            }
        }

        for name in CATALOG_COMPANIES {
            if self.find_company_by_name(name)?.is_none() {
                self.conn.execute(
                    "INSERT INTO companies (name, max_per_day, priority_quota) VALUES (?1, 0, 0)",
                    params![name],
                )?;
                info!("Seeded company {}", name);
                report.companies_added += 1;
            }
        }

        Ok(report)
    }
}
