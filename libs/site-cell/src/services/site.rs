use chrono::NaiveDate;
use tracing::{debug, info};

use shared_database::{AppState, Database, SiteRecord};
use shared_models::availability::SlotAvailability;
use shared_models::facility::{validate_capacity, AvailableDaysResponse, SiteResponse, UpdateSiteRequest};
use shared_models::schedule::{is_date_allowed, normalize_allowed_days};

use crate::models::SiteError;

fn to_response(site: SiteRecord) -> SiteResponse {
    SiteResponse {
        id: site.id,
        nombre: site.name,
        dias_atencion: site.allowed_weekdays,
        sd_cant_turnos: site.capacity_per_day,
    }
}

pub struct SiteService {
    db: Database,
}

impl SiteService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
        }
    }

    pub fn list_sites(&self) -> Result<Vec<SiteResponse>, SiteError> {
        let sites = self.db.session(|s| s.list_sites())?;
        Ok(sites.into_iter().map(to_response).collect())
    }

    /// Applies only the fields present in the request.
    pub fn update_site(&self, site_id: i64, request: &UpdateSiteRequest) -> Result<(), SiteError> {
        validate_capacity(request.cant_turnos).map_err(SiteError::InvalidCapacity)?;
        let weekdays = request
            .dias_atencion
            .as_deref()
            .map(normalize_allowed_days)
            .transpose()?;

        self.db.transaction(|s| {
            if s.find_site(site_id)?.is_none() {
                return Err(SiteError::NotFound);
            }
            if let Some(capacity) = request.cant_turnos {
                s.set_site_capacity(site_id, capacity)?;
            }
            if let Some(days) = &weekdays {
                s.set_site_weekdays(site_id, days.as_deref())?;
            }
            Ok(())
        })?;

        info!(
            "Site {} updated (cant_turnos: {:?}, dias_atencion: {:?})",
            site_id, request.cant_turnos, weekdays
        );
        Ok(())
    }

    /// Weekday configuration, plus the verdict for `fecha` when one is given.
    pub fn available_days(&self, site_id: i64, fecha: Option<&str>) -> Result<AvailableDaysResponse, SiteError> {
        let site = self
            .db
            .session(|s| s.find_site(site_id))?
            .ok_or(SiteError::NotFound)?;

        let fecha_permitida = match fecha {
            Some(raw) => {
                let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| SiteError::InvalidDate(raw.to_string()))?;
                Some(is_date_allowed(site.allowed_weekdays.as_deref(), date))
            }
            None => None,
        };

        Ok(AvailableDaysResponse {
            dias_atencion: site.allowed_weekdays,
            fecha: fecha.map(str::to_string),
            fecha_permitida,
        })
    }

    pub fn slot_availability(&self, site_name: &str, fecha: &str) -> Result<SlotAvailability, SiteError> {
        // Bookings store trimmed values, so lookups must match them.
        let (site_name, fecha) = (site_name.trim(), fecha.trim());
        let (site, occupied) = self.db.session(|s| {
            let site = s.find_site_by_name(site_name)?.ok_or(SiteError::NotFound)?;
            let occupied = s.count_site_appointments(&site.name, fecha)?;
            Ok::<_, SiteError>((site, occupied))
        })?;

        let availability = SlotAvailability::from_counts(site.capacity_per_day, occupied);
        debug!(
            "Site {} on {}: {} occupied, available: {}",
            site.name, fecha, occupied, availability.has_availability
        );
        Ok(availability)
    }
}
