use tracing::{debug, info, warn};

use shared_database::{AppState, CompanyRecord, Database, NewAppointment, Session};
use shared_models::appointment::{BookingReceipt, CreateAppointmentRequest};
use shared_models::availability::{CapacityExceeded, CapacityScope, SlotAvailability};
use shared_models::status::AppointmentStatus;

use crate::models::{required, AppointmentError};

/// Trimmed and checked copy of a booking request.
#[derive(Debug)]
struct BookingInput<'a> {
    patient_name: &'a str,
    national_id: &'a str,
    site: &'a str,
    lab_test: &'a str,
    date: &'a str,
    company: Option<&'a str>,
}

impl<'a> BookingInput<'a> {
    fn parse(request: &'a CreateAppointmentRequest) -> Result<Self, AppointmentError> {
        Ok(Self {
            patient_name: required("nombre_paciente", &request.nombre_paciente)?,
            national_id: required("cedula_paciente", &request.cedula_paciente)?,
            site: required("sede", &request.sede)?,
            lab_test: required("laboratorio", &request.laboratorio)?,
            date: required("fecha", &request.fecha)?,
            company: request
                .empresa_paciente
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        })
    }
}

pub struct BookingService {
    db: Database,
}

impl BookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
        }
    }

    /// Books an appointment after checking the site and company daily quotas.
    ///
    /// Every check and write happens inside one immediate transaction, so two
    /// concurrent bookings cannot both take the last slot.
    pub fn book(&self, request: &CreateAppointmentRequest) -> Result<BookingReceipt, AppointmentError> {
        let input = BookingInput::parse(request)?;
        debug!("Booking {} at {} on {}", input.national_id, input.site, input.date);

        let cita_id = self.db.transaction(|s| {
            check_site_capacity(s, input.site, input.date)?;
            let company = match input.company {
                Some(name) => Some(check_company_capacity(s, name, input.date)?),
                None => None,
            };
            let patient_id = upsert_patient(s, &input, company.as_ref())?;

            let id = s.insert_appointment(&NewAppointment {
                patient_id,
                site: input.site.to_string(),
                lab_test: input.lab_test.to_string(),
                date: input.date.to_string(),
                status: AppointmentStatus::Pending,
            })?;
            Ok::<_, AppointmentError>(id)
        })?;

        info!("Appointment {} booked at {} for {}", cita_id, input.site, input.date);
        Ok(BookingReceipt {
            message: "Cita creada con éxito".to_string(),
            cita_id,
        })
    }
}

/// Sites missing from the catalog are booked without a quota.
fn check_site_capacity(s: &Session<'_>, site: &str, date: &str) -> Result<(), AppointmentError> {
    let Some(record) = s.find_site_by_name(site)? else {
        debug!("Site {} is not in the catalog, skipping capacity check", site);
        return Ok(());
    };
    let occupied = s.count_site_appointments(site, date)?;
    let availability = SlotAvailability::from_counts(record.capacity_per_day, occupied);
    CapacityExceeded::check(CapacityScope::Site, site, date, &availability)?;
    Ok(())
}

/// Resolves the company, creating it without a quota when it is new.
fn check_company_capacity(
    s: &Session<'_>,
    name: &str,
    date: &str,
) -> Result<CompanyRecord, AppointmentError> {
    let company = s.find_or_create_company(name)?;
    let occupied = s.count_company_appointments(company.id, date)?;
    let availability = SlotAvailability::from_counts(company.max_per_day, occupied);
    CapacityExceeded::check(CapacityScope::Company, &company.name, date, &availability)?;
    Ok(company)
}

fn upsert_patient(
    s: &Session<'_>,
    input: &BookingInput<'_>,
    company: Option<&CompanyRecord>,
) -> Result<i64, AppointmentError> {
    let company_id = company.map(|c| c.id);
    let Some(patient) = s.find_patient_by_national_id(input.national_id)? else {
        let id = s.insert_patient(input.patient_name, input.national_id, company_id)?;
        debug!("Created patient {} ({})", id, input.national_id);
        return Ok(id);
    };

    if let Some(company_id) = company_id {
        if patient.company_id.is_some_and(|current| current != company_id) {
            warn!(
                "Patient {} moved from company {:?} to {}",
                patient.national_id, patient.company_id, company_id
            );
        }
        s.set_patient_company(patient.id, company_id)?;
    }
    Ok(patient.id)
}
