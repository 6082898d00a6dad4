use tracing::{debug, info};

use shared_database::{AppState, CompanyRecord, Database};
use shared_models::availability::SlotAvailability;
use shared_models::facility::{validate_capacity, CompanyResponse, UpdateCompanyRequest};

use crate::models::CompanyError;

fn to_response(company: CompanyRecord) -> CompanyResponse {
    CompanyResponse {
        id: company.id,
        nombre: company.name,
        cant_turnos: company.max_per_day,
    }
}

pub struct CompanyService {
    db: Database,
}

impl CompanyService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
        }
    }

    pub fn list_companies(&self) -> Result<Vec<CompanyResponse>, CompanyError> {
        let companies = self.db.session(|s| s.list_companies())?;
        Ok(companies.into_iter().map(to_response).collect())
    }

    /// An absent `cant_turnos` leaves the company untouched but still checks it exists.
    pub fn update_company(&self, company_id: i64, request: &UpdateCompanyRequest) -> Result<(), CompanyError> {
        validate_capacity(request.cant_turnos).map_err(CompanyError::InvalidCapacity)?;

        self.db.transaction(|s| {
            if s.find_company(company_id)?.is_none() {
                return Err(CompanyError::NotFound);
            }
            if let Some(capacity) = request.cant_turnos {
                s.set_company_capacity(company_id, capacity)?;
            }
            Ok(())
        })?;

        info!("Company {} updated (cant_turnos: {:?})", company_id, request.cant_turnos);
        Ok(())
    }

    /// Counts appointments of every patient currently attached to the company.
    pub fn slot_availability(&self, company_name: &str, fecha: &str) -> Result<SlotAvailability, CompanyError> {
        let (company_name, fecha) = (company_name.trim(), fecha.trim());
        let (company, occupied) = self.db.session(|s| {
            let company = s
                .find_company_by_name(company_name)?
                .ok_or(CompanyError::NotFound)?;
            let occupied = s.count_company_appointments(company.id, fecha)?;
            Ok::<_, CompanyError>((company, occupied))
        })?;

        let availability = SlotAvailability::from_counts(company.max_per_day, occupied);
        debug!(
            "Company {} on {}: {} occupied, available: {}",
            company.name, fecha, occupied, availability.has_availability
        );
        Ok(availability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_database::NewAppointment;
    use shared_models::status::AppointmentStatus;
    use shared_utils::test_utils::{test_state, TestFixtures};

    fn book_for(db: &Database, company_id: i64, national_id: &str, date: &str) {
        db.session(|s| {
            let patient = s.insert_patient("Paciente", national_id, Some(company_id))?;
            s.insert_appointment(&NewAppointment {
                patient_id: patient,
                site: "A".to_string(),
                lab_test: "Orina".to_string(),
                date: date.to_string(),
                status: AppointmentStatus::Pending,
            })
        })
        .unwrap();
    }

    #[test]
    fn test_list_and_update() {
        let state = test_state();
        let id = TestFixtures::company(&state.db, "EMSSANAR", None);
        let service = CompanyService::new(&state);

        service
            .update_company(id, &UpdateCompanyRequest { cant_turnos: Some(3) })
            .unwrap();
        let companies = service.list_companies().unwrap();
        assert_eq!(
            companies,
            vec![CompanyResponse { id, nombre: "EMSSANAR".to_string(), cant_turnos: Some(3) }]
        );

        service.update_company(id, &UpdateCompanyRequest::default()).unwrap();
        assert_eq!(service.list_companies().unwrap()[0].cant_turnos, Some(3));
    }

    #[test]
    fn test_update_rejections() {
        let state = test_state();
        let id = TestFixtures::company(&state.db, "MALLAMAS", Some(0));
        let service = CompanyService::new(&state);

        assert_matches!(
            service.update_company(9999, &UpdateCompanyRequest { cant_turnos: Some(1) }),
            Err(CompanyError::NotFound)
        );
        assert_matches!(
            service.update_company(id, &UpdateCompanyRequest { cant_turnos: Some(-5) }),
            Err(CompanyError::InvalidCapacity(_))
        );
    }

    #[test]
    fn test_slot_availability() {
        let state = test_state();
        let id = TestFixtures::company(&state.db, "EMSSANAR", Some(1));
        book_for(&state.db, id, "1", "2024-01-10");
        book_for(&state.db, id, "2", "2024-01-11");
        let service = CompanyService::new(&state);

        let availability = service.slot_availability("EMSSANAR", "2024-01-10").unwrap();
        assert_eq!(availability.occupied, 1);
        assert_eq!(availability.remaining, Some(0));
        assert!(!availability.has_availability);

        let other_day = service.slot_availability("EMSSANAR", "2024-01-12").unwrap();
        assert!(other_day.has_availability);

        assert_matches!(service.slot_availability("NUEVA EPS", "2024-01-10"), Err(CompanyError::NotFound));
    }

    #[test]
    fn test_slot_availability_trims_inputs() {
        let state = test_state();
        let id = TestFixtures::company(&state.db, "EMSSANAR", Some(2));
        book_for(&state.db, id, "1", "2024-01-10");

        let availability = CompanyService::new(&state)
            .slot_availability("EMSSANAR ", "\t2024-01-10")
            .unwrap();
        assert_eq!(availability.occupied, 1);
        assert_eq!(availability.remaining, Some(1));
    }

    #[test]
    fn test_zero_quota_is_unlimited() {
        let state = test_state();
        let id = TestFixtures::company(&state.db, "MALLAMAS", Some(0));
        book_for(&state.db, id, "1", "2024-01-10");
        let availability = CompanyService::new(&state)
            .slot_availability("MALLAMAS", "2024-01-10")
            .unwrap();
        assert!(availability.is_unlimited());
        assert!(availability.has_availability);
    }
}
