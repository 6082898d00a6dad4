use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, warn};

use shared_models::appointment::{
    AppointmentSummary, BookingReceipt, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use shared_models::auth::{
    LoginRequest, LoginResponse, RegisterRequest, UpdatePasswordRequest, UpdateUsernameRequest,
};
use shared_models::availability::SlotAvailability;
use shared_models::facility::{
    AvailableDaysResponse, CompanyResponse, SiteResponse, UpdateCompanyRequest, UpdateSiteRequest,
};
use shared_models::MessageResponse;

use crate::error::ClientError;
use crate::schedule::check_booking_date;
use crate::session::Session;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Login, registration and booking may touch several tables server side.
const SLOW_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Connection(format!("URL inválida {}: {}", base_url, e)))?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Reads `API_URL`, falling back to the local default.
    pub fn from_env() -> Result<Self, ClientError> {
        let url = std::env::var("API_URL").unwrap_or_else(|_| {
            warn!("API_URL not set, using default {}", DEFAULT_API_URL);
            DEFAULT_API_URL.to_string()
        });
        Self::new(&url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Connection(format!("URL base inválida: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str], timeout: Duration) -> Result<RequestBuilder, ClientError> {
        let url = self.url(segments)?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url).timeout(timeout))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.detail)
                .unwrap_or(text);
            if status.is_server_error() {
                error!("API error ({}): {}", status, detail);
            } else {
                debug!("API rejected request ({}): {}", status, detail);
            }
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn health(&self) -> Result<MessageResponse, ClientError> {
        self.send(self.request(Method::GET, &[], DEFAULT_TIMEOUT)?).await
    }

    /// Logs in, tracking failures on `session`.
    ///
    /// Any failure counts, including connection errors. The fifth one locks
    /// the session and every later call returns [`ClientError::LockedOut`].
    pub async fn login(&self, session: &mut Session, usuario: &str, password: &str) -> Result<LoginResponse, ClientError> {
        if session.is_locked() {
            return Err(ClientError::LockedOut);
        }

        let body = LoginRequest {
            usuario: usuario.to_string(),
            password: password.to_string(),
        };
        let result = self
            .send::<LoginResponse>(self.request(Method::POST, &["login"], SLOW_TIMEOUT)?.json(&body))
            .await;

        match result {
            Ok(user) => {
                session.record_success(user.clone());
                Ok(user)
            }
            Err(err) => {
                if session.record_failure() {
                    warn!("Login locked after {} failed attempts", session.failed_attempts());
                    Err(ClientError::LockedOut)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Logs in only once the session's challenge is answered.
    ///
    /// A wrong answer is reported without contacting the server and does not
    /// count toward the lockout.
    pub async fn login_with_challenge(
        &self,
        session: &mut Session,
        usuario: &str,
        password: &str,
        answer: &str,
    ) -> Result<LoginResponse, ClientError> {
        if session.is_locked() {
            return Err(ClientError::LockedOut);
        }
        session.solve_challenge(answer)?;
        self.login(session, usuario, password).await
    }

    pub async fn register(&self, usuario: &str, password: &str) -> Result<MessageResponse, ClientError> {
        let body = RegisterRequest {
            usuario: usuario.to_string(),
            password: password.to_string(),
        };
        self.send(self.request(Method::POST, &["register"], SLOW_TIMEOUT)?.json(&body))
            .await
    }

    pub async fn update_username(&self, session: &mut Session, username: &str) -> Result<MessageResponse, ClientError> {
        let user_id = session.user().ok_or(ClientError::NotLoggedIn)?.usr_id.to_string();
        let body = UpdateUsernameRequest {
            username: username.to_string(),
        };
        let message = self
            .send(
                self.request(Method::PUT, &["usuarios", &user_id, "username"], DEFAULT_TIMEOUT)?
                    .json(&body),
            )
            .await?;
        session.rename(username.trim());
        Ok(message)
    }

    pub async fn update_password(&self, session: &Session, password: &str) -> Result<MessageResponse, ClientError> {
        let user_id = session.user().ok_or(ClientError::NotLoggedIn)?.usr_id.to_string();
        let body = UpdatePasswordRequest {
            password: password.to_string(),
        };
        self.send(
            self.request(Method::PUT, &["usuarios", &user_id, "password"], DEFAULT_TIMEOUT)?
                .json(&body),
        )
        .await
    }

    pub async fn book(&self, request: &CreateAppointmentRequest) -> Result<BookingReceipt, ClientError> {
        self.send(self.request(Method::POST, &["citas"], SLOW_TIMEOUT)?.json(request))
            .await
    }

    /// Books after checking locally that `site` attends on the requested weekday.
    pub async fn book_at(&self, site: &SiteResponse, request: &CreateAppointmentRequest) -> Result<BookingReceipt, ClientError> {
        check_booking_date(site, &request.fecha)?;
        self.book(request).await
    }

    pub async fn list_appointments(&self) -> Result<Vec<AppointmentSummary>, ClientError> {
        self.send(self.request(Method::GET, &["citas"], DEFAULT_TIMEOUT)?).await
    }

    pub async fn update_appointment(&self, cita_id: i64, request: &UpdateAppointmentRequest) -> Result<MessageResponse, ClientError> {
        let id = cita_id.to_string();
        self.send(self.request(Method::PUT, &["citas", &id], DEFAULT_TIMEOUT)?.json(request))
            .await
    }

    pub async fn delete_appointment(&self, cita_id: i64) -> Result<MessageResponse, ClientError> {
        let id = cita_id.to_string();
        self.send(self.request(Method::DELETE, &["citas", &id], DEFAULT_TIMEOUT)?)
            .await
    }

    pub async fn list_sites(&self) -> Result<Vec<SiteResponse>, ClientError> {
        self.send(self.request(Method::GET, &["sedes"], DEFAULT_TIMEOUT)?).await
    }

    pub async fn update_site(&self, site_id: i64, request: &UpdateSiteRequest) -> Result<MessageResponse, ClientError> {
        let id = site_id.to_string();
        self.send(self.request(Method::PUT, &["sedes", &id], DEFAULT_TIMEOUT)?.json(request))
            .await
    }

    pub async fn available_days(&self, site_id: i64, fecha: Option<&str>) -> Result<AvailableDaysResponse, ClientError> {
        let id = site_id.to_string();
        let mut request = self.request(Method::GET, &["sedes", &id, "dias-disponibles"], DEFAULT_TIMEOUT)?;
        if let Some(fecha) = fecha {
            request = request.query(&[("fecha", fecha)]);
        }
        self.send(request).await
    }

    pub async fn site_availability(&self, site_name: &str, fecha: &str) -> Result<SlotAvailability, ClientError> {
        let request = self
            .request(Method::GET, &["sedes", site_name, "turnos-disponibles"], DEFAULT_TIMEOUT)?
            .query(&[("fecha", fecha)]);
        self.send(request).await
    }

    pub async fn list_companies(&self) -> Result<Vec<CompanyResponse>, ClientError> {
        self.send(self.request(Method::GET, &["empresas"], DEFAULT_TIMEOUT)?).await
    }

    pub async fn update_company(&self, company_id: i64, request: &UpdateCompanyRequest) -> Result<MessageResponse, ClientError> {
        let id = company_id.to_string();
        self.send(self.request(Method::PUT, &["empresas", &id], DEFAULT_TIMEOUT)?.json(request))
            .await
    }

    pub async fn company_availability(&self, company_name: &str, fecha: &str) -> Result<SlotAvailability, ClientError> {
        let request = self
            .request(Method::GET, &["empresas", company_name, "turnos-disponibles"], DEFAULT_TIMEOUT)?
            .query(&[("fecha", fecha)]);
        self.send(request).await
    }
}
