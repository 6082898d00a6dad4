use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
};
use serde_json::Value;

use shared_config::AppConfig;
use shared_database::{AppState, Database, NewSite};
use shared_models::auth::Role;

use crate::bootstrap::seed_default_users;
use crate::password::hash_password;

pub struct TestConfig {
    pub database_url: String,
    pub seed_catalog: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            database_url: ":memory:".to_string(),
            seed_catalog: false,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database_url.clone(),
            seed_catalog: self.seed_catalog,
            ..AppConfig::default()
        }
    }

    /// Store at `database_url` (in memory by default) with reference data,
    /// the default accounts and, when asked for, the site and company catalog.
    pub fn to_state(&self) -> Arc<AppState> {
        let config = self.to_app_config();
        let db = Database::from_config(&config).expect("test database");
        seed_default_users(&db).expect("default users");
        if self.seed_catalog {
            db.transaction(|s| s.seed_catalog()).expect("catalog");
        }
        Arc::new(AppState::new(config, db))
    }
}

pub fn test_state() -> Arc<AppState> {
    TestConfig::default().to_state()
}

pub struct TestFixtures;

impl TestFixtures {
    pub fn site(db: &Database, name: &str, capacity: Option<i64>, weekdays: Option<&str>) -> i64 {
        db.session(|s| {
            s.insert_site(&NewSite {
                capacity_per_day: capacity,
                allowed_weekdays: weekdays.map(str::to_string),
                ..NewSite::named(name)
            })
        })
        .expect("insert site")
    }

    pub fn company(db: &Database, name: &str, capacity: Option<i64>) -> i64 {
        db.session(|s| {
            let id = s.insert_company(name)?;
            if let Some(capacity) = capacity {
                s.set_company_capacity(id, capacity)?;
            }
            Ok::<_, shared_database::DbError>(id)
        })
        .expect("insert company")
    }

    pub fn user(db: &Database, username: &str, password: &str, role: Role) -> i64 {
        db.session(|s| s.insert_user(username, &hash_password(password), role))
            .expect("insert user")
    }
}

pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default().to_app_config();
        assert_eq!(config.database_path(), ":memory:");
        assert!(!config.seed_catalog);
    }

    #[test]
    fn test_state_has_default_users() {
        let state = test_state();
        let admin = state
            .db
            .session(|s| s.find_user_by_username("admin"))
            .unwrap();
        assert!(admin.is_some());
    }

    #[test]
    fn test_state_uses_database_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinica.db");
        let config = TestConfig {
            database_url: format!("sqlite://{}", path.display()),
            seed_catalog: true,
        };

        let state = config.to_state();
        TestFixtures::site(&state.db, "EXTRA", Some(1), None);
        drop(state);

        let reopened = Database::open(&path).unwrap();
        let admin = reopened.session(|s| s.find_user_by_username("admin")).unwrap();
        assert!(admin.is_some());
        let extra = reopened.session(|s| s.find_site_by_name("EXTRA")).unwrap();
        assert!(extra.is_some());
    }

    #[test]
    fn test_fixtures() {
        let state = test_state();
        let site = TestFixtures::site(&state.db, "A", Some(2), None);
        let company = TestFixtures::company(&state.db, "EMSSANAR", Some(1));

        let site = state.db.session(|s| s.find_site(site)).unwrap().unwrap();
        assert_eq!(site.capacity_per_day, Some(2));
        let company = state.db.session(|s| s.find_company(company)).unwrap().unwrap();
        assert_eq!(company.max_per_day, Some(1));
    }

    #[tokio::test]
    async fn test_json_body() {
        let response = (StatusCode::OK, axum::Json(serde_json::json!({"ok": true}))).into_response();
        assert_eq!(json_body(response).await["ok"], true);
    }
}
