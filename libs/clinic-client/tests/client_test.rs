use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clinic_client::{ApiClient, ClientError, Session};
use shared_models::appointment::{CreateAppointmentRequest, UpdateAppointmentRequest};
use shared_models::auth::Role;
use shared_models::facility::SiteResponse;

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri()).unwrap();
    (server, client)
}

fn booking(fecha: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        nombre_paciente: "Ana Pérez".to_string(),
        cedula_paciente: "123".to_string(),
        sede: "SEDE VERSALLES".to_string(),
        laboratorio: "Hemograma".to_string(),
        fecha: fecha.to_string(),
        empresa_paciente: None,
    }
}

#[tokio::test]
async fn test_login_success_populates_session() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"usuario": "agente", "password": "agente123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usr_id": 2, "usr_name": "agente", "r_name": "Agente"
        })))
        .mount(&server)
        .await;

    let mut session = Session::new();
    let user = client.login(&mut session, "agente", "agente123").await.unwrap();

    assert_eq!(user.usr_id, 2);
    assert!(session.is_authenticated());
    assert_eq!(session.role(), Some(Role::Agent));
}

#[tokio::test]
async fn test_failed_login_surfaces_detail() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Credenciales incorrectas"})))
        .mount(&server)
        .await;

    let mut session = Session::new();
    let err = client.login(&mut session, "ghost", "boo").await.unwrap_err();

    assert_matches!(&err, ClientError::Api { status: 401, .. });
    assert_eq!(err.to_string(), "Credenciales incorrectas");
    assert_eq!(session.failed_attempts(), 1);
}

#[tokio::test]
async fn test_five_failures_lock_the_session() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Credenciales incorrectas"})))
        .expect(5)
        .mount(&server)
        .await;

    let mut session = Session::new();
    for _ in 0..4 {
        assert_matches!(
            client.login(&mut session, "admin", "mala").await,
            Err(ClientError::Api { .. })
        );
    }
    assert_matches!(client.login(&mut session, "admin", "mala").await, Err(ClientError::LockedOut));
    assert!(session.is_locked());

    // No request leaves a locked session.
    assert_matches!(client.login(&mut session, "admin", "admin123").await, Err(ClientError::LockedOut));
}

#[tokio::test]
async fn test_wrong_challenge_answer_skips_the_server() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usr_id": 1, "usr_name": "admin", "r_name": "Admin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = Session::new();
    for _ in 0..6 {
        let wrong = (session.challenge().answer() + 1).to_string();
        assert_matches!(
            client.login_with_challenge(&mut session, "admin", "admin123", &wrong).await,
            Err(ClientError::ChallengeFailed)
        );
    }
    assert_eq!(session.failed_attempts(), 0);
    assert_matches!(
        client.login_with_challenge(&mut session, "admin", "admin123", "").await,
        Err(ClientError::ChallengeMissing)
    );

    let right = session.challenge().answer().to_string();
    let user = client
        .login_with_challenge(&mut session, "admin", "admin123", &right)
        .await
        .unwrap();
    assert_eq!(user.usr_name, "admin");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_connection_error_counts_as_failure() {
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let mut session = Session::new();

    let err = client.login(&mut session, "admin", "admin123").await.unwrap_err();

    assert_matches!(&err, ClientError::Connection(_));
    assert!(err.to_string().starts_with("Error de conexión"));
    assert_eq!(session.failed_attempts(), 1);
}

#[tokio::test]
async fn test_book_and_capacity_error() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/citas"))
        .and(body_json(json!({
            "nombre_paciente": "Ana Pérez",
            "cedula_paciente": "123",
            "sede": "SEDE VERSALLES",
            "laboratorio": "Hemograma",
            "fecha": "2024-01-10",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Cita creada con éxito", "cita_id": 41
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/citas"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "No hay turnos disponibles para la sede SEDE VERSALLES en la fecha 2024-01-10. Turnos ocupados: 2/2",
            "alcance": "sede",
        })))
        .mount(&server)
        .await;

    let receipt = client.book(&booking("2024-01-10")).await.unwrap();
    assert_eq!(receipt.cita_id, 41);

    let err = client.book(&booking("2024-01-10")).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("2/2"));
}

#[tokio::test]
async fn test_book_at_checks_weekday_first() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/citas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok", "cita_id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let site = SiteResponse {
        id: 1,
        nombre: "SEDE VERSALLES".to_string(),
        dias_atencion: Some("Miércoles".to_string()),
        sd_cant_turnos: None,
    };

    assert_matches!(
        client.book_at(&site, &booking("2024-01-11")).await,
        Err(ClientError::DateNotAllowed { .. })
    );
    client.book_at(&site, &booking("2024-01-10")).await.unwrap();
}

#[tokio::test]
async fn test_listing_and_management_calls() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/citas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1, "paciente_nombre": "Ana", "paciente_cedula": "123", "empresa": "Particular",
            "sede": "SEDE RECUERDO", "laboratorio": "Hemograma", "fecha": "2024-01-10", "estado": "Pendiente"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/citas/1"))
        .and(body_json(json!({"fecha": "2024-01-12", "estado": "Confirmada"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Cita actualizada"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/citas/9999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Cita no encontrada"})))
        .mount(&server)
        .await;

    let list = client.list_appointments().await.unwrap();
    assert_eq!(list[0].empresa, "Particular");

    let message = client
        .update_appointment(
            1,
            &UpdateAppointmentRequest { fecha: "2024-01-12".to_string(), estado: "Confirmada".to_string() },
        )
        .await
        .unwrap();
    assert_eq!(message.message, "Cita actualizada");

    let err = client.delete_appointment(9999).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Cita no encontrada");
}

#[tokio::test]
async fn test_availability_paths_are_encoded() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/sedes/SEDE%20SAN%20IGNACIO/turnos-disponibles"))
        .and(query_param("fecha", "2024-01-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "turnos_totales": null, "turnos_ocupados": 3,
            "turnos_disponibles": null, "tiene_disponibilidad": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/empresas/EMSSANAR/turnos-disponibles"))
        .and(query_param("fecha", "2024-01-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "turnos_totales": 5, "turnos_ocupados": 5,
            "turnos_disponibles": 0, "tiene_disponibilidad": false
        })))
        .mount(&server)
        .await;

    let site = client.site_availability("SEDE SAN IGNACIO", "2024-01-10").await.unwrap();
    assert!(site.is_unlimited());
    assert_eq!(site.occupied, 3);

    let company = client.company_availability("EMSSANAR", "2024-01-10").await.unwrap();
    assert!(!company.has_availability);
}

#[tokio::test]
async fn test_account_updates_need_a_session() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usr_id": 7, "usr_name": "laura", "r_name": "Paciente"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/usuarios/7/username"))
        .and(body_json(json!({"username": "laura.m"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Nombre de usuario actualizado"})))
        .mount(&server)
        .await;

    let mut session = Session::new();
    assert_matches!(
        client.update_username(&mut session, "laura.m").await,
        Err(ClientError::NotLoggedIn)
    );

    client.login(&mut session, "laura", "clave").await.unwrap();
    client.update_username(&mut session, "laura.m").await.unwrap();
    assert_eq!(session.user().unwrap().usr_name, "laura.m");
}

#[tokio::test]
async fn test_non_json_error_body() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/sedes"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.list_sites().await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 502, ref detail } if detail == "Bad Gateway");
}
