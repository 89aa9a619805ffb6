//! Typed endpoint wrappers against a stubbed backend

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{test_client, test_session};
use teachportal_client::{NewStudent, PortalApi, SignupRequest};
use teachportal_common::Error;

fn new_student() -> NewStudent {
    NewStudent {
        first_name: "Matilda".to_string(),
        last_name: "Wormwood".to_string(),
        email: "matilda@school.edu".to_string(),
    }
}

#[tokio::test]
async fn test_list_students_decodes_wire_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "firstName": "Matilda", "lastName": "Wormwood", "email": "matilda@school.edu" },
            { "firstName": "Bruce", "lastName": "Bogtrotter", "email": "bruce@school.edu" },
        ])))
        .mount(&server)
        .await;

    let (client, _) = test_client(&server.uri(), test_session());
    let students = client.list_students().await.unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(students[0].id, Some(1));
    assert_eq!(students[1].id, None);
    assert_eq!(students[1].first_name, "Bruce");
}

#[tokio::test]
async fn test_create_student_returns_created_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/students"))
        .and(body_json(json!({
            "firstName": "Matilda",
            "lastName": "Wormwood",
            "email": "matilda@school.edu",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "firstName": "Matilda",
            "lastName": "Wormwood",
            "email": "matilda@school.edu",
        })))
        .mount(&server)
        .await;

    let (client, _) = test_client(&server.uri(), test_session());
    let created = client.create_student(new_student()).await.unwrap();
    assert_eq!(created.id, Some(42));
}

#[tokio::test]
async fn test_create_student_empty_body_echoes_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (client, _) = test_client(&server.uri(), test_session());
    let created = client.create_student(new_student()).await.unwrap();
    assert_eq!(created.id, None);
    assert_eq!(created.first_name, "Matilda");
}

#[tokio::test]
async fn test_create_student_preflight_validation_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _) = test_client(&server.uri(), test_session());
    let err = client
        .create_student(NewStudent {
            first_name: "M".to_string(),
            last_name: "Wormwood".to_string(),
            email: "not-an-email".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_teacher_roster_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teacher"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ms. Honey", "email": "honey@school.edu", "studentCount": 12 },
            { "teacherId": 2, "userName": "trunchbull", "studentCount": 3 },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/teacher/1/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "firstName": "Matilda", "lastName": "Wormwood", "email": "matilda@school.edu" },
        ])))
        .mount(&server)
        .await;

    let (client, _) = test_client(&server.uri(), test_session());

    let teachers = client.list_teachers().await.unwrap();
    assert_eq!(teachers.len(), 2);
    assert_eq!(teachers[0].teacher_id(), Some(1));
    assert_eq!(teachers[1].teacher_id(), Some(2));
    assert_eq!(teachers[1].display_name(), "trunchbull");

    let students = client.teacher_students(1).await.unwrap();
    assert_eq!(students.len(), 1);
}

#[tokio::test]
async fn test_server_error_surfaces_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database is down" })),
        )
        .mount(&server)
        .await;

    let (client, redirected) = test_client(&server.uri(), test_session());
    let err = client.list_students().await.unwrap_err();

    match err {
        Error::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database is down");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
    // Ordinary server failures never touch the session
    assert!(!redirected.load(std::sync::atomic::Ordering::SeqCst));
}

#[tokio::test]
async fn test_network_error_when_server_unreachable() {
    // Port 9 is discard; nothing is listening on this address
    let (client, _) = test_client("http://127.0.0.1:9", test_session());
    let err = client.list_students().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_signup_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_json(json!({
            "userName": "jhoney",
            "firstName": "Jennifer",
            "lastName": "Honey",
            "email": "jhoney@school.edu",
            "passwordHash": "hunter22",
        })))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let (client, _) = test_client(&server.uri(), test_session());
    let result = client
        .signup(SignupRequest {
            user_name: "jhoney".to_string(),
            first_name: "Jennifer".to_string(),
            last_name: "Honey".to_string(),
            email: "jhoney@school.edu".to_string(),
            password_hash: "hunter22".to_string(),
        })
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_signup_conflict_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Username already taken" })),
        )
        .mount(&server)
        .await;

    let (client, _) = test_client(&server.uri(), test_session());
    let err = client
        .signup(SignupRequest {
            user_name: "jhoney".to_string(),
            first_name: "Jennifer".to_string(),
            last_name: "Honey".to_string(),
            email: "jhoney@school.edu".to_string(),
            password_hash: "hunter22".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        Error::Authentication(message) => assert_eq!(message, "Username already taken"),
        other => panic!("expected Authentication error, got {other:?}"),
    }
}
