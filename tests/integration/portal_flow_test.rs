//! Views driven through the real client against a stubbed backend

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{forge_token, test_client, test_session};
use teachportal_app::{DashboardView, LoginView, TeacherOverviewView};
use teachportal_client::PortalApi;

fn student_json(first: &str, last: &str, email: &str) -> serde_json::Value {
    json!({ "firstName": first, "lastName": last, "email": email })
}

#[tokio::test]
async fn test_login_then_dashboard_roundtrip() {
    let server = MockServer::start().await;
    let token = forge_token(r#"{"teacherId":7}"#);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            student_json("Matilda", "Wormwood", "matilda@school.edu"),
            student_json("Bruce", "Bogtrotter", "bruce@school.edu"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(201).set_body_json(student_json(
            "Lavender",
            "Brown",
            "lavender@school.edu",
        )))
        .mount(&server)
        .await;

    let session = test_session();
    let (client, _) = test_client(&server.uri(), session.clone());
    let api: Arc<dyn PortalApi> = Arc::new(client);

    // Login view drives the session
    let mut login = LoginView::new(Arc::clone(&api));
    login.username = "teacher".to_string();
    login.password = "hunter22".to_string();
    assert!(login.submit().await);
    assert!(session.is_authenticated());

    // Dashboard is gated on the session and loads the roster
    let mut dashboard = DashboardView::new(Arc::clone(&api), session.clone());
    assert!(dashboard.authorized());
    dashboard.refresh().await;
    assert_eq!(dashboard.table.visible().len(), 2);

    // Adding a student prepends the created record
    dashboard.first_name = "Lavender".to_string();
    dashboard.last_name = "Brown".to_string();
    dashboard.email = "lavender@school.edu".to_string();
    assert!(dashboard.add_student().await);
    assert_eq!(dashboard.table.visible()[0].first_name, "Lavender");
}

#[tokio::test]
async fn test_dashboard_filter_sort_paginate() {
    let server = MockServer::start().await;

    // Twelve students share a searchable school domain
    let roster: Vec<serde_json::Value> = (0..12)
        .map(|i| {
            let first = format!("{}{}", (b'A' + i) as char, "name");
            student_json(&first, "Shared", &format!("{}@school.edu", first.to_lowercase()))
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(roster)))
        .mount(&server)
        .await;

    let session = test_session();
    session.store_token(&forge_token(r#"{"teacherId":7}"#)).unwrap();
    let (client, _) = test_client(&server.uri(), session.clone());

    let mut dashboard = DashboardView::new(Arc::new(client), session);
    dashboard.refresh().await;

    // Substring present only in emails matches all twelve rows
    dashboard.table.set_query("SCHOOL.EDU");
    dashboard.table.set_page_size(5);
    assert_eq!(dashboard.table.total_pages(), 3);
    assert_eq!(dashboard.table.visible().len(), 5);
    dashboard.table.set_page(3);
    assert_eq!(dashboard.table.visible().len(), 2);

    // Re-selecting the active column flips to descending
    dashboard.table.toggle_sort("firstName");
    dashboard.table.set_page(1);
    assert_eq!(dashboard.table.visible()[0].first_name, "Lname");
}

#[tokio::test]
async fn test_session_rejection_mid_flow_kicks_back_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = test_session();
    session.store_token(&forge_token(r#"{"teacherId":7}"#)).unwrap();
    let (client, redirected) = test_client(&server.uri(), session.clone());

    let mut dashboard = DashboardView::new(Arc::new(client), session.clone());
    assert!(dashboard.authorized());
    dashboard.refresh().await;

    // The view sees its own failure, and the shell saw the redirect signal
    assert!(!dashboard.error.is_empty());
    assert!(redirected.load(Ordering::SeqCst));
    assert!(!session.is_authenticated());
    assert!(!dashboard.authorized());
}

#[tokio::test]
async fn test_teacher_overview_flow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teacher"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ms. Honey", "studentCount": 2 },
            { "id": 2, "name": "Trunchbull", "studentCount": 0 },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/teacher/1/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            student_json("Matilda", "Wormwood", "matilda@school.edu"),
            student_json("Bruce", "Bogtrotter", "bruce@school.edu"),
        ])))
        .mount(&server)
        .await;

    let session = test_session();
    session.store_token(&forge_token(r#"{"teacherId":7}"#)).unwrap();
    let (client, _) = test_client(&server.uri(), session);

    let mut overview = TeacherOverviewView::new(Arc::new(client));
    overview.refresh().await;
    assert_eq!(overview.totals(), (2, 2));

    let honey = overview
        .teachers
        .filtered_sorted()
        .into_iter()
        .find(|t| t.teacher_id() == Some(1))
        .unwrap();
    overview.select_teacher(honey).await;
    assert_eq!(overview.students.len(), 2);
}
