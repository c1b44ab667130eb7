use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request, StatusCode, header},
};
use axum_test::TestServer;
use tower::ServiceExt;

use crate::{predictions::export::XLSX_CONTENT_TYPE, test::fixture_app};

fn server() -> TestServer {
    TestServer::new(fixture_app()).unwrap()
}

fn form<'a>(
    team1: &'a str,
    team2: &'a str,
    toss_winner: &'a str,
    toss_decision: &'a str,
    venue: &'a str,
) -> [(&'static str, &'a str); 5] {
    [
        ("team1", team1),
        ("team2", team2),
        ("toss_winner", toss_winner),
        ("toss_decision", toss_decision),
        ("venue", venue),
    ]
}

#[tokio::test]
async fn form_lists_teams_and_sorted_venues() {
    let res = server().get("/").await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let body = res.text();
    assert!(body.contains("Predict Winner"));
    assert!(body.contains(r#"value="PBKS""#));
    let arun = body.find("Arun Jaitley Stadium").unwrap();
    let wankhede = body.find("Wankhede Stadium").unwrap();
    assert!(arun < wankhede);
}

#[tokio::test]
async fn same_team_is_rejected() {
    let res = server()
        .post("/predict")
        .form(&form("MI", "MI", "MI", "bat", "Eden Gardens"))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert!(res.text().contains("Please select different teams."));
    assert!(!res.text().contains("Predicted Winner"));
}

#[tokio::test]
async fn prediction_renders_result_and_head_to_head() {
    let res = server()
        .post("/predict")
        .form(&form("MI", "CSK", "CSK", "field", "Wankhede Stadium"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let body = res.text();
    assert!(body.contains("<html"));
    assert!(body.contains("Predicted Winner"));
    assert!(body.contains("Mumbai Indians"));
    assert!(body.contains("40.81%"));
    assert!(body.contains("Total Matches: 36"));
    assert!(body.contains("/logos/csk.jpg"));
    assert!(body.contains(r#"action="/export""#));
}

#[tokio::test]
async fn htmx_requests_get_a_fragment() {
    let res = server()
        .post("/predict")
        .add_header(
            HeaderName::from_static("hx-request"),
            HeaderValue::from_static("true"),
        )
        .form(&form("GT", "SRH", "GT", "bat", "Eden Gardens"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let body = res.text();
    assert!(!body.contains("<html"));
    assert!(body.contains("Gujarat Titans"));
    assert!(body.contains("69.06%"));
    assert!(!body.contains("Head-to-Head"));
}

#[tokio::test]
async fn unseen_venue_is_a_bad_request() {
    let res = server()
        .post("/predict")
        .form(&form("MI", "CSK", "MI", "bat", "Lord's"))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_toss_decision_is_rejected() {
    let res = server()
        .post("/predict")
        .form(&form("MI", "CSK", "MI", "bowl", "Eden Gardens"))
        .await;
    assert!(res.status_code().is_client_error());
}

#[tokio::test]
async fn export_downloads_a_workbook() {
    let res = server()
        .post("/export")
        .form(&form("MI", "CSK", "CSK", "field", "Wankhede Stadium"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.header(header::CONTENT_TYPE), XLSX_CONTENT_TYPE);
    assert_eq!(
        res.header(header::CONTENT_DISPOSITION),
        r#"attachment; filename="prediction_result.xlsx""#
    );
    assert!(res.as_bytes().starts_with(b"PK"));
}

#[tokio::test]
async fn export_of_same_teams_is_rejected() {
    let res = server()
        .post("/export")
        .form(&form("RR", "RR", "RR", "bat", "Eden Gardens"))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logos_are_served() {
    let res = fixture_app()
        .oneshot(
            Request::builder()
                .uri("/logos/RCB.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let missing = fixture_app()
        .oneshot(
            Request::builder()
                .uri("/logos/none.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
