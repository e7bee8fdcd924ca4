//! Integration tests for per-request branch resolution and the admin branch filter.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use clinic_core::config::AppConfig;

const ADMIN_HEADER: &str = "x-admin-branch-id";
const BRANCH_HEADER: &str = "x-branch-id";

#[tokio::test]
async fn test_health_skips_resolution() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.message_key(), "SUCCESS");
}

#[tokio::test]
async fn test_user_resolves_to_own_branch() {
    let app = helpers::TestApp::new();
    let branch = app.create_branch("North", true).await;
    let nurse = app
        .create_user("nurse@clinic.test", Some("Nurse"), Some(branch.id))
        .await;
    let token = app.token_for(&nurse);

    let response = app
        .request("GET", &app.api("/context/branch"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["branchId"], branch.id.to_string());
    assert_eq!(response.data()["source"], "userBranch");
    assert_eq!(response.data()["isAdminFiltering"], false);
    assert_eq!(response.data()["userId"], nurse.id.to_string());
}

#[tokio::test]
async fn test_non_admin_cannot_override_branch() {
    let app = helpers::TestApp::new();
    let home = app.create_branch("Home", true).await;
    let other = app.create_branch("Other", true).await;
    let doctor = app
        .create_user("doctor@clinic.test", Some("Doctor"), Some(home.id))
        .await;
    let token = app.token_for(&doctor);
    let other_id = other.id.to_string();

    let response = app
        .request_with_headers(
            "GET",
            &app.api("/context/branch"),
            None,
            Some(&token),
            &[(ADMIN_HEADER, other_id.as_str()), (BRANCH_HEADER, other_id.as_str())],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["branchId"], home.id.to_string());
    assert_eq!(response.data()["source"], "userBranch");
}

#[tokio::test]
async fn test_admin_header_override_persists_across_requests() {
    let app = helpers::TestApp::new();
    let (admin, token) = app.admin().await;
    let target = app.create_branch("South", true).await;
    let target_id = target.id.to_string();

    let response = app
        .request_with_headers(
            "GET",
            &app.api("/context/branch"),
            None,
            Some(&token),
            &[(ADMIN_HEADER, target_id.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["branchId"], target_id);
    assert_eq!(response.data()["source"], "adminHeader");
    assert_eq!(response.data()["isAdminFiltering"], true);

    let response = app
        .request("GET", &app.api("/context/branch"), None, Some(&token))
        .await;
    assert_eq!(response.data()["branchId"], target_id);
    assert_eq!(response.data()["source"], "adminSession");
    assert_eq!(response.data()["isAdminFiltering"], false);

    let response = app
        .request(
            "GET",
            &app.api("/auth/admin-branch-filter"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["branchId"], target_id);
    assert_ne!(admin.branch_id, Some(target.id));
}

#[tokio::test]
async fn test_admin_invalid_override_is_rejected_and_not_saved() {
    let app = helpers::TestApp::new();
    let (admin, token) = app.admin().await;

    let response = app
        .request_with_headers(
            "GET",
            &app.api("/context/branch"),
            None,
            Some(&token),
            &[(ADMIN_HEADER, "not-a-uuid")],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_key(), "BRANCH.INVALID_UUID");
    assert_eq!(response.body["success"], false);

    let response = app
        .request("GET", &app.api("/context/branch"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["source"], "userBranch");
    assert_eq!(
        response.data()["branchId"],
        admin.branch_id.map(|b| b.to_string()).unwrap_or_default()
    );
}

#[tokio::test]
async fn test_unknown_and_inactive_branches() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    let closed = app.create_branch("Closed", false).await;

    let response = app
        .request_with_headers(
            "GET",
            &app.api("/context/branch"),
            None,
            Some(&token),
            &[(ADMIN_HEADER, "00000000-0000-4000-8000-000000000000")],
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message_key(), "BRANCH.NOT_FOUND");

    let response = app
        .request_with_headers(
            "GET",
            &app.api("/context/branch"),
            None,
            Some(&token),
            &[(ADMIN_HEADER, closed.id.to_string().as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_key(), "BRANCH.INACTIVE");
}

#[tokio::test]
async fn test_user_branch_deactivated_later() {
    let app = helpers::TestApp::new();
    let branch = app.create_branch("Seasonal", true).await;
    let user = app
        .create_user("user@clinic.test", Some("User"), Some(branch.id))
        .await;
    let token = app.token_for(&user);

    app.db.set_branch_active(branch.id, false).await;

    let response = app
        .request("GET", &app.api("/context/branch"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_key(), "BRANCH.INACTIVE");
}

#[tokio::test]
async fn test_anonymous_request_uses_branch_header() {
    let app = helpers::TestApp::new();
    let branch = app.create_branch("Walk-in", true).await;
    let branch_id = branch.id.to_string();

    let response = app
        .request_with_headers(
            "GET",
            &app.api("/context/branch"),
            None,
            None,
            &[(BRANCH_HEADER, branch_id.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["branchId"], branch_id);
    assert_eq!(response.data()["source"], "branchHeader");
    assert!(response.data()["userId"].is_null());

    let response = app
        .request("GET", &app.api("/context/branch"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_key(), "BRANCH.UNASSIGNED");
}

#[tokio::test]
async fn test_anonymous_fallback_can_be_disabled() {
    let mut config = AppConfig::default();
    config.branch.allow_anonymous_fallback = false;
    let app = helpers::TestApp::with_config(config);
    let branch = app.create_branch("Walk-in", true).await;

    let response = app
        .request_with_headers(
            "GET",
            &app.api("/context/branch"),
            None,
            None,
            &[(BRANCH_HEADER, branch.id.to_string().as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_key(), "BRANCH.UNDETERMINED");
}

#[tokio::test]
async fn test_branchless_admin_without_session_is_undetermined() {
    let app = helpers::TestApp::new();
    let admin = app
        .create_user("roaming@clinic.test", Some("Admin"), None)
        .await;
    let token = app.token_for(&admin);

    let response = app
        .request("GET", &app.api("/context/branch"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_key(), "BRANCH.UNDETERMINED");
}

#[tokio::test]
async fn test_excluded_routes_do_not_need_a_branch() {
    let app = helpers::TestApp::new();
    let admin = app
        .create_user("roaming@clinic.test", Some("Admin"), None)
        .await;
    let token = app.token_for(&admin);

    let response = app
        .request("GET", &app.api("/roles"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_branch_filter_endpoints() {
    let app = helpers::TestApp::new();
    let (admin, token) = app.admin().await;
    let target = app.create_branch("East", true).await;
    let target_id = target.id.to_string();

    let response = app
        .request(
            "POST",
            &app.api("/auth/admin-branch-filter"),
            Some(json!({ "branchId": target_id })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message_key(), "ADMIN_BRANCH_FILTER.SET");
    assert_eq!(response.data()["branchId"], target_id);

    let response = app
        .request("GET", &app.api("/context/branch"), None, Some(&token))
        .await;
    assert_eq!(response.data()["source"], "adminSession");
    assert_eq!(response.data()["branchId"], target_id);

    let response = app
        .request(
            "DELETE",
            &app.api("/auth/admin-branch-filter"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["branchId"].is_null());

    let response = app
        .request("GET", &app.api("/context/branch"), None, Some(&token))
        .await;
    assert_eq!(response.data()["source"], "userBranch");
    assert_eq!(
        response.data()["branchId"],
        admin.branch_id.map(|b| b.to_string()).unwrap_or_default()
    );
}

#[tokio::test]
async fn test_admin_branch_filter_rejects_bad_branches() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    let closed = app.create_branch("Closed", false).await;

    let response = app
        .request(
            "POST",
            &app.api("/auth/admin-branch-filter"),
            Some(json!({ "branchId": "1234" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_key(), "BRANCH.INVALID_UUID");

    let response = app
        .request(
            "POST",
            &app.api("/auth/admin-branch-filter"),
            Some(json!({ "branchId": closed.id.to_string() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message_key(), "BRANCH.INACTIVE");

    let response = app
        .request(
            "GET",
            &app.api("/auth/admin-branch-filter"),
            None,
            Some(&token),
        )
        .await;
    assert!(response.data()["branchId"].is_null());
}

#[tokio::test]
async fn test_admin_branch_filter_requires_admin() {
    let app = helpers::TestApp::new();
    let branch = app.create_branch("North", true).await;
    let nurse = app
        .create_user("nurse@clinic.test", Some("Nurse"), Some(branch.id))
        .await;
    let token = app.token_for(&nurse);

    let response = app
        .request(
            "POST",
            &app.api("/auth/admin-branch-filter"),
            Some(json!({ "branchId": branch.id.to_string() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &app.api("/auth/admin-branch-filter"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_clear_all_admin_branch_filters() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    let branch = app.create_branch("West", true).await;
    let second = app
        .create_user("second-admin@clinic.test", Some("Admin"), Some(branch.id))
        .await;
    let second_token = app.token_for(&second);
    let branch_id = branch.id.to_string();

    for t in [&token, &second_token] {
        let response = app
            .request(
                "POST",
                &app.api("/auth/admin-branch-filter"),
                Some(json!({ "branchId": branch_id })),
                Some(t),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request(
            "DELETE",
            &app.api("/auth/admin-branch-filter/all"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["cleared"], 2);
}

#[tokio::test]
async fn test_configured_admin_role_drives_override_and_filter() {
    let mut config = AppConfig::default();
    config.branch.admin_role_name = "Doctor".to_string();
    let app = helpers::TestApp::with_config(config);
    let home = app.create_branch("Home", true).await;
    let other = app.create_branch("Other", true).await;
    let doctor = app
        .create_user("doc@clinic.test", Some("Doctor"), Some(home.id))
        .await;
    let token = app.token_for(&doctor);
    let other_id = other.id.to_string();

    let response = app
        .request_with_headers(
            "GET",
            &app.api("/context/branch"),
            None,
            Some(&token),
            &[(ADMIN_HEADER, other_id.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["source"], "adminHeader");

    let response = app
        .request(
            "POST",
            &app.api("/auth/admin-branch-filter"),
            Some(json!({ "branchId": other_id })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["branchId"], other_id);

    let (_, admin_token) = app.admin().await;
    let response = app
        .request(
            "GET",
            &app.api("/auth/admin-branch-filter"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
