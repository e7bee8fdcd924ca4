//! Integration tests for route guards, grant assignment, catalogue CRUD and
//! the caller's effective permissions.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use clinic_database::seed;

#[tokio::test]
async fn test_guarded_route_requires_token() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", &app.api("/roles"), None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message_key(), "ERROR.UNAUTHORIZED");
    assert_eq!(response.body["statusCode"], 401);
}

#[tokio::test]
async fn test_expired_or_forged_token_is_rejected() {
    let app = helpers::TestApp::new();
    let (admin, _) = app.admin().await;

    let mut other = app.config.auth.clone();
    other.jwt_secret = "someone-else".to_string();
    let forged = clinic_auth::JwtEncoder::new(&other)
        .issue(admin.id, None)
        .expect("issue");
    let response = app
        .request("GET", &app.api("/roles"), None, Some(&forged))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let expired = clinic_auth::JwtEncoder::new(&app.config.auth)
        .issue_with_ttl(admin.id, None, chrono::Duration::hours(-2))
        .expect("issue");
    let response = app
        .request("GET", &app.api("/roles"), None, Some(&expired))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_without_grant_is_forbidden() {
    let app = helpers::TestApp::new();
    let nurse = app.create_user("nurse@clinic.test", Some("Nurse"), None).await;
    let token = app.token_for(&nurse);

    let response = app
        .request("GET", &app.api("/roles"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message_key(), "ERROR.FORBIDDEN");
}

#[tokio::test]
async fn test_admin_lists_seeded_roles() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;

    let response = app
        .request("GET", &app.api("/roles"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message_key(), "ROLE.FOUND");
    let roles = response.data().as_array().expect("role list");
    assert_eq!(roles.len(), seed::ROLES.len());
}

#[tokio::test]
async fn test_assign_update_and_remove_permission() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    let nurse_role = app.role_id("Nurse").await;
    let permission = app.permission_id("PATIENTS", "READ_PATIENT").await;
    let body = json!({ "roleId": nurse_role, "permissionId": permission });

    let response = app
        .request(
            "POST",
            &app.api("/role-permissions/assign"),
            Some(body.clone()),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message_key(), "ROLE_PERMISSION.ASSIGNED");
    assert_eq!(response.data()["isEnabled"], true);

    let mut disable = body.clone();
    disable["isEnabled"] = json!(false);
    let response = app
        .request(
            "POST",
            &app.api("/role-permissions/assign"),
            Some(disable),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message_key(), "ROLE_PERMISSION.UPDATED");
    assert_eq!(response.data()["isEnabled"], false);

    let response = app
        .request(
            "GET",
            &app.api(&format!("/role-permissions/role/{nurse_role}")),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let rows = response.data().as_array().expect("grant list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["permissionName"], "READ_PATIENT");
    assert_eq!(rows[0]["isEffective"], false);

    let remove = app.api(&format!("/role-permissions/remove/{nurse_role}/{permission}"));
    let response = app.request("DELETE", &remove, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message_key(), "ROLE_PERMISSION.REMOVED");

    let response = app.request("DELETE", &remove, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message_key(), "ASSIGNMENT.NOT_FOUND");
}

#[tokio::test]
async fn test_assign_unknown_ids() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    let permission = app.permission_id("PATIENTS", "READ_PATIENT").await;

    let response = app
        .request(
            "POST",
            &app.api("/role-permissions/assign"),
            Some(json!({ "roleId": Uuid::new_v4(), "permissionId": permission })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message_key(), "ROLE.NOT_FOUND");

    let nurse_role = app.role_id("Nurse").await;
    let response = app
        .request(
            "POST",
            &app.api("/role-permissions/assign"),
            Some(json!({ "roleId": nurse_role, "permissionId": Uuid::new_v4() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message_key(), "PERMISSION.NOT_FOUND");

    let response = app
        .request(
            "DELETE",
            &app.api("/role-permissions/remove/not-a-role/not-a-permission"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grant_opens_and_disable_closes_route() {
    let app = helpers::TestApp::new();
    let (_, admin_token) = app.admin().await;
    let nurse = app.create_user("nurse@clinic.test", Some("Nurse"), None).await;
    let nurse_token = app.token_for(&nurse);
    let nurse_role = app.role_id("Nurse").await;
    let read_role = app.permission_id("ROLES", "READ_ROLE").await;

    let assign = |enabled: bool| {
        json!({ "roleId": nurse_role, "permissionId": read_role, "isEnabled": enabled })
    };

    app.request(
        "POST",
        &app.api("/role-permissions/assign"),
        Some(assign(true)),
        Some(&admin_token),
    )
    .await;
    let response = app
        .request("GET", &app.api("/roles"), None, Some(&nurse_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    app.request(
        "POST",
        &app.api("/role-permissions/assign"),
        Some(assign(false)),
        Some(&admin_token),
    )
    .await;
    let response = app
        .request("GET", &app.api("/roles"), None, Some(&nurse_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_module_permission_view() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    let nurse_role = app.role_id("Nurse").await;
    let patients = app.module_id("PATIENTS").await;
    let read_patient = app.permission_id("PATIENTS", "READ_PATIENT").await;

    app.request(
        "POST",
        &app.api("/role-permissions/assign"),
        Some(json!({ "roleId": nurse_role, "permissionId": read_patient })),
        Some(&token),
    )
    .await;

    let response = app
        .request(
            "GET",
            &app.api(&format!(
                "/role-permissions/role/{nurse_role}/module/{patients}"
            )),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["module"]["moduleName"], "PATIENTS");
    let statuses = response.data()["permissions"]
        .as_array()
        .expect("status list");
    assert_eq!(statuses.len(), 4);
    let assigned: Vec<_> = statuses
        .iter()
        .filter(|s| s["isAssigned"] == true)
        .collect();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["permissionName"], "READ_PATIENT");
    assert_eq!(assigned[0]["isActiveForRole"], true);
}

#[tokio::test]
async fn test_role_module_assignment() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    let nurse_role = app.role_id("Nurse").await;
    let dashboard = app.module_id("DASHBOARD").await;

    let response = app
        .request(
            "POST",
            &app.api("/role-modules/assign"),
            Some(json!({ "roleId": nurse_role, "moduleId": dashboard })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message_key(), "ROLE_MODULE.ASSIGNED");

    let response = app
        .request(
            "GET",
            &app.api(&format!("/role-modules/role/{nurse_role}")),
            None,
            Some(&token),
        )
        .await;
    let rows = response.data().as_array().expect("module grants");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["moduleName"], "DASHBOARD");
    assert_eq!(rows[0]["isEffective"], true);

    let remove = app.api(&format!("/role-modules/remove/{nurse_role}/{dashboard}"));
    let response = app.request("DELETE", &remove, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let response = app.request("DELETE", &remove, None, Some(&token)).await;
    assert_eq!(response.message_key(), "ASSIGNMENT.NOT_FOUND");
}

#[tokio::test]
async fn test_profile_with_permissions() {
    let app = helpers::TestApp::new();
    let (_, admin_token) = app.admin().await;

    let response = app
        .request(
            "GET",
            &app.api("/auth/profile-with-permissions"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["roleName"], "Admin");
    assert_eq!(
        response.data()["permissions"]
            .as_array()
            .map(Vec::len),
        Some(seed::permission_count())
    );

    let nurse = app.create_user("nurse@clinic.test", Some("Nurse"), None).await;
    let nurse_role = app.role_id("Nurse").await;
    let read_patient = app.permission_id("PATIENTS", "READ_PATIENT").await;
    app.request(
        "POST",
        &app.api("/role-permissions/assign"),
        Some(json!({ "roleId": nurse_role, "permissionId": read_patient })),
        Some(&admin_token),
    )
    .await;

    let response = app
        .request(
            "GET",
            &app.api("/auth/profile-with-permissions"),
            None,
            Some(&app.token_for(&nurse)),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let permissions = response.data()["permissions"]
        .as_array()
        .expect("permission list");
    assert_eq!(permissions.len(), 1);
    assert_eq!(permissions[0]["permissionName"], "READ_PATIENT");
    assert_eq!(permissions[0]["moduleName"], "PATIENTS");
}

#[tokio::test]
async fn test_profile_of_roleless_user_is_empty() {
    let app = helpers::TestApp::new();
    let user = app.create_user("guest@clinic.test", None, None).await;

    let response = app
        .request(
            "GET",
            &app.api("/auth/profile-with-permissions"),
            None,
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["roleId"].is_null());
    assert_eq!(response.data()["permissions"], json!([]));
    assert_eq!(response.data()["modules"], json!([]));
}

#[tokio::test]
async fn test_role_crud_conflicts() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;

    let response = app
        .request(
            "POST",
            &app.api("/roles"),
            Some(json!({ "roleName": "Pharmacist", "description": "Dispensary" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message_key(), "ROLE.CREATED");
    let id = response.data()["id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "POST",
            &app.api("/roles"),
            Some(json!({ "roleName": "Pharmacist" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message_key(), "ROLE.NAME_TAKEN");

    let response = app
        .request(
            "POST",
            &app.api("/roles"),
            Some(json!({ "roleName": "X" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            &app.api(&format!("/roles/{id}")),
            Some(json!({ "roleName": "Nurse" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request("DELETE", &app.api(&format!("/roles/{id}")), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &app.api(&format!("/roles/{id}")), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message_key(), "ROLE.NOT_FOUND");
}

#[tokio::test]
async fn test_role_in_use_cannot_be_deleted() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    app.create_user("nurse@clinic.test", Some("Nurse"), None).await;
    let nurse_role = app.role_id("Nurse").await;

    let response = app
        .request(
            "DELETE",
            &app.api(&format!("/roles/{nurse_role}")),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message_key(), "ROLE.IN_USE");
}

#[tokio::test]
async fn test_module_and_permission_catalogue() {
    let app = helpers::TestApp::new();
    let (_, token) = app.admin().await;
    let reports = app.module_id("REPORTS").await;

    let response = app
        .request(
            "DELETE",
            &app.api(&format!("/module/{reports}")),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message_key(), "MODULE.IN_USE");

    let response = app
        .request(
            "GET",
            &app.api(&format!("/permission?moduleId={reports}")),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(2));

    let response = app
        .request(
            "POST",
            &app.api("/permission"),
            Some(json!({ "permissionName": "VIEW_REPORTS", "moduleId": reports })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message_key(), "PERMISSION.NAME_TAKEN");

    let response = app
        .request(
            "POST",
            &app.api("/permission"),
            Some(json!({ "permissionName": "SCHEDULE_REPORTS", "moduleId": reports })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["moduleId"], reports.to_string());

    let response = app
        .request(
            "POST",
            &app.api("/permission"),
            Some(json!({ "permissionName": "ORPHAN", "moduleId": Uuid::new_v4() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message_key(), "MODULE.NOT_FOUND");
}
