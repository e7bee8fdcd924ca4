//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use clinic_auth::JwtEncoder;
use clinic_core::config::AppConfig;
use clinic_core::types::{BranchId, ModuleId, PermissionId, RoleId};
use clinic_database::{
    MemoryDatabase, ModuleRepository, PermissionRepository, Repositories, RoleRepository,
};
use clinic_entity::branch::Branch;
use clinic_entity::user::User;

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// In-memory tables behind the app, for direct setup
    pub db: MemoryDatabase,
    /// Repository handles over the same tables
    pub repos: Repositories,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application over the seeded catalogue
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom config
    pub fn with_config(config: AppConfig) -> Self {
        let db = MemoryDatabase::seeded();
        let repos = Repositories::memory(db.clone());
        let encoder = JwtEncoder::new(&config.auth);
        let state = clinic_api::AppState::new(config.clone(), repos.clone());

        Self {
            router: clinic_api::build_app(state),
            db,
            repos,
            config,
            encoder,
        }
    }

    /// Full path for a route under the API prefix
    pub fn api(&self, path: &str) -> String {
        format!("{}{}", self.config.server.api_prefix, path)
    }

    /// Insert a branch
    pub async fn create_branch(&self, name: &str, is_active: bool) -> Branch {
        self.db.insert_branch(name, is_active).await
    }

    /// Insert a user holding a seeded role
    pub async fn create_user(
        &self,
        email: &str,
        role: Option<&str>,
        branch_id: Option<BranchId>,
    ) -> User {
        let role_id = match role {
            Some(name) => Some(self.role_id(name).await),
            None => None,
        };
        self.db.insert_user(email, role_id, branch_id).await
    }

    /// Mint an access token for a user
    pub fn token_for(&self, user: &User) -> String {
        self.encoder
            .issue(user.id, Some(&user.email))
            .expect("Failed to issue token")
    }

    /// Insert an Admin with a home branch and return it with a token
    pub async fn admin(&self) -> (User, String) {
        let branch = self.create_branch("Admin Home", true).await;
        let user = self
            .create_user("admin@clinic.test", Some("Admin"), Some(branch.id))
            .await;
        let token = self.token_for(&user);
        (user, token)
    }

    pub async fn role_id(&self, name: &str) -> RoleId {
        self.repos
            .roles
            .find_by_name(name)
            .await
            .expect("Role lookup failed")
            .unwrap_or_else(|| panic!("Role {name} is not seeded"))
            .id
    }

    pub async fn module_id(&self, name: &str) -> ModuleId {
        self.repos
            .modules
            .find_by_name(name)
            .await
            .expect("Module lookup failed")
            .unwrap_or_else(|| panic!("Module {name} is not seeded"))
            .id
    }

    pub async fn permission_id(&self, module: &str, name: &str) -> PermissionId {
        let module_id = self.module_id(module).await;
        self.repos
            .permissions
            .find_by_name_in_module(name, module_id)
            .await
            .expect("Permission lookup failed")
            .unwrap_or_else(|| panic!("Permission {name} is not seeded"))
            .id
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[])
            .await
    }

    /// Make an HTTP request with extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The envelope's `messageKey`
    pub fn message_key(&self) -> &str {
        self.body["messageKey"].as_str().unwrap_or_default()
    }

    /// The envelope's `data`
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}
