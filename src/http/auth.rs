use crate::config::ServerConfig;
use crate::http::AppState;
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone)]
pub struct Principal {
    pub username: String,
    pub password: String,
    pub roles: Vec<Role>,
}

// In-memory credential set: two static principals gate the endpoint.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    principals: Vec<Principal>,
}

impl UserRegistry {
    pub fn new(principals: Vec<Principal>) -> Self {
        Self { principals }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(vec![
            Principal {
                username: config.admin_user.clone(),
                password: config.admin_password.clone(),
                roles: vec![Role::Admin, Role::User],
            },
            Principal {
                username: config.api_user.clone(),
                password: config.api_password.clone(),
                roles: vec![Role::User],
            },
        ])
    }

    pub fn authorize(&self, authorization: Option<&str>, role: Role) -> bool {
        let Some((username, password)) = authorization.and_then(decode_basic) else {
            return false;
        };
        self.principals
            .iter()
            .any(|p| p.username == username && p.password == password && p.roles.contains(&role))
    }
}

fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

pub async fn require_user(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if !state.users.authorize(authorization, Role::User) {
        return (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, "Basic realm=\"info-api\"")],
            "Unauthorized",
        )
            .into_response();
    }

    next.run(request).await
}
