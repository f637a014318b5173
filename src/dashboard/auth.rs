//! Session login for the dashboard. Sessions are opaque random ids stored
//! server-side in Redis with a TTL; the cookie carries only the id, so no
//! signing secret is involved.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::Config;
use crate::store::{RedisStore, StoreError};
use crate::BoardEngine;

pub const SESSION_COOKIE: &str = "qboard.sid";

// ---------- SessionStore ----------

pub struct SessionStore {
    store: RedisStore,
    ttl_secs: u64,
}

impl SessionStore {
    pub fn new(store: RedisStore, ttl_secs: u64) -> Self {
        Self { store, ttl_secs }
    }

    fn key(id: &str) -> String {
        format!("qboard:session:{}", id)
    }

    /// Creates a session for `user` and returns its id. Fails when the store
    /// is unreachable: a session that cannot be persisted must not be issued.
    pub async fn create(&self, user: &str) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.store
            .set_ex(&Self::key(&id), user, self.ttl_secs as usize)
            .await?;
        Ok(id)
    }

    pub async fn validate(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.store.get(&Self::key(id)).await?.is_some())
    }

    pub async fn destroy(&self, id: &str) -> Result<(), StoreError> {
        self.store.del(&Self::key(id)).await
    }
}

// ---------- Routes ----------

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub fn router(config: &Config) -> Router<BoardEngine> {
    let login = config.server.login_page.clone();
    Router::new()
        .route(&login, get(login_page).post(login_submit))
        .route(&format!("{}/logout", login), post(logout))
}

async fn login_page() -> Html<&'static str> {
    Html(include_str!("../../dashboard/dist/login.html"))
}

async fn login_submit(
    State(engine): State<BoardEngine>,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = &engine.config.auth;
    if form.username != auth.username || form.password != auth.password {
        tracing::warn!("Rejected login for user '{}'", form.username);
        return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response();
    }

    match engine.sessions.create(&form.username).await {
        Ok(id) => {
            let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, id);
            tracing::info!("User '{}' logged in", form.username);
            (
                [(header::SET_COOKIE, cookie)],
                Redirect::to(&engine.config.server.home_page),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to persist session: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Session store unavailable").into_response()
        }
    }
}

async fn logout(State(engine): State<BoardEngine>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id_from_headers(&headers) {
        if let Err(e) = engine.sessions.destroy(&id).await {
            tracing::warn!("Failed to destroy session: {}", e);
        }
    }

    let clear = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    (
        [(header::SET_COOKIE, clear)],
        Redirect::to(&engine.config.server.login_page),
    )
        .into_response()
}

// ---------- Middleware ----------

/// Guards the board router: requests without a live session are redirected
/// to the login page.
pub async fn require_session(
    State(engine): State<BoardEngine>,
    req: Request,
    next: Next,
) -> Response {
    let authenticated = match session_id_from_headers(req.headers()) {
        Some(id) => match engine.sessions.validate(&id).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Session lookup failed: {}", e);
                false
            }
        },
        None => false,
    };

    if authenticated {
        next.run(req).await
    } else {
        Redirect::to(&engine.config.server.login_page).into_response()
    }
}

/// Pulls the session id out of a raw `Cookie` header value.
pub fn session_id_from_cookie_header(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|pair| {
        let (name, val) = pair.split_once('=')?;
        (name == SESSION_COOKIE).then(|| val.to_string())
    })
}

fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    session_id_from_cookie_header(raw)
}
