use axum::{
    extract::State,
    response::{Json, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "La Comedia API",
            "version": version,
            "description": "Event catalogue and admin backend for the La Comedia venue site",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "events": "/events (public - published listing)",
                "uploads": "/uploads/:file (public - poster assets)",
                "session": "/login, /logout (public - admin session)",
                "admin": "/api/admin/events[/:id] (admin session required)",
            }
        }
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// POST /login - validate the shared admin password.
///
/// Success sets the session cookie and lands on the admin event list;
/// failure bounces back to the login form with an error flag and no cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<LoginForm>,
) -> (CookieJar, Redirect) {
    match state.gate.authenticate(&form.password) {
        Ok(token) => (
            jar.add(state.gate.login_cookie(token)),
            Redirect::to("/admin/events"),
        ),
        Err(err) => {
            tracing::debug!("admin login rejected: {}", err);
            (jar, Redirect::to("/login?error=1"))
        }
    }
}

/// POST /logout - expire the session cookie immediately.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(state.gate.logout_cookie()), Redirect::to("/login"))
}

/// GET /events - published events in chronological order, no pagination.
pub async fn events(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let events = state.listing.events().await?;
    Ok(Json(json!({ "success": true, "data": events })))
}
