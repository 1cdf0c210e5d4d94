use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::SESSION_COOKIE;
use crate::state::AppState;

/// Admin gate middleware: validates the session cookie and injects
/// [`crate::auth::AdminSession`] into request extensions.
///
/// Any failure redirects to the login entry point; admin data is never
/// exposed, not even partially.
pub async fn admin_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Redirect::to("/login").into_response();
    };

    match state.gate.verify(cookie.value()) {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!("rejected admin request: {}", err);
            Redirect::to("/login").into_response()
        }
    }
}
