use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use db::models::user::{Credentials, User};
use deployment::Deployment;
use services::services::auth::Session;
use utils::{jwt::TOKEN_TTL_HOURS, response::ApiResponse};

use crate::{
    DeploymentImpl,
    error::ApiError,
    extract::Json,
    middleware::{CurrentUser, SESSION_COOKIE},
};

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::hours(TOKEN_TTL_HOURS))
        .build()
}

fn sign_in(
    deployment: &DeploymentImpl,
    jar: CookieJar,
    session: Session,
) -> (CookieJar, ResponseJson<ApiResponse<User>>) {
    let cookie = session_cookie(session.token, deployment.config().secure_cookies());
    (
        jar.add(cookie),
        ResponseJson(ApiResponse::success(session.user)),
    )
}

/// POST /api/auth/register
pub async fn register(
    State(deployment): State<DeploymentImpl>,
    jar: CookieJar,
    Json(payload): Json<Credentials>,
) -> Result<(CookieJar, ResponseJson<ApiResponse<User>>), ApiError> {
    let session = deployment.auth().register(&payload).await?;
    Ok(sign_in(&deployment, jar, session))
}

/// POST /api/auth/login
pub async fn login(
    State(deployment): State<DeploymentImpl>,
    jar: CookieJar,
    Json(payload): Json<Credentials>,
) -> Result<(CookieJar, ResponseJson<ApiResponse<User>>), ApiError> {
    let session = deployment.auth().login(&payload).await?;
    Ok(sign_in(&deployment, jar, session))
}

/// POST /api/auth/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, ResponseJson<ApiResponse<()>>) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        ResponseJson(ApiResponse::success(())),
    )
}

/// GET /api/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> ResponseJson<ApiResponse<User>> {
    ResponseJson(ApiResponse::success(user))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().nest(
        "/auth",
        Router::new()
            .route("/register", post(register))
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/me", get(me)),
    )
}
