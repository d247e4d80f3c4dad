use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use db::models::user::User;
use deployment::Deployment;
use services::services::auth::AuthError;

use crate::{DeploymentImpl, error::ApiError};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// The signed-in user, resolved from the session cookie. Handlers that take
/// this extractor reject anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<DeploymentImpl> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        deployment: &DeploymentImpl,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AuthError::Unauthenticated)?;
        let user = deployment.auth().authenticate(&token).await?;
        Ok(CurrentUser(user))
    }
}
