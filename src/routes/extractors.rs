use crate::models::Role;
use crate::routes::{ApiError, AppState};
use crate::services::{AuthError, TokenKind};
use actix_web::dev::Payload;
use actix_web::{http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Caller identified by a valid access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Reject callers whose account has a different role
    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.role != role {
            return Err(ApiError::Forbidden(format!(
                "Only {}s can perform this action",
                role.as_str()
            )));
        }
        Ok(())
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("Application state not configured".to_string()))?;

    let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
    let claims = state.tokens.validate(token, TokenKind::Access)?;

    Ok(AuthenticatedUser {
        user_id: claims.user_id()?,
        role: claims.role,
    })
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));

        let basic = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic Zm9vOmJhcg=="))
            .to_http_request();
        assert_eq!(bearer_token(&basic), None);

        let empty = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert_eq!(bearer_token(&empty), None);
    }

    #[test]
    fn test_require_role() {
        let user = AuthenticatedUser {
            user_id: 1,
            role: Role::Mentee,
        };
        assert!(user.require_role(Role::Mentee).is_ok());
        assert!(matches!(user.require_role(Role::Mentor), Err(ApiError::Forbidden(_))));
    }
}
