//! Role gate for routes restricted to admins or signed-in users.
//!
//! Authentication happens upstream; by the time a request arrives here the
//! caller's roles are in a trusted header (comma-separated, e.g. `ADMIN,USER`).

use std::fmt;

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, Error, ResponseError};

use crate::config::DEFAULT_ROLE_HEADER;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Accepts `ADMIN`, `admin`, `ROLE_ADMIN` and the same forms of `USER`.
    pub fn parse(label: &str) -> Option<Role> {
        let label = label.trim().to_ascii_uppercase();
        match label.strip_prefix("ROLE_").unwrap_or(&label) {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    /// Admins pass user-level checks as well.
    pub fn satisfies(&self, required: Role) -> bool {
        *self == required || *self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("USER"),
            Role::Admin => f.write_str("ADMIN"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub role_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            role_header: DEFAULT_ROLE_HEADER.to_string(),
        }
    }
}

pub fn roles_from_header(value: &str) -> Vec<Role> {
    value.split(',').filter_map(Role::parse).collect()
}

fn authorize(req: &ServiceRequest, required: Role) -> Result<(), AppError> {
    let header = req
        .app_data::<web::Data<AuthConfig>>()
        .map(|config| config.role_header.as_str())
        .unwrap_or(DEFAULT_ROLE_HEADER);

    let roles = req
        .headers()
        .get(header)
        .and_then(|value| value.to_str().ok())
        .map(roles_from_header)
        .unwrap_or_default();

    if roles.is_empty() {
        return Err(AppError::Unauthenticated);
    }
    if !roles.iter().any(|role| role.satisfies(required)) {
        return Err(AppError::Forbidden(required));
    }
    Ok(())
}

async fn guard<B: MessageBody + 'static>(
    required: Role,
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    if let Err(err) = authorize(&req, required) {
        log::warn!("Denied {} {}: {}", req.method(), req.path(), err);
        let response = err.error_response();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    guard(Role::Admin, req, next).await
}

pub async fn require_user(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    guard(Role::User, req, next).await
}
