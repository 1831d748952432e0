use crate::db::SqlitePool;
use crate::db_models::User;
use crate::errors::custom::ApiError;
use crate::routes::auth::auth::LoginBody;
use crate::schema::users::dsl::*;
use actix_web::web;
use argon2::{self, Argon2, PasswordHash, PasswordVerifier};
use diesel::prelude::*;
use tracing::instrument;

#[instrument(name = "Get stored user", skip(user_email, pool), fields(user_email = %user_email))]
fn get_stored_user(
    pool: &SqlitePool,
    user_email: &str,
    user_role: &str,
) -> Result<Option<User>, ApiError> {
    let mut conn = pool
        .get()
        .map_err(|err| ApiError::DatabaseError(err.to_string()))?;

    let user = users
        .filter(email.eq(user_email))
        .filter(role.eq(user_role))
        .first::<User>(&mut conn)
        .optional()?;
    Ok(user)
}

#[instrument(name = "Verify password", skip(expected_hash, candidate))]
fn verify_password(expected_hash: &str, candidate: &str) -> Result<bool, ApiError> {
    let argon2 = Argon2::default();
    let parsed_hash = PasswordHash::new(expected_hash)
        .map_err(|err| ApiError::HashingError(err.to_string()))?;

    Ok(argon2
        .verify_password(candidate.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Looks up the (email, role) pair and checks the password hash. `None`
/// means the credentials do not match; the caller decides how to answer.
#[instrument(name = "Validate credentials", skip(req_login, pool), fields(user_email = %req_login.email))]
pub async fn validate_credentials(
    pool: &SqlitePool,
    req_login: LoginBody,
) -> Result<Option<User>, ApiError> {
    let pool = pool.clone();
    web::block(move || {
        let user = match get_stored_user(&pool, &req_login.email, &req_login.role)? {
            Some(user) => user,
            None => return Ok(None),
        };

        if verify_password(&user.password_hash, &req_login.password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))?
}
