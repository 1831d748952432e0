use super::validate_user::validate_credentials;
use crate::db::SqlitePool;
use crate::errors::custom::ApiError;
use crate::schema::users::dsl::*;
use crate::validations::name_email::{UserEmail, UserName};
use actix_web::{web, HttpResponse};
use argon2::{self, password_hash::SaltString, Argon2, PasswordHasher};
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

#[derive(Deserialize)]
pub struct RegisterBody {
    name: String,
    email: String,
    password: String,
    role: String,
}
impl RegisterBody {
    pub fn validate(&self) -> Result<(UserName, UserEmail), String> {
        let user_name = UserName::parse(self.name.clone())?;
        let user_email = UserEmail::parse(self.email.clone())?;
        Ok((user_name, user_email))
    }
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
    pub role: String,
}

fn generate_random_salt() -> SaltString {
    let mut rng = rand::thread_rng();
    SaltString::generate(&mut rng)
}

/******************************************/
// Registering User Route
/******************************************/
/**
 * @route   POST /api/register
 * @access  Public
 */
#[instrument(name = "Register a new user", skip(req_user, pool), fields(user_email = %req_user.email))]
pub async fn register_user(
    pool: web::Data<SqlitePool>,
    req_user: web::Json<RegisterBody>,
) -> Result<HttpResponse, ApiError> {
    let pool = pool.clone();
    let user_data = req_user.into_inner();
    let (validated_name, validated_email) = user_data
        .validate()
        .map_err(ApiError::ValidationError)?;
    let user_password = user_data.password;
    let user_role = user_data.role;

    let created = web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;

        let existing: Option<i32> = users
            .filter(email.eq(validated_email.as_ref()))
            .select(id)
            .first(&mut conn)
            .optional()?;
        if existing.is_some() {
            return Ok::<_, ApiError>(false);
        }

        let argon2 = Argon2::default();
        let salt = generate_random_salt();
        let hashed_password = argon2
            .hash_password(user_password.as_bytes(), &salt)
            .map_err(|err| ApiError::HashingError(err.to_string()))?;

        diesel::insert_into(users)
            .values((
                name.eq(validated_name.as_ref()),
                email.eq(validated_email.as_ref()),
                password_hash.eq(hashed_password.to_string()),
                role.eq(&user_role),
            ))
            .execute(&mut conn)?;
        Ok(true)
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    if created {
        Ok(HttpResponse::Ok().json(json!({ "success": true })))
    } else {
        Ok(HttpResponse::Ok().json(json!({
            "success": false,
            "message": "Email already exists"
        })))
    }
}

/******************************************/
// Login Route
/******************************************/
/**
 * @route   POST /api/login
 * @access  Public
 */
#[instrument(name = "Login a user", skip(req_login, pool), fields(user_email = %req_login.email))]
pub async fn login_user(
    pool: web::Data<SqlitePool>,
    req_login: web::Json<LoginBody>,
) -> Result<HttpResponse, ApiError> {
    let profile = validate_credentials(&pool, req_login.into_inner()).await?;

    // No session or token: the caller holds the returned profile client-side.
    match profile {
        Some(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "name": user.name,
            "email": user.email,
            "role": user.role,
        }))),
        None => Ok(HttpResponse::Ok().json(json!({
            "success": false,
            "message": "Invalid credentials"
        }))),
    }
}
