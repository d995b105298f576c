use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User, UserChanges};
use crate::error::UsersServiceError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserCreateSchema {
    pub name: String,
    pub lastname: String,
    pub age: i32,
    pub email: String,
}

impl From<UserCreateSchema> for NewUser {
    fn from(body: UserCreateSchema) -> Self {
        Self {
            name: body.name,
            lastname: body.lastname,
            age: body.age,
            email: body.email,
        }
    }
}

/// Body of both `PUT` and `PATCH`; omitted or `null` fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdateSchema {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
}

impl From<UserUpdateSchema> for UserChanges {
    fn from(body: UserUpdateSchema) -> Self {
        Self {
            name: body.name,
            lastname: body.lastname,
            age: body.age,
            email: body.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub lastname: String,
    pub age: i32,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            lastname: user.lastname,
            age: user.age,
            email: user.email,
        }
    }
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn read_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<UserResponse>, UsersServiceError> {
    let user = state.users.read_user(id).await?;
    Ok(Json(user.into()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

pub async fn create_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    AppJson(body): AppJson<UserCreateSchema>,
) -> Result<(StatusCode, Json<UserResponse>), UsersServiceError> {
    let user = state.users.create_user(&body.into()).await?;
    tracing::info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

pub async fn update_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UserUpdateSchema>,
) -> Result<Json<UserResponse>, UsersServiceError> {
    let user = state.users.update_user(id, &body.into()).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

pub async fn partial_update_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UserUpdateSchema>,
) -> Result<Json<UserResponse>, UsersServiceError> {
    let user = state.users.partial_update_user(id, &body.into()).await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, UsersServiceError> {
    state.users.delete_user(id).await?;
    tracing::info!(user_id = id, "user deleted");
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
