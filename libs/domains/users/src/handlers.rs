use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestQueryResponse, BadRequestResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreateUser, CreatedUserResponse, MessageResponse, PaginatedResult, Pagination, Profile,
    UpdateUser, UpdateUserStatus, UpdatedUserResponse, User,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_user,
        list_profiles,
        list_users,
        get_user,
        update_user,
        delete_user,
        update_user_status,
        filter_by_profiles,
    ),
    components(
        schemas(
            User, Profile, CreateUser, UpdateUser, UpdateUserStatus,
            CreatedUserResponse, UpdatedUserResponse, MessageResponse,
            PaginatedResult<User>
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestQueryResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/profiles", get(list_profiles))
        .route("/filter/by-profiles", get(filter_by_profiles))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/{id}/status", patch(update_user_status))
        .with_state(shared_service)
}

/// Query for the plain user listing; both values are required
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page index
    #[validate(range(min = 1))]
    pub page: u32,
    /// Page size
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

impl From<ListUsersQuery> for Pagination {
    fn from(query: ListUsersQuery) -> Self {
        Pagination::new(query.page, query.limit)
    }
}

/// Query for filtering users by profile
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfilesFilterQuery {
    /// Comma-separated profile ids, e.g. `101,102`
    #[validate(length(min = 1))]
    pub profiles: String,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl ProfilesFilterQuery {
    /// Split the list on commas, trimming entries and dropping empty ones.
    pub fn profile_ids(&self) -> Vec<String> {
        self.profiles
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = CreatedUserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let id = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedUserResponse { id })))
}

/// List all profiles
#[utoipa::path(
    get,
    path = "/profiles",
    tag = "Users",
    responses(
        (status = 200, description = "All profiles", body = Vec<Profile>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_profiles<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<Profile>>> {
    let profiles = service.find_all_profiles().await?;
    Ok(Json(profiles))
}

/// List users, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = PaginatedResult<User>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> UserResult<Json<PaginatedResult<User>>> {
    let page = service.find_all(query.into()).await?;
    Ok(Json(page))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<Json<User>> {
    let user = service.find_one(&id).await?;
    Ok(Json(user))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UpdatedUserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UpdatedUserResponse>> {
    let user = service.update(&id, input).await?;
    Ok(Json(UpdatedUserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<impl IntoResponse> {
    service.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Activate or deactivate a user
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserStatus,
    responses(
        (status = 200, description = "User status updated successfully", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user_status<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUserStatus>,
) -> UserResult<Json<MessageResponse>> {
    service.switch_user_status(&id, input.is_active).await?;
    Ok(Json(MessageResponse {
        message: "User status updated successfully".to_string(),
    }))
}

/// List users whose profile is in the given comma-separated list
#[utoipa::path(
    get,
    path = "/filter/by-profiles",
    tag = "Users",
    params(ProfilesFilterQuery),
    responses(
        (status = 200, description = "One page of matching users", body = PaginatedResult<User>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_by_profiles<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ProfilesFilterQuery>,
) -> UserResult<Json<PaginatedResult<User>>> {
    let profile_ids = query.profile_ids();
    if profile_ids.is_empty() {
        return Err(UserError::Validation("profiles is required".to_string()));
    }

    let page = service
        .find_all_by_profiles(&profile_ids, query.pagination())
        .await?;
    Ok(Json(page))
}
