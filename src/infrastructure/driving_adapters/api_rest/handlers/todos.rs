//! Todo Handlers
//!
//! HTTP handlers for todo CRUD operations, shaped after json-server's routes.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::domain::models::todo::TodoId;
use crate::infrastructure::driving_adapters::api_rest::dto::todo::{
    CreateTodoDto, PatchTodoDto, ReplaceTodoDto, TodoQueryDto, TodoResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for todo endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route(
            "/:id",
            get(get_todo_by_id)
                .put(replace_todo)
                .patch(patch_todo)
                .delete(delete_todo),
        )
}

fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// GET /todos - List todos, optionally filtered by `id`, `todoText` and `completed`
///
/// # Responses
///
/// * 200 OK - Matching todos in insertion order (possibly empty)
/// * 400 Bad Request - A filter value does not parse
async fn list_todos(
    State(state): State<AppState>,
    query: Result<Query<TodoQueryDto>, QueryRejection>,
) -> Result<Json<Vec<TodoResponseDto>>, ApiError> {
    let Query(query) = query?;
    let todos = state.list_todos_use_case.execute(&query.into()).await?;

    Ok(Json(todos.into_iter().map(TodoResponseDto::from).collect()))
}

/// POST /todos - Create a new todo
///
/// # Responses
///
/// * 201 Created - Todo created with the next free id
/// * 400 Bad Request - Validation error
async fn create_todo(
    State(state): State<AppState>,
    Json(dto): Json<CreateTodoDto>,
) -> Result<(StatusCode, Json<TodoResponseDto>), ApiError> {
    dto.validate()?;

    let todo = state.create_todo_use_case.execute(dto.into()).await?;

    Ok((StatusCode::CREATED, Json(TodoResponseDto::from(todo))))
}

/// GET /todos/:id - Get a todo by ID
///
/// # Responses
///
/// * 200 OK - Todo found
/// * 400 Bad Request - Id is not an integer
/// * 404 Not Found - Todo does not exist
async fn get_todo_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponseDto>, ApiError> {
    let todo = state.get_todo_by_id_use_case.execute(parse_id(&id)?).await?;

    Ok(Json(TodoResponseDto::from(todo)))
}

/// PUT /todos/:id - Replace a todo
///
/// Fields missing from the body are reset to their defaults.
///
/// # Responses
///
/// * 200 OK - Todo replaced
/// * 400 Bad Request - Validation error or malformed id
/// * 404 Not Found - Todo does not exist
async fn replace_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<ReplaceTodoDto>,
) -> Result<Json<TodoResponseDto>, ApiError> {
    dto.validate()?;
    let id = parse_id(&id)?;

    let todo = state.replace_todo_use_case.execute(id, dto.into()).await?;

    Ok(Json(TodoResponseDto::from(todo)))
}

/// PATCH /todos/:id - Partially update a todo
///
/// # Responses
///
/// * 200 OK - Todo updated
/// * 400 Bad Request - Validation error or malformed id
/// * 404 Not Found - Todo does not exist
async fn patch_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<PatchTodoDto>,
) -> Result<Json<TodoResponseDto>, ApiError> {
    dto.validate()?;
    let id = parse_id(&id)?;

    let todo = state.patch_todo_use_case.execute(id, dto.into()).await?;

    Ok(Json(TodoResponseDto::from(todo)))
}

/// DELETE /todos/:id - Delete a todo
///
/// # Responses
///
/// * 200 OK - `{}`, as json-server answers
/// * 404 Not Found - Todo does not exist
async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.delete_todo_use_case.execute(parse_id(&id)?).await?;

    Ok(Json(serde_json::json!({})))
}
