use axum::extract::{Path, Query, State};
use axum::Json;
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::db::{create_todo, delete_todo, get_todo, list_todos, update_todo};
use crate::error::AppError;
use crate::extract::{JsonBody, PathId, QueryParams};
use crate::models::Todo;
use crate::schemas::{CreateTodo, Pagination, UpdateTodo};
use crate::AppState;

pub async fn list_all_todos(
    State(state): State<AppState>,
    WithRejection(Query(page), _): QueryParams<Pagination>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = list_todos(&state.db, page)?;
    debug!(skip = page.skip, limit = page.limit, count = todos.len(), "Listed todos");
    Ok(Json(todos))
}

pub async fn create_new_todo(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<CreateTodo>,
) -> Result<Json<Todo>, AppError> {
    req.validate()?;

    let todo = create_todo(&state.db, &req)?;
    info!(id = todo.id, title = %todo.title, "Created todo");
    Ok(Json(todo))
}

pub async fn get_single_todo(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathId,
) -> Result<Json<Todo>, AppError> {
    match get_todo(&state.db, id)? {
        Some(todo) => Ok(Json(todo)),
        None => Err(AppError::NotFound),
    }
}

pub async fn update_existing_todo(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathId,
    WithRejection(Json(req), _): JsonBody<UpdateTodo>,
) -> Result<Json<Todo>, AppError> {
    match update_todo(&state.db, id, &req)? {
        Some(todo) => {
            info!(id = todo.id, completed = todo.completed, "Updated todo");
            Ok(Json(todo))
        }
        None => Err(AppError::NotFound),
    }
}

pub async fn delete_existing_todo(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathId,
) -> Result<Json<Value>, AppError> {
    if delete_todo(&state.db, id)? {
        info!(id, "Deleted todo");
        Ok(Json(json!({ "message": "Todo deleted successfully" })))
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn no_route() -> AppError {
    AppError::NoRoute
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
