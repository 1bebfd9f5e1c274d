use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Result};

use crate::error::AppError;
use crate::models::{Todo, SCHEMA, TODO_COLUMNS};
use crate::schemas::{CreateTodo, Pagination, UpdateTodo};

/// Shared handle to the store. Each operation locks it for its whole
/// duration; the guard is released on every return path.
pub type DbPool = Arc<Mutex<Connection>>;

pub fn init_db(path: impl AsRef<Path>) -> Result<DbPool> {
    prepare(Connection::open(path)?)
}

pub fn init_memory_db() -> Result<DbPool> {
    prepare(Connection::open_in_memory()?)
}

fn prepare(conn: Connection) -> Result<DbPool> {
    conn.execute_batch(SCHEMA)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn acquire(pool: &DbPool) -> Result<MutexGuard<'_, Connection>, AppError> {
    pool.lock().map_err(|_| AppError::StoreUnavailable)
}

pub fn list_todos(pool: &DbPool, page: Pagination) -> Result<Vec<Todo>, AppError> {
    let conn = acquire(pool)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {TODO_COLUMNS} FROM todos ORDER BY id ASC LIMIT ?1 OFFSET ?2"
    ))?;
    let todos = stmt
        .query_map((i64::from(page.limit), i64::from(page.skip)), Todo::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(todos)
}

pub fn get_todo(pool: &DbPool, id: i64) -> Result<Option<Todo>, AppError> {
    let conn = acquire(pool)?;
    get_todo_internal(&conn, id)
}

pub fn create_todo(pool: &DbPool, req: &CreateTodo) -> Result<Todo, AppError> {
    let conn = acquire(pool)?;
    conn.execute(
        "INSERT INTO todos (title, content) VALUES (?1, ?2)",
        (&req.title, req.content()),
    )?;
    let id = conn.last_insert_rowid();

    // Re-read to pick up the defaults the store filled in.
    let todo = conn.query_row(
        &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
        [id],
        Todo::from_row,
    )?;
    Ok(todo)
}

/// Applies only the fields present in `req`. Returns `None` when `id` does
/// not exist; nothing is created in that case.
pub fn update_todo(pool: &DbPool, id: i64, req: &UpdateTodo) -> Result<Option<Todo>, AppError> {
    let conn = acquire(pool)?;

    let mut updates = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(title) = req.title() {
        updates.push("title = ?");
        params.push(Box::new(title.to_string()));
    }
    if let Some(content) = req.content() {
        updates.push("content = ?");
        params.push(Box::new(content.to_string()));
    }
    if let Some(completed) = req.completed {
        updates.push("completed = ?");
        params.push(Box::new(completed as i32));
    }

    if updates.is_empty() {
        return get_todo_internal(&conn, id);
    }

    updates.push("updated_at = strftime('%s', 'now')");
    params.push(Box::new(id));

    let query = format!("UPDATE todos SET {} WHERE id = ?", updates.join(", "));

    let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    if conn.execute(&query, params_refs.as_slice())? == 0 {
        return Ok(None);
    }

    get_todo_internal(&conn, id)
}

/// Hard delete. Returns `false` when `id` does not exist.
pub fn delete_todo(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let conn = acquire(pool)?;
    let rows = conn.execute("DELETE FROM todos WHERE id = ?1", [id])?;
    Ok(rows > 0)
}

fn get_todo_internal(conn: &Connection, id: i64) -> Result<Option<Todo>, AppError> {
    let todo = conn
        .query_row(
            &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
            [id],
            Todo::from_row,
        )
        .optional()?;
    Ok(todo)
}
