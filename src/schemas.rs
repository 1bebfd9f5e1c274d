//! Request and response payloads.
//!
//! Serde handles shape and type checks; `validate` covers the field rules
//! serde cannot express. Everything here runs before the store is touched.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_LIMIT: u32 = 100;

/// Body of `POST /todos`. Server-assigned fields are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodo {
    pub title: String,
    pub content: Option<String>,
}

impl CreateTodo {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)
    }

    /// Content to persist; an empty string is stored as absent.
    pub fn content(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }
}

/// Body of `PUT /todos/{id}`. `null`, empty and missing fields all mean
/// "leave as is".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub content: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// New title, if one was given. A blank title is ignored so a stored
    /// title can never become empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn content(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Payload of `GET /config`, consumed by the web frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_base_url: String,
    pub environment: String,
    pub version: String,
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
