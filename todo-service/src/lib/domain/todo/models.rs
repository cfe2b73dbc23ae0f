use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::PaginationError;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::todo::errors::TodoTextError;

/// Todo entity owned by a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub owner: AccountId,
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Todo unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    /// Generate a new random todo ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn validate_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, TodoTextError> {
    let length = value.chars().count();
    if value.trim().is_empty() {
        Err(TodoTextError::Empty { field })
    } else if length > max {
        Err(TodoTextError::TooLong {
            field,
            max,
            actual: length,
        })
    } else {
        Ok(value)
    }
}

/// Todo title value type (1-200 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, TodoTextError> {
        validate_text("Title", title, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Todo description value type (1-2000 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    const MAX_LENGTH: usize = 2000;

    pub fn new(description: String) -> Result<Self, TodoTextError> {
        validate_text("Description", description, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a new todo
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: TodoDescription,
}

/// Partial update of a todo.
///
/// `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<TodoTitle>,
    pub description: Option<TodoDescription>,
    pub done: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.done.is_none()
    }

    /// Whether the patch writes title or description.
    pub fn touches_content(&self) -> bool {
        self.title.is_some() || self.description.is_some()
    }

    /// Whether the patch may only land on a todo that is not done.
    pub fn needs_open_todo(&self) -> bool {
        self.touches_content() && self.done != Some(false)
    }
}

/// Window over an account's todos, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 50;

    /// # Errors
    /// * `LimitOutOfRange` - Limit is zero, negative or above 50
    /// * `OffsetOutOfRange` - Offset is negative or does not fit in a `u32`
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, PaginationError> {
        let raw_limit = limit.unwrap_or(i64::from(Self::DEFAULT_LIMIT));
        let limit = u32::try_from(raw_limit)
            .ok()
            .filter(|l| (1..=Self::MAX_LIMIT).contains(l))
            .ok_or(PaginationError::LimitOutOfRange {
                min: 1,
                max: Self::MAX_LIMIT,
                actual: raw_limit,
            })?;

        let raw_offset = offset.unwrap_or(0);
        let offset = u32::try_from(raw_offset).map_err(|_| PaginationError::OffsetOutOfRange {
            max: u32::MAX,
            actual: raw_offset,
        })?;

        Ok(Self { limit, offset })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert!(TodoTitle::new("Buy milk".to_string()).is_ok());
        assert_eq!(
            TodoTitle::new("".to_string()),
            Err(TodoTextError::Empty { field: "Title" })
        );
        assert!(matches!(
            TodoTitle::new("x".repeat(201)),
            Err(TodoTextError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_description_validation() {
        assert!(TodoDescription::new("Two litres".to_string()).is_ok());
        assert_eq!(
            TodoDescription::new(" ".to_string()),
            Err(TodoTextError::Empty {
                field: "Description"
            })
        );
    }

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(
            Pagination::new(None, None),
            Ok(Pagination {
                limit: 10,
                offset: 0
            })
        );
        assert_eq!(
            Pagination::new(Some(50), Some(20)),
            Ok(Pagination {
                limit: 50,
                offset: 20
            })
        );
    }

    #[test]
    fn test_pagination_limit_bounds() {
        assert!(Pagination::new(Some(0), None).is_err());
        assert!(Pagination::new(Some(51), None).is_err());
        assert!(Pagination::new(Some(-3), None).is_err());
    }

    #[test]
    fn test_pagination_offset_bounds() {
        assert_eq!(
            Pagination::new(None, Some(-1)),
            Err(PaginationError::OffsetOutOfRange {
                max: u32::MAX,
                actual: -1
            })
        );
        assert!(Pagination::new(None, Some(i64::from(u32::MAX) + 1)).is_err());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TodoPatch::default().is_empty());
        assert!(!TodoPatch {
            done: Some(false),
            ..Default::default()
        }
        .is_empty());
    }
}
