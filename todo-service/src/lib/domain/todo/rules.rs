//! State rules a patch must satisfy before it reaches storage.

use chrono::Utc;

use crate::domain::todo::errors::MutationRule;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoPatch;

/// Check `patch` against the current state of `todo`.
///
/// A done todo only accepts title or description changes when the same
/// patch also clears `done`. Clearing `done` is always allowed, and patches
/// to a todo that is not done are unrestricted. An empty patch passes.
pub fn validate_patch(todo: &Todo, patch: &TodoPatch) -> Result<(), TodoError> {
    if todo.done && patch.needs_open_todo() {
        return Err(TodoError::InvalidMutation(MutationRule::DoneIsFrozen));
    }

    // Unmarking a todo that is not done is accepted and changes nothing.

    Ok(())
}

/// Validate `patch` and return the patched todo with a fresh `updated_at`.
///
/// Nothing is persisted here.
pub fn apply_patch(todo: &Todo, patch: TodoPatch) -> Result<Todo, TodoError> {
    validate_patch(todo, &patch)?;

    Ok(Todo {
        title: patch.title.unwrap_or_else(|| todo.title.clone()),
        description: patch
            .description
            .unwrap_or_else(|| todo.description.clone()),
        done: patch.done.unwrap_or(todo.done),
        updated_at: Utc::now(),
        ..todo.clone()
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::account::models::AccountId;
    use crate::domain::todo::models::TodoDescription;
    use crate::domain::todo::models::TodoId;
    use crate::domain::todo::models::TodoTitle;

    fn todo(done: bool) -> Todo {
        let created_at = Utc::now() - Duration::hours(1);
        Todo {
            id: TodoId::new(),
            owner: AccountId::new(),
            title: TodoTitle::new("Sample".to_string()).unwrap(),
            description: TodoDescription::new("Desc".to_string()).unwrap(),
            done,
            created_at,
            updated_at: created_at,
        }
    }

    fn title(value: &str) -> Option<TodoTitle> {
        Some(TodoTitle::new(value.to_string()).unwrap())
    }

    fn description(value: &str) -> Option<TodoDescription> {
        Some(TodoDescription::new(value.to_string()).unwrap())
    }

    #[test]
    fn test_allows_updating_when_not_done() {
        let updated = apply_patch(
            &todo(false),
            TodoPatch {
                title: title("New"),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.title.as_str(), "New");
        assert_eq!(updated.description.as_str(), "Desc");
        assert!(!updated.done);
    }

    #[test]
    fn test_not_done_accepts_any_combination() {
        let patches = [
            TodoPatch {
                title: title("T"),
                description: description("D"),
                done: Some(true),
            },
            TodoPatch {
                description: description("D"),
                done: Some(false),
                ..Default::default()
            },
            TodoPatch {
                done: Some(true),
                ..Default::default()
            },
            TodoPatch {
                title: title("T"),
                done: Some(true),
                ..Default::default()
            },
        ];

        for patch in patches {
            assert!(apply_patch(&todo(false), patch).is_ok());
        }
    }

    #[test]
    fn test_prevents_updating_title_when_done() {
        let result = apply_patch(
            &todo(true),
            TodoPatch {
                title: title("X"),
                ..Default::default()
            },
        );

        assert!(matches!(
            result,
            Err(TodoError::InvalidMutation(MutationRule::DoneIsFrozen))
        ));
    }

    #[test]
    fn test_prevents_updating_description_when_done() {
        let result = apply_patch(
            &todo(true),
            TodoPatch {
                description: description("X"),
                done: Some(true),
                ..Default::default()
            },
        );

        assert!(matches!(
            result,
            Err(TodoError::InvalidMutation(MutationRule::DoneIsFrozen))
        ));
    }

    #[test]
    fn test_allows_edit_when_same_patch_unmarks() {
        let updated = apply_patch(
            &todo(true),
            TodoPatch {
                title: title("X"),
                done: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.title.as_str(), "X");
        assert!(!updated.done);
    }

    #[test]
    fn test_allows_unmarking_when_done() {
        let updated = apply_patch(
            &todo(true),
            TodoPatch {
                done: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(!updated.done);
        assert_eq!(updated.title.as_str(), "Sample");
    }

    #[test]
    fn test_unmarking_not_done_is_noop() {
        let original = todo(false);
        let updated = apply_patch(
            &original,
            TodoPatch {
                done: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.title, original.title);
        assert_eq!(updated.description, original.description);
        assert!(!updated.done);
    }

    #[test]
    fn test_empty_patch_passes_and_refreshes_timestamp() {
        let original = todo(true);
        let updated = apply_patch(&original, TodoPatch::default()).unwrap();

        assert!(updated.done);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.owner, original.owner);
    }

    #[test]
    fn test_violation_message_names_rule() {
        let err = validate_patch(
            &todo(true),
            &TodoPatch {
                title: title("X"),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Done items can only be unchecked or deleted"
        );
    }
}
