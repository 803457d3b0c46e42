//! Completion tracking
//!
//! Helpers for deciding whether a list is done and how far along it is.

use crate::structs::List;

/// A list is complete when it has todos and every one of them is done.
/// An empty list is never complete.
pub fn is_list_complete(list: &List) -> bool {
    !list.todos.is_empty() && list.todos.iter().all(|todo| todo.completed)
}

/// Number of completed todos in `list`.
pub fn progress_count(list: &List) -> usize {
    list.todos.iter().filter(|todo| todo.completed).count()
}
