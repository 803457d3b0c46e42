//! Display ordering
//!
//! Incomplete entries come first, complete ones last, and each group keeps
//! its storage order. The projection borrows from storage and pairs every
//! entry with its storage index, which is what URLs refer to.

use crate::progress::is_list_complete;
use crate::structs::{List, Todo};

/// Stable partition of `items` into incomplete-then-complete.
pub fn display_order<T, F>(items: &[T], is_complete: F) -> Vec<(usize, &T)>
where
    F: Fn(&T) -> bool,
{
    let (done, pending): (Vec<_>, Vec<_>) = items
        .iter()
        .enumerate()
        .partition(|(_, item)| is_complete(item));
    pending.into_iter().chain(done).collect()
}

pub fn sorted_lists(lists: &[List]) -> Vec<(usize, &List)> {
    display_order(lists, is_list_complete)
}

pub fn sorted_todos(list: &List) -> Vec<(usize, &Todo)> {
    display_order(&list.todos, |todo| todo.completed)
}
