//! # List Store
//!
//! In-session to-do lists: creation, renaming, deletion and completion of
//! lists and their todos, name validation, and the display ordering used by
//! the rendering layer. Everything here is plain synchronous state; the web
//! layer owns one [`ListStore`] per browser session.

pub mod error;
pub mod ordering;
pub mod progress;
pub mod store;
pub mod structs;
pub mod validation;

// Re-exports
pub use error::{Result, StoreError, Subject};
pub use ordering::{display_order, sorted_lists, sorted_todos};
pub use progress::{is_list_complete, progress_count};
pub use store::ListStore;
pub use structs::{List, Todo};
pub use validation::MAX_NAME_LEN;
