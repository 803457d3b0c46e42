//! List and todo records

use serde::{Deserialize, Serialize};

/// A named item with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub name: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completed: false,
        }
    }
}

/// A named, ordered collection of todos.
///
/// `todos` is kept in insertion order; positions in it are the todo
/// identifiers used by the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct List {
    pub name: String,
    pub todos: Vec<Todo>,
}

impl List {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            todos: Vec::new(),
        }
    }

    pub(crate) fn has_todo_named(&self, name: &str) -> bool {
        self.todos.iter().any(|todo| todo.name == name)
    }
}
