//! The per-session list collection
//!
//! Lists and todos are addressed by position. Deleting shifts every later
//! position down by one, so callers must not cache indices across mutations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StoreError, Subject};
use crate::structs::{List, Todo};
use crate::validation::normalize_name;

/// All lists belonging to one session, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStore {
    lists: Vec<List>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list(&self, index: usize) -> Result<&List> {
        self.lists
            .get(index)
            .ok_or(StoreError::NotFound(Subject::List))
    }

    fn list_mut(&mut self, index: usize) -> Result<&mut List> {
        self.lists
            .get_mut(index)
            .ok_or(StoreError::NotFound(Subject::List))
    }

    fn todo_mut(&mut self, list_index: usize, todo_index: usize) -> Result<&mut Todo> {
        self.list_mut(list_index)?
            .todos
            .get_mut(todo_index)
            .ok_or(StoreError::NotFound(Subject::Todo))
    }

    /// Create an empty list and return its index.
    pub fn create_list(&mut self, name: &str) -> Result<usize> {
        let name = normalize_name(name, Subject::List)?;
        if self.lists.iter().any(|list| list.name == name) {
            return Err(StoreError::DuplicateName(Subject::List));
        }

        self.lists.push(List::new(name));
        let index = self.lists.len() - 1;
        debug!(index, "list created");
        Ok(index)
    }

    /// Rename a list. Keeping the current name is allowed.
    pub fn rename_list(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.lists.len() {
            return Err(StoreError::NotFound(Subject::List));
        }
        let name = normalize_name(new_name, Subject::List)?;
        let taken = self
            .lists
            .iter()
            .enumerate()
            .any(|(i, list)| i != index && list.name == name);
        if taken {
            return Err(StoreError::DuplicateName(Subject::List));
        }

        self.lists[index].name = name;
        debug!(index, "list renamed");
        Ok(())
    }

    /// Remove a list, returning it.
    pub fn delete_list(&mut self, index: usize) -> Result<List> {
        if index >= self.lists.len() {
            return Err(StoreError::NotFound(Subject::List));
        }
        debug!(index, "list deleted");
        Ok(self.lists.remove(index))
    }

    /// Append a pending todo to a list and return its index.
    pub fn create_todo(&mut self, list_index: usize, name: &str) -> Result<usize> {
        let list = self.list_mut(list_index)?;
        let name = normalize_name(name, Subject::Todo)?;
        if list.has_todo_named(&name) {
            return Err(StoreError::DuplicateName(Subject::Todo));
        }

        list.todos.push(Todo::new(name));
        let index = list.todos.len() - 1;
        debug!(list_index, index, "todo created");
        Ok(index)
    }

    /// Remove a todo, returning it.
    pub fn delete_todo(&mut self, list_index: usize, todo_index: usize) -> Result<Todo> {
        let list = self.list_mut(list_index)?;
        if todo_index >= list.todos.len() {
            return Err(StoreError::NotFound(Subject::Todo));
        }
        debug!(list_index, todo_index, "todo deleted");
        Ok(list.todos.remove(todo_index))
    }

    /// Flip a todo's completion flag, returning its new state.
    pub fn toggle_todo(&mut self, list_index: usize, todo_index: usize) -> Result<Todo> {
        let todo = self.todo_mut(list_index, todo_index)?;
        todo.completed = !todo.completed;
        debug!(list_index, todo_index, completed = todo.completed, "todo toggled");
        Ok(todo.clone())
    }

    pub fn complete_all(&mut self, list_index: usize) -> Result<()> {
        self.set_all(list_index, true)
    }

    pub fn uncomplete_all(&mut self, list_index: usize) -> Result<()> {
        self.set_all(list_index, false)
    }

    fn set_all(&mut self, list_index: usize, completed: bool) -> Result<()> {
        let list = self.list_mut(list_index)?;
        for todo in &mut list.todos {
            todo.completed = completed;
        }
        debug!(list_index, completed, "all todos updated");
        Ok(())
    }
}
