//! HTML rendering
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! Template names end in `.html`, which turns on HTML auto-escaping for every
//! interpolated value. Pages receive plain view records built from the
//! display ordering, each carrying the storage index used in its URLs.

use list_store::{
    is_list_complete, progress_count, sorted_lists, sorted_todos, List, ListStore, Todo,
};
use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::Result;
use crate::flash::Flash;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("lists.html", include_str!("../templates/lists.html")),
    ("new_list.html", include_str!("../templates/new_list.html")),
    ("list.html", include_str!("../templates/list.html")),
    ("edit_list.html", include_str!("../templates/edit_list.html")),
];

#[derive(Debug, Clone, Serialize)]
pub struct ListSummary {
    pub id: usize,
    pub name: String,
    pub complete: bool,
    pub done: usize,
    pub total: usize,
}

impl ListSummary {
    pub fn new(id: usize, list: &List) -> Self {
        Self {
            id,
            name: list.name.clone(),
            complete: is_list_complete(list),
            done: progress_count(list),
            total: list.todos.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TodoView {
    pub id: usize,
    pub name: String,
    pub completed: bool,
}

impl TodoView {
    pub fn new(id: usize, todo: &Todo) -> Self {
        Self {
            id,
            name: todo.name.clone(),
            completed: todo.completed,
        }
    }
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }

    pub fn lists_page(&self, store: &ListStore, flash: Flash) -> Result<String> {
        let lists: Vec<ListSummary> = sorted_lists(store.lists())
            .into_iter()
            .map(|(id, list)| ListSummary::new(id, list))
            .collect();
        self.render("lists.html", context! { flash, lists })
    }

    pub fn new_list_page(&self, flash: Flash, list_name: &str) -> Result<String> {
        self.render("new_list.html", context! { flash, list_name })
    }

    /// Render one list. `todo_name` refills the new-todo input after a
    /// rejected submission.
    pub fn list_page(
        &self,
        store: &ListStore,
        index: usize,
        flash: Flash,
        todo_name: &str,
    ) -> Result<String> {
        let list = store.list(index)?;
        let todos: Vec<TodoView> = sorted_todos(list)
            .into_iter()
            .map(|(id, todo)| TodoView::new(id, todo))
            .collect();
        let list = ListSummary::new(index, list);
        self.render("list.html", context! { flash, list, todos, todo_name })
    }

    pub fn edit_list_page(
        &self,
        store: &ListStore,
        index: usize,
        flash: Flash,
        list_name: &str,
    ) -> Result<String> {
        let list = ListSummary::new(index, store.list(index)?);
        self.render("edit_list.html", context! { flash, list, list_name })
    }
}
