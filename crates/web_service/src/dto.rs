//! Form payloads posted by the HTML pages
use serde::Deserialize;

/// Body of the new-list and rename forms.
#[derive(Debug, Deserialize)]
pub struct ListForm {
    #[serde(default)]
    pub list_name: String,
}

/// Body of the new-todo form.
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}
