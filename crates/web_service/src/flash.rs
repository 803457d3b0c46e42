//! One-shot status messages
//!
//! A message set while handling one request is shown by the next page that
//! renders and then discarded.

use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Flash {
    pub fn success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Hand the pending messages to a renderer, leaving both slots empty.
    pub fn take(&mut self) -> Flash {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}
