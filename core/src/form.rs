//! Transient input state owned by a page, independent of list state.

use crate::types::CreateUser;

/// Inputs on the todos page: the new-task field and the inline editor.
#[derive(Debug, Default, Clone)]
pub struct TodoForm {
    pub new_task: String,
    edit: Option<EditState>,
}

/// An in-progress edit of one todo's task text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: i64,
    pub text: String,
}

impl TodoForm {
    pub fn set_new_task(&mut self, text: impl Into<String>) {
        self.new_task = text.into();
    }

    /// The new-task text when it has non-whitespace content.
    pub fn submittable_task(&self) -> Option<&str> {
        (!self.new_task.trim().is_empty()).then_some(self.new_task.as_str())
    }

    pub fn clear_new_task(&mut self) {
        self.new_task.clear();
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.edit.as_ref()
    }

    pub fn start_edit(&mut self, id: i64, text: impl Into<String>) {
        self.edit = Some(EditState {
            id,
            text: text.into(),
        });
    }

    /// Replace the edit text; ignored when no edit is active.
    pub fn set_edit_text(&mut self, text: impl Into<String>) -> bool {
        match self.edit.as_mut() {
            Some(edit) => {
                edit.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn finish_edit(&mut self) -> Option<EditState> {
        self.edit.take()
    }
}

/// Inputs on the users page.
#[derive(Debug, Default, Clone)]
pub struct UserForm {
    pub name: String,
    pub email: String,
}

impl UserForm {
    pub fn set(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.name = name.into();
        self.email = email.into();
    }

    /// Payload with the raw field values, untrimmed.
    pub fn payload(&self) -> CreateUser {
        CreateUser {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }
}
