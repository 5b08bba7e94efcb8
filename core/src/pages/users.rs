//! Users page: list and create users, and browse one user's todos.
//!
//! Users have no update or delete path.

use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::form::UserForm;
use crate::http::{round_trip, Transport};
use crate::notice::{Notices, Operation};
use crate::resource::{RefreshOutcome, ResourceList};
use crate::types::{Todo, User};

use super::Action;

pub struct UsersPage<T> {
    client: ApiClient,
    transport: T,
    users: ResourceList<User>,
    form: UserForm,
    notices: Notices,
    selected: Option<i64>,
    selected_todos: ResourceList<Todo>,
}

impl<T: Transport> UsersPage<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self {
            client,
            transport,
            users: ResourceList::new("users"),
            form: UserForm::default(),
            notices: Notices::default(),
            selected: None,
            selected_todos: ResourceList::new("user todos"),
        }
    }

    pub fn users(&self) -> &ResourceList<User> {
        &self.users
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn mount(&mut self) -> RefreshOutcome {
        self.refresh()
    }

    /// Re-fetch the user list, and the selected user's todos if one is shown.
    pub fn refresh(&mut self) -> RefreshOutcome {
        let ticket = self.users.begin_refresh();
        let client = &self.client;
        let result = round_trip(&self.transport, Ok(client.build_list_users()), |r| {
            client.parse_list_users(r)
        });
        let outcome = self.users.complete_refresh(ticket, result);
        if let Some(user_id) = self.selected {
            self.fetch_selected_todos(user_id);
        }
        outcome
    }

    /// Create a user from the raw form values.
    ///
    /// On failure the server's `detail` becomes the notice text verbatim and
    /// the form keeps its values.
    pub fn submit_new_user(&mut self) -> Result<Action, ApiError> {
        let input = self.form.payload();
        let client = &self.client;
        let result = round_trip(&self.transport, client.build_create_user(&input), |r| {
            client.parse_create_user(r)
        });
        match result {
            Ok(created) => {
                info!(id = created.id, "user created");
                self.form.clear();
                self.refresh();
                Ok(Action::Completed)
            }
            Err(err) => {
                self.notices.record(Operation::CreateUser, &err);
                Err(err)
            }
        }
    }

    /// The user whose todos are shown, if any.
    pub fn selected(&self) -> Option<&User> {
        self.selected.and_then(|id| self.users.find(id))
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected_todos(&self) -> &ResourceList<Todo> {
        &self.selected_todos
    }

    /// Show `user_id`'s todos. Switching users starts from an empty list.
    pub fn select_user(&mut self, user_id: i64) -> RefreshOutcome {
        if self.selected != Some(user_id) {
            self.selected = Some(user_id);
            self.selected_todos = ResourceList::new("user todos");
        }
        self.fetch_selected_todos(user_id)
    }

    fn fetch_selected_todos(&mut self, user_id: i64) -> RefreshOutcome {
        let ticket = self.selected_todos.begin_refresh();
        let client = &self.client;
        let result = round_trip(
            &self.transport,
            Ok(client.build_list_user_todos(user_id)),
            |r| client.parse_list_user_todos(r),
        );
        self.selected_todos.complete_refresh(ticket, result)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.selected_todos = ResourceList::new("user todos");
    }
}
