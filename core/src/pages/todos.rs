//! Todos page: list, create, toggle, edit and delete todos.
//!
//! Every successful mutation is followed by a full refresh of the list; the
//! list is never patched locally. Failed mutations leave a `Notice`.

use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::form::TodoForm;
use crate::http::{round_trip, Transport};
use crate::notice::{Notices, Operation};
use crate::resource::{RefreshOutcome, ResourceList};
use crate::types::{CreateTodo, Todo, UpdateTodo};

use super::Action;

pub struct TodosPage<T> {
    client: ApiClient,
    transport: T,
    user_id: i64,
    todos: ResourceList<Todo>,
    form: TodoForm,
    notices: Notices,
}

impl<T: Transport> TodosPage<T> {
    /// `user_id` is the identity new todos are created under.
    pub fn new(client: ApiClient, transport: T, user_id: i64) -> Self {
        Self {
            client,
            transport,
            user_id,
            todos: ResourceList::new("todos"),
            form: TodoForm::default(),
            notices: Notices::default(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn todos(&self) -> &ResourceList<Todo> {
        &self.todos
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TodoForm {
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

    pub fn refresh(&mut self) -> RefreshOutcome {
        let ticket = self.todos.begin_refresh();
        let client = &self.client;
        let result = round_trip(&self.transport, Ok(client.build_list_todos()), |r| {
            client.parse_list_todos(r)
        });
        self.todos.complete_refresh(ticket, result)
    }

    /// Create a todo from the new-task input. Blank input sends nothing.
    pub fn submit_new_todo(&mut self) -> Result<Action, ApiError> {
        let Some(task) = self.form.submittable_task() else {
            return Ok(Action::Skipped);
        };
        let input = CreateTodo {
            user_id: self.user_id,
            task: task.to_string(),
            completed: false,
        };
        let client = &self.client;
        let result = round_trip(&self.transport, client.build_create_todo(&input), |r| {
            client.parse_create_todo(r)
        });
        match result {
            Ok(created) => {
                info!(id = created.id, "todo created");
                self.form.clear_new_task();
                self.refresh();
                Ok(Action::Completed)
            }
            Err(err) => Err(self.fail(Operation::CreateTodo, err)),
        }
    }

    /// Flip `completed`, resending the task text currently held for `id`.
    ///
    /// An id missing from the list is still sent (with an empty task); the
    /// server rejects it and the failure surfaces like any other.
    pub fn toggle(&mut self, id: i64) -> Result<Action, ApiError> {
        let (task, completed) = self
            .todos
            .find(id)
            .map(|t| (t.task.clone(), t.completed))
            .unwrap_or_default();
        let input = UpdateTodo {
            task,
            completed: !completed,
        };
        match self.update(id, &input) {
            Ok(updated) => {
                info!(id, completed = updated.completed, "todo toggled");
                self.refresh();
                Ok(Action::Completed)
            }
            Err(err) => Err(self.fail(Operation::ToggleTodo, err)),
        }
    }

    /// Enter edit mode for `id` with its current task text.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.todos.find(id) {
            Some(todo) => {
                let text = todo.task.clone();
                self.form.start_edit(id, text);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.finish_edit();
    }

    /// Submit the edited task text, keeping the item's completion flag.
    ///
    /// Blank text is refused and edit mode stays active. On failure the edit
    /// also stays active so it can be retried.
    pub fn save_edit(&mut self) -> Result<Action, ApiError> {
        let Some(edit) = self.form.editing() else {
            return Ok(Action::Skipped);
        };
        if edit.text.trim().is_empty() {
            return Ok(Action::Skipped);
        }
        let id = edit.id;
        let input = UpdateTodo {
            task: edit.text.clone(),
            completed: self.todos.find(id).map(|t| t.completed).unwrap_or(false),
        };
        match self.update(id, &input) {
            Ok(_) => {
                info!(id, "todo edited");
                self.form.finish_edit();
                self.refresh();
                Ok(Action::Completed)
            }
            Err(err) => Err(self.fail(Operation::EditTodo, err)),
        }
    }

    /// Delete `id` once `confirm` agrees. A declined prompt sends nothing.
    pub fn remove(
        &mut self,
        id: i64,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Action, ApiError> {
        let prompt = match self.todos.find(id) {
            Some(todo) => format!("Delete todo #{id} \"{}\"?", todo.task),
            None => format!("Delete todo #{id}?"),
        };
        if !confirm(&prompt) {
            return Ok(Action::Skipped);
        }
        let client = &self.client;
        let result = round_trip(&self.transport, Ok(client.build_delete_todo(id)), |r| {
            client.parse_delete_todo(r)
        });
        match result {
            Ok(()) => {
                info!(id, "todo deleted");
                if self.form.editing().is_some_and(|edit| edit.id == id) {
                    self.form.finish_edit();
                }
                self.refresh();
                Ok(Action::Completed)
            }
            Err(err) => Err(self.fail(Operation::DeleteTodo, err)),
        }
    }

    fn update(&self, id: i64, input: &UpdateTodo) -> Result<Todo, ApiError> {
        let client = &self.client;
        round_trip(&self.transport, client.build_update_todo(id, input), |r| {
            client.parse_update_todo(r)
        })
    }

    fn fail(&mut self, operation: Operation, err: ApiError) -> ApiError {
        self.notices.record(operation, &err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::ScriptedTransport;

    const ONE: &str = r#"[{"id":1,"user_id":1,"task":"x","completed":false,"created_at":"t"}]"#;

    fn page(transport: &ScriptedTransport) -> TodosPage<ScriptedTransport> {
        TodosPage::new(ApiClient::new("http://api"), transport.clone(), 1)
    }

    fn mounted(transport: &ScriptedTransport, list: &str) -> TodosPage<ScriptedTransport> {
        transport.reply(200, list);
        let mut page = page(transport);
        assert!(page.mount().is_applied());
        page
    }

    #[test]
    fn blank_submissions_send_nothing() {
        let transport = ScriptedTransport::default();
        let mut page = page(&transport);
        for text in ["", "   "] {
            page.form_mut().set_new_task(text);
            assert_eq!(page.submit_new_todo().unwrap(), Action::Skipped);
        }
        assert_eq!(transport.sent_count(), 0);
    }

    #[test]
    fn submit_creates_with_fixed_identity_then_refreshes() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, "[]");
        transport
            .reply(201, r#"{"id":1,"user_id":1,"task":"buy milk","completed":false,"created_at":"t"}"#)
            .reply(200, r#"[{"id":1,"user_id":1,"task":"buy milk","completed":false,"created_at":"t"}]"#);

        page.form_mut().set_new_task("buy milk");
        assert_eq!(page.submit_new_todo().unwrap(), Action::Completed);

        let sent = transport.sent();
        assert_eq!(sent[1].method, HttpMethod::Post);
        assert_eq!(
            transport.body(1),
            serde_json::json!({"user_id": 1, "task": "buy milk", "completed": false})
        );
        assert_eq!(sent[2].method, HttpMethod::Get);
        assert!(page.form().new_task.is_empty());
        assert_eq!(page.todos().items()[0].task, "buy milk");
    }

    #[test]
    fn failed_create_keeps_input_and_notifies() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, "[]");
        transport.reply(404, r#"{"detail":"User not found"}"#);

        page.form_mut().set_new_task("orphan");
        assert!(page.submit_new_todo().is_err());
        assert_eq!(page.form().new_task, "orphan");
        assert_eq!(page.notices().latest().unwrap().message, "User not found");
        assert_eq!(transport.sent_count(), 2);
    }

    #[test]
    fn toggle_flips_completed_and_keeps_task() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, ONE);
        transport
            .reply(200, r#"{"id":1,"task":"x","completed":true}"#)
            .reply(200, r#"[{"id":1,"user_id":1,"task":"x","completed":true,"created_at":"t"}]"#);

        page.toggle(1).unwrap();

        assert_eq!(transport.sent()[1].path, "http://api/todos/1");
        assert_eq!(
            transport.body(1),
            serde_json::json!({"task": "x", "completed": true})
        );
        assert!(page.todos().find(1).unwrap().completed);
    }

    #[test]
    fn toggle_unknown_id_sends_empty_task_and_notifies() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, "[]");
        transport.reply(404, r#"{"detail":"Todo not found"}"#);

        assert!(page.toggle(9).is_err());
        assert_eq!(
            transport.body(1),
            serde_json::json!({"task": "", "completed": true})
        );
        assert_eq!(page.notices().latest().unwrap().operation, Operation::ToggleTodo);
    }

    #[test]
    fn declined_remove_sends_nothing() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, ONE);

        let mut asked = String::new();
        let outcome = page
            .remove(1, |prompt| {
                asked = prompt.to_string();
                false
            })
            .unwrap();

        assert_eq!(outcome, Action::Skipped);
        assert!(asked.contains("\"x\""));
        assert_eq!(transport.sent_count(), 1);
        assert_eq!(page.todos().len(), 1);
    }

    #[test]
    fn confirmed_remove_deletes_then_refreshes() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, ONE);
        transport.reply(204, "").reply(200, "[]");

        assert_eq!(page.remove(1, |_| true).unwrap(), Action::Completed);
        assert_eq!(transport.sent()[1].method, HttpMethod::Delete);
        assert!(page.todos().is_empty());
    }

    #[test]
    fn failed_delete_notifies() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, ONE);
        transport.fail("connection reset");

        assert!(page.remove(1, |_| true).is_err());
        let notice = page.notices().latest().unwrap();
        assert_eq!(notice.operation, Operation::DeleteTodo);
        assert_eq!(notice.message, "transport error: connection reset");
        assert_eq!(page.todos().len(), 1);
    }

    #[test]
    fn edit_saves_new_text_with_current_completion() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(
            &transport,
            r#"[{"id":1,"user_id":1,"task":"x","completed":true,"created_at":"t"}]"#,
        );
        transport
            .reply(200, r#"{"id":1,"task":"y","completed":true}"#)
            .reply(200, r#"[{"id":1,"user_id":1,"task":"y","completed":true,"created_at":"t"}]"#);

        assert!(page.begin_edit(1));
        assert_eq!(page.form().editing().unwrap().text, "x");
        page.form_mut().set_edit_text("y");
        assert_eq!(page.save_edit().unwrap(), Action::Completed);

        assert_eq!(
            transport.body(1),
            serde_json::json!({"task": "y", "completed": true})
        );
        assert!(page.form().editing().is_none());
        assert_eq!(page.todos().find(1).unwrap().task, "y");
    }

    #[test]
    fn blank_edit_is_refused_and_stays_open() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, ONE);
        page.begin_edit(1);
        page.form_mut().set_edit_text("  ");
        assert_eq!(page.save_edit().unwrap(), Action::Skipped);
        assert!(page.form().editing().is_some());
        assert_eq!(transport.sent_count(), 1);
        page.cancel_edit();
        assert!(page.form().editing().is_none());
    }

    #[test]
    fn begin_edit_unknown_id_is_refused() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, "[]");
        assert!(!page.begin_edit(3));
    }

    #[test]
    fn failed_refresh_marks_stale_without_notice() {
        let transport = ScriptedTransport::default();
        let mut page = mounted(&transport, ONE);
        transport.fail("down");
        assert!(matches!(page.refresh(), RefreshOutcome::Failed(_)));
        assert!(page.todos().is_stale());
        assert_eq!(page.todos().len(), 1);
        assert!(page.notices().is_empty());
    }
}
