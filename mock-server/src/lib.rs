//! In-memory stand-in for the todo/user REST backend.
//!
//! Errors are JSON bodies of the form `{"detail": "..."}`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub task: String,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub user_id: i64,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub task: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub total_todos: i64,
    pub completed_todos: i64,
    pub pending_todos: i64,
}

/// In-memory tables. Ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct Store {
    users: BTreeMap<i64, User>,
    todos: BTreeMap<i64, Todo>,
    next_user_id: i64,
    next_todo_id: i64,
}

impl Store {
    /// A store holding one user with id 1, the identity new todos default to.
    pub fn with_default_user() -> Self {
        let mut store = Store::default();
        store.insert_user("Demo User".to_string(), "demo@example.com".to_string());
        store
    }

    fn insert_user(&mut self, name: String, email: String) -> User {
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            name,
            email,
            created_at: now(),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    fn insert_todo(&mut self, input: CreateTodo) -> Todo {
        self.next_todo_id += 1;
        let todo = Todo {
            id: self.next_todo_id,
            user_id: input.user_id,
            task: input.task,
            completed: input.completed,
            created_at: now(),
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }

    /// Newest first; ties on the timestamp fall back to the higher id.
    fn todos_newest_first(&self, filter: impl Fn(&Todo) -> bool) -> Vec<Todo> {
        let mut todos: Vec<Todo> = self.todos.values().filter(|&t| filter(t)).cloned().collect();
        todos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        todos
    }
}

fn now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub type Db = Arc<RwLock<Store>>;

/// Error response in the backend's `{"detail": ...}` shape.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    detail: &'static str,
}

impl ApiFailure {
    fn new(status: StatusCode, detail: &'static str) -> Self {
        Self { status, detail }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

const USER_NOT_FOUND: &str = "User not found";
const TODO_NOT_FOUND: &str = "Todo not found";

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/user/{user_id}", get(list_user_todos))
        .route("/stats", get(stats))
        .route("/stats/users", get(user_stats))
        .with_state(db)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "TODO API with user management",
        "endpoints": {
            "users": ["GET /users", "POST /users", "GET /users/{id}"],
            "todos": [
                "GET /todos", "POST /todos", "GET /todos/{id}",
                "PUT /todos/{id}", "DELETE /todos/{id}", "GET /todos/user/{user_id}"
            ],
            "stats": ["GET /stats", "GET /stats/users"],
        }
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "database": "connected" }))
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(store.users.values().cloned().collect())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), ApiFailure> {
    if !looks_like_email(&input.email) {
        return Err(ApiFailure::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "value is not a valid email address",
        ));
    }
    let mut store = db.write().await;
    if store.users.values().any(|u| u.email == input.email) {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "Email already exists",
        ));
    }
    let user = store.insert_user(input.name, input.email);
    tracing::debug!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, ApiFailure> {
    let store = db.read().await;
    store
        .users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiFailure::new(StatusCode::NOT_FOUND, USER_NOT_FOUND))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos_newest_first(|_| true))
}

async fn list_user_todos(
    State(db): State<Db>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Todo>>, ApiFailure> {
    let store = db.read().await;
    if !store.users.contains_key(&user_id) {
        return Err(ApiFailure::new(StatusCode::NOT_FOUND, USER_NOT_FOUND));
    }
    Ok(Json(store.todos_newest_first(move |t| t.user_id == user_id)))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiFailure> {
    let mut store = db.write().await;
    if !store.users.contains_key(&input.user_id) {
        return Err(ApiFailure::new(StatusCode::NOT_FOUND, USER_NOT_FOUND));
    }
    let todo = store.insert_todo(input);
    tracing::debug!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Todo>, ApiFailure> {
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiFailure::new(StatusCode::NOT_FOUND, TODO_NOT_FOUND))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiFailure> {
    let mut store = db.write().await;
    let todo = store
        .todos
        .get_mut(&id)
        .ok_or(ApiFailure::new(StatusCode::NOT_FOUND, TODO_NOT_FOUND))?;
    todo.task = input.task;
    todo.completed = input.completed;
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiFailure::new(StatusCode::NOT_FOUND, TODO_NOT_FOUND))
}

async fn stats(State(db): State<Db>) -> Json<Stats> {
    let store = db.read().await;
    let total = store.todos.len() as i64;
    let completed = store.todos.values().filter(|t| t.completed).count() as i64;
    Json(Stats {
        total,
        completed,
        pending: total - completed,
    })
}

async fn user_stats(State(db): State<Db>) -> Json<Vec<UserStats>> {
    let store = db.read().await;
    let rows = store
        .users
        .values()
        .map(|u| {
            let owned: Vec<&Todo> = store.todos.values().filter(|t| t.user_id == u.id).collect();
            let completed = owned.iter().filter(|t| t.completed).count() as i64;
            UserStats {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                total_todos: owned.len() as i64,
                completed_todos: completed,
                pending_todos: owned.len() as i64 - completed,
            }
        })
        .collect();
    Json(rows)
}

/// `local@domain.tld` with non-empty parts and no whitespace.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
