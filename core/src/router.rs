//! Navigation shell: three routes, each backed by one page controller.
//!
//! Navigating to a page remounts it, which re-fetches its data.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::client::ApiClient;
use crate::config::Config;
use crate::http::Transport;
use crate::notice::Notices;
use crate::pages::{HomePage, TodosPage, UsersPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Todos,
    Users,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no page at {0:?}")]
pub struct UnknownRoute(pub String);

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Todos, Route::Users];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Todos => "/todos",
            Route::Users => "/users",
        }
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let path = trimmed.trim_end_matches('/');
        match path {
            "" => Ok(Route::Home),
            "/todos" => Ok(Route::Todos),
            "/users" => Ok(Route::Users),
            _ => Err(UnknownRoute(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub struct App<T> {
    route: Route,
    home: HomePage<T>,
    todos: TodosPage<T>,
    users: UsersPage<T>,
}

impl<T: Transport + Clone> App<T> {
    /// Build all three pages. Nothing is fetched until the first `navigate`.
    pub fn new(config: &Config, transport: T) -> Self {
        let client = ApiClient::new(&config.api_base);
        Self {
            route: Route::Home,
            home: HomePage::new(client.clone(), transport.clone()),
            todos: TodosPage::new(client.clone(), transport.clone(), config.user_id),
            users: UsersPage::new(client, transport),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn navigate(&mut self, route: Route) {
        info!(%route, "navigate");
        self.route = route;
        match route {
            Route::Home => self.home.mount(),
            Route::Todos => {
                self.todos.mount();
            }
            Route::Users => {
                self.users.mount();
            }
        }
    }

    pub fn navigate_path(&mut self, path: &str) -> Result<Route, UnknownRoute> {
        let route = path.parse()?;
        self.navigate(route);
        Ok(route)
    }

    pub fn home(&self) -> &HomePage<T> {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut HomePage<T> {
        &mut self.home
    }

    pub fn todos(&self) -> &TodosPage<T> {
        &self.todos
    }

    pub fn todos_mut(&mut self) -> &mut TodosPage<T> {
        &mut self.todos
    }

    pub fn users(&self) -> &UsersPage<T> {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UsersPage<T> {
        &mut self.users
    }

    /// Notices of the current page; the home page has none.
    pub fn notices_mut(&mut self) -> Option<&mut Notices> {
        match self.route {
            Route::Home => None,
            Route::Todos => Some(self.todos.notices_mut()),
            Route::Users => Some(self.users.notices_mut()),
        }
    }
}
