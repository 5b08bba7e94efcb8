//! Client core for the todo/user REST backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sit the page
//! controllers that keep client-held lists consistent with the server: every
//! successful mutation is followed by a full re-fetch, refreshes are stamped
//! so a late result cannot overwrite a newer one, and failures surface as
//! dismissable notices or a stale marker.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. Page controllers reach the network only through
//!   the `Transport` trait the host supplies.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod notice;
pub mod pages;
pub mod resource;
pub mod router;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notice::{Notice, Notices, Operation};
pub use pages::{Action, HomePage, TodosPage, UsersPage};
pub use resource::{RefreshOutcome, RefreshTicket, ResourceList};
pub use router::{App, Route, UnknownRoute};
pub use types::{CreateTodo, CreateUser, Health, Stats, Todo, UpdateTodo, User, UserStats};
