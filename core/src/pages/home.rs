//! Home page: backend health and task counters.

use tracing::warn;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{round_trip, Transport};
use crate::types::{Health, Stats, UserStats};

pub struct HomePage<T> {
    client: ApiClient,
    transport: T,
    health: Option<Health>,
    stats: Option<Stats>,
    user_stats: Vec<UserStats>,
    stale: bool,
}

impl<T: Transport> HomePage<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self {
            client,
            transport,
            health: None,
            stats: None,
            user_stats: Vec::new(),
            stale: false,
        }
    }

    pub fn api_base(&self) -> &str {
        self.client.base_url()
    }

    pub fn health(&self) -> Option<&Health> {
        self.health.as_ref()
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    pub fn user_stats(&self) -> &[UserStats] {
        &self.user_stats
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mount(&mut self) {
        self.refresh();
    }

    /// Fetch health, stats and per-user stats. Each value that fails to load
    /// keeps its previous content and marks the page stale.
    pub fn refresh(&mut self) {
        let client = &self.client;
        let health = round_trip(&self.transport, Ok(client.build_health()), |r| {
            client.parse_health(r)
        });
        let stats = round_trip(&self.transport, Ok(client.build_stats()), |r| {
            client.parse_stats(r)
        });
        let user_stats = round_trip(&self.transport, Ok(client.build_user_stats()), |r| {
            client.parse_user_stats(r)
        });

        let mut stale = false;
        if let Some(health) = keep("health", health, &mut stale) {
            self.health = Some(health);
        }
        if let Some(stats) = keep("stats", stats, &mut stale) {
            self.stats = Some(stats);
        }
        if let Some(user_stats) = keep("user stats", user_stats, &mut stale) {
            self.user_stats = user_stats;
        }
        self.stale = stale;
    }
}

fn keep<V>(what: &str, result: Result<V, ApiError>, stale: &mut bool) -> Option<V> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(what, error = %err, "home page fetch failed");
            *stale = true;
            None
        }
    }
}
