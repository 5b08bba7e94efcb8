//! Client-held snapshot of one server collection.
//!
//! The list is only ever replaced wholesale: mutations never patch it, they
//! trigger a refresh. Refreshes are stamped with a generation so a result
//! that arrives after a newer one has been applied is dropped instead of
//! rolling the list back.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::types::{Todo, User};

/// A server record identified by a unique integer id.
pub trait Record {
    fn id(&self) -> i64;
}

impl Record for Todo {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Generation stamp handed out by `ResourceList::begin_refresh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// What `complete_refresh` did with a result.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The snapshot replaced the list.
    Applied,
    /// A newer refresh was already applied; the result was dropped.
    Discarded,
    /// The fetch failed; the previous snapshot is kept and marked stale.
    Failed(ApiError),
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied)
    }
}

#[derive(Debug)]
pub struct ResourceList<T> {
    name: &'static str,
    items: Vec<T>,
    issued: u64,
    applied: u64,
    loaded: bool,
    stale: bool,
}

impl<T: Record> ResourceList<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            items: Vec::new(),
            issued: 0,
            applied: 0,
            loaded: false,
            stale: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// True once any refresh has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// True when the most recent refresh attempt failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<T>, ApiError>,
    ) -> RefreshOutcome {
        if ticket.0 <= self.applied {
            debug!(
                list = self.name,
                ticket = ticket.0,
                applied = self.applied,
                "dropping out-of-date refresh"
            );
            return RefreshOutcome::Discarded;
        }
        match result {
            Ok(items) => {
                self.items = dedup_by_id(self.name, items);
                self.applied = ticket.0;
                self.loaded = true;
                self.stale = false;
                debug!(list = self.name, count = self.items.len(), "refreshed");
                RefreshOutcome::Applied
            }
            Err(err) => {
                warn!(list = self.name, error = %err, "refresh failed, keeping previous snapshot");
                self.stale = true;
                RefreshOutcome::Failed(err)
            }
        }
    }
}

fn dedup_by_id<T: Record>(name: &str, items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.id());
            if !fresh {
                warn!(list = name, id = item.id(), "duplicate id in snapshot, dropping");
            }
            fresh
        })
        .collect()
}
