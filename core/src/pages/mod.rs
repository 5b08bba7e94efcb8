//! Page controllers. Each owns its list and form state exclusively and
//! re-fetches from the server after every successful mutation.

mod home;
mod todos;
mod users;

pub use home::HomePage;
pub use todos::TodosPage;
pub use users::UsersPage;

/// Result of a user action that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The request succeeded and the list was refreshed.
    Completed,
    /// Nothing was sent: blank input or a declined confirmation.
    Skipped,
}
