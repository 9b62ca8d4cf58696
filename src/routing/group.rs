// Capability implemented by every mountable handler group

use axum::Router;

/// A self-contained unit of request handling (users, sessions, refunds, ...).
///
/// Routes are declared relative to the group root: a group mounted at
/// `/users` sees `/users/42` as `/42`. The aggregator does not look inside
/// the returned router; whatever it responds, including error statuses, is
/// passed back to the caller unchanged.
pub trait HandlerGroup<S> {
    fn name(&self) -> &str;

    fn routes(&self) -> Router<S>;
}
