/*
* Handler groups mounted by the server, and the catalog used to
* resolve the group names found in ROUTE_MOUNTS.
*/

pub mod handler;
pub mod refunds;
pub mod sessions;
pub mod users;

use crate::config::state::AppState;
use crate::routing::HandlerGroup;

/// Names accepted in the mount table
pub const GROUP_NAMES: [&str; 3] = [users::GROUP_NAME, sessions::GROUP_NAME, refunds::GROUP_NAME];

/// Looks up a handler group by its configured name
pub fn handler_group(name: &str) -> Option<Box<dyn HandlerGroup<AppState>>> {
    match name {
        users::GROUP_NAME => Some(Box::new(users::UsersRoutes)),
        sessions::GROUP_NAME => Some(Box::new(sessions::SessionsRoutes)),
        refunds::GROUP_NAME => Some(Box::new(refunds::RefundsRoutes)),
        _ => None,
    }
}
