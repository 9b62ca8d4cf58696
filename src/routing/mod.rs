/*
    * Prefix-based route aggregation: bindings, handler groups,
    * the aggregator that dispatches between them, and routing errors.
*/

pub mod aggregator;
pub mod binding;
pub mod error;
pub mod group;

pub use aggregator::{AggregatorBuilder, RouteAggregator};
pub use binding::{MatchMode, MountContext, Prefix, RouteBinding, Visibility};
pub use error::RouteError;
pub use group::HandlerGroup;
