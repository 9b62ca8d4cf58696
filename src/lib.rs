// Library root: prefix-based route aggregation for the refunds API

pub mod api;
pub mod config;
pub mod core;
pub mod routing;
pub mod utils;
