/*
* Server composition: logging setup, aggregator construction,
* middleware stack, listener and shutdown handling.
*/

pub mod logging;
pub mod server;
