// Start of file: /src/utils/mod.rs

/*
    * Shared helpers: global error mapping, the unified response
    * envelope and JSON formatting for logs.
*/

pub mod error_handler;
pub mod format;
pub mod response_handler;

// End of file: /src/utils/mod.rs
