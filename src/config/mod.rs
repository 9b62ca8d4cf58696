// Start of file: /src/config/mod.rs

/*
* Configuration: environment variables, the mount table, and app state.
*/

pub mod environment;
pub mod mounts;
pub mod state;

// End of file: /src/config/mod.rs
