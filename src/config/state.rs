// Application state shared with every handler group

use std::sync::Arc;
use crate::config::environment::EnvironmentVariables;

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
}

impl AppState {
    /// Wraps the loaded configuration; built once in main and passed down explicitly
    pub fn new(environment: EnvironmentVariables) -> Self {
        Self {
            environment: Arc::new(environment),
        }
    }
}
