//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The product name, sent as the `User-Agent` of every HTTP request.
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(format!("taskgrid/{}", env!("CARGO_PKG_VERSION")))));

/// The ordering hint given to tasks created without a more specific one
pub const DEFAULT_POSITION: i64 = 1;

/// Environment variable that contains the base URL of the task server
pub const URL_ENV_VAR: &str = "TASKGRID_URL";
/// Environment variable that contains the session cookie to authenticate with
pub const SESSION_ENV_VAR: &str = "TASKGRID_SESSION";

/// Returns the current product name (see [`PRODUCT_NAME`])
pub fn product_name() -> String {
    match PRODUCT_NAME.lock() {
        Ok(name) => name.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
