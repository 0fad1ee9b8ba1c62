pub mod collections;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod params;
pub mod strings;

// HTTP glue: binding with validation, default handlers, server bootstrap
pub mod binder;
pub mod handlers;
pub mod server;
pub mod validation;

pub use collections::{package_name, unique_by_eq, unique_of, unique_of_values, value_of};
pub use error::{Result, UtilsError};
pub use strings::StringUtils;
