pub mod config;
pub mod discovery;
pub mod error;
pub mod preset;
pub mod resolver;
pub mod settings;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;
pub use preset::*;
pub use resolver::*;
pub use settings::*;

// Re-export discovery and validation
pub use discovery::{discover, discover_with_profile, ConfigDiscovery, ConfigSource};
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
