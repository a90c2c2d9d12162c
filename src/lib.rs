//! Content admin facade
//!
//! This crate lets an editorial admin surface discover collections and
//! documents of structured content and perform CRUD against them. Collection
//! shape is answered from local schema metadata; stored documents are read
//! and written through a remote operation endpoint.

pub mod config;
pub mod error;
pub mod facade;
pub mod graphql;
pub mod http_executor;
pub mod logging;
pub mod metadata;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod policy;
pub mod remote;
pub mod types;

// Re-export main types for convenience
pub use config::AdminConfig;
pub use error::{AdminError, AdminResult, ConfigError, SchemaError, TransportError};
pub use facade::AdminFacade;
pub use http_executor::HttpExecutor;
pub use logging::init_logging;
pub use metadata::{MetadataProvider, SchemaDefinition, SchemaMetadata};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockExecutor, MockMetadata, RecordedCall};
pub use policy::{AdminOperation, FailurePolicy};
pub use remote::RemoteExecutor;
pub use types::{Collection, DocumentRef, DocumentResponse, DocumentSys, DocumentValues};
