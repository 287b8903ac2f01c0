mod remote_operations;

pub use remote_operations::{AppMetadata, AppRoute, RemoteOperations};
