// Domain Layer - Operations, catalog and rule shapes

pub mod catalog;
pub mod operation;
pub mod shapes;

// Re-exports
pub use catalog::{find_by_name, find_by_path, CATALOG};
pub use operation::{Operation, OperationDescriptor, OperationPath};
