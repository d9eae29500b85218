//! Consistency checking for GitOps repositories
//!
//! Validates that Argo CD Applications and ApplicationSets point at real
//! kustomize components, that every kustomization manifest references the
//! files sitting next to it, and that every component still builds. The
//! engine runs against capability interfaces for storage, building and
//! logging, so it works identically over a real repository and an in-memory
//! fixture.

pub mod build;
pub mod error;
pub mod logging;
pub mod store;
pub mod validation;

// Re-export the types a caller wires together for a check run
pub use build::{BuildFailure, BuildRunner, KustomizeCli};
pub use error::{CheckError, CheckResult};
pub use logging::{Logger, RecordingLogger, TracingLogger};
pub use store::{DiskStore, FileStore, MemoryStore, VirtualTree};
pub use validation::{Checker, UnreferencedPolicy};
