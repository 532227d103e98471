//! Project-quality checkers
//!
//! Each checker is a stateless inspection of one project directory. The
//! registry runs them in a fixed order and isolates individual failures.

pub mod builtin;
pub mod project;
pub mod registry;
pub mod traits;

pub use project::{ManifestKind, PackageInfo, Project, ProjectMetadata};
pub use registry::{CheckResults, CheckerRegistry};
pub use traits::{CheckError, CheckResult, CheckStatus, Checker};
