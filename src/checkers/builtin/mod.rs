//! Built-in checker battery

mod ci_cd;
mod code_quality;
mod dependencies;
mod docs;
mod packaging;
mod release_readiness;
mod security;
mod style;
mod testing;

pub use ci_cd::CiCdChecker;
pub use code_quality::CodeQualityChecker;
pub use dependencies::DependenciesChecker;
pub use docs::DocsChecker;
pub use packaging::PackagingChecker;
pub use release_readiness::ReleaseReadinessChecker;
pub use security::SecurityChecker;
pub use style::StyleChecker;
pub use testing::TestingChecker;
