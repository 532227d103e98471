//! Ordered checker registry and isolated execution

use super::builtin::*;
use super::{CheckResult, Checker, Project};
use crate::core::logging::panic_payload;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Checker name mapped to its result; `None` means "not applicable"
pub type CheckResults = BTreeMap<String, Option<CheckResult>>;

/// Fixed, ordered list of checkers shared by every scan unit
#[derive(Clone)]
pub struct CheckerRegistry {
    checkers: Vec<Arc<dyn Checker>>,
}

impl CheckerRegistry {
    /// The built-in battery in execution order
    pub fn builtin() -> Self {
        Self::with_checkers(vec![
            Arc::new(StyleChecker),
            Arc::new(CodeQualityChecker),
            Arc::new(DependenciesChecker),
            Arc::new(DocsChecker),
            Arc::new(TestingChecker),
            Arc::new(CiCdChecker),
            Arc::new(SecurityChecker),
            Arc::new(PackagingChecker),
            Arc::new(ReleaseReadinessChecker),
        ])
    }

    pub fn with_checkers(checkers: Vec<Arc<dyn Checker>>) -> Self {
        Self { checkers }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.checkers.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Run every checker sequentially in registration order.
    ///
    /// A checker that errors or panics is logged and left out of the map; the
    /// remaining checkers still run.
    pub fn run_all(&self, project: &Project) -> CheckResults {
        let mut results = CheckResults::new();
        for checker in &self.checkers {
            let name = checker.name();
            log::debug!("Running checker '{}' on {}", name, project.path().display());
            match catch_unwind(AssertUnwindSafe(|| checker.check(project))) {
                Ok(Ok(result)) => {
                    results.insert(name.to_string(), result);
                }
                Ok(Err(e)) => {
                    log::warn!("Checker '{}' failed for {}: {}", name, project.path().display(), e);
                }
                Err(panic) => {
                    log::warn!(
                        "Checker '{}' panicked for {}: {}",
                        name,
                        project.path().display(),
                        panic_payload(panic.as_ref())
                    );
                }
            }
        }
        results
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("checkers", &self.names())
            .finish()
    }
}
