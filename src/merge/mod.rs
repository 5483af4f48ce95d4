//! Merge orchestration
//!
//! Drives one merge attempt through its phases:
//! 1. Initializing - clone the repository if the cache has no working copy
//! 2. CheckingCleanliness - offer to discard local changes
//! 3. FetchRefs - fetch from the remote
//! 4. ResolvingBranches - ask for missing branch names
//! 5. Syncing - checkout + pull source, then checkout + pull target
//! 6. Merging - merge source into target
//! 7. ResolvingConflicts - run the merge tool, finalize or abandon
//! 8. Pushing - push the target branch

mod orchestrator;
mod session;

pub use orchestrator::{MergeOrchestrator, OrchestratorDeps};
pub use session::{DEFAULT_REMOTE, MergePhase, MergeRequest, MergeSession, SessionOutcome};
