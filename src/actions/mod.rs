//! Batch actions over operator-selected PRs
//!
//! Both batches walk their items strictly in order and never abort on a
//! single failure; the result carries a per-PR tally instead.

mod merge;
mod progress;
mod rebase;
mod retry;
mod selection;

pub use merge::{MergeBatchResult, MergeItem, MergePlan, execute_merge_batch};
pub use progress::{ItemStatus, NoopProgress, Phase, ProgressCallback};
pub use rebase::{RebaseBatchResult, execute_rebase_batch};
pub use retry::RetryPolicy;
pub use selection::{MenuAction, MenuKind, Selection};
