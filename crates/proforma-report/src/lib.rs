//! proforma-report
//!
//! Pure functions over a question tree and its selection state: report
//! assembly, progress estimation, the pre-export gate and the filled-in
//! view. Nothing here mutates its inputs, so every function is safe to
//! re-run on each state change.

pub mod assemble;
pub mod gate;
pub mod markup;
pub mod progress;
mod reachable;
pub mod view;

pub use assemble::{assemble_report, Report};
pub use gate::{prepare_export, unanswered_important, Confirmation, PendingExport, UnansweredQuestion};
pub use progress::{count_answered, count_reachable, estimate_progress, Progress};
pub use view::{visible_questions, VisibleQuestion};
