//! Study mode: sequential card navigation and the handoff that feeds it

pub mod handoff;
pub mod session;

pub use handoff::{HandoffStore, StudyHandoff};
pub use session::{CardView, StudyError, StudySession};
