//! Stateless render functions for each visible pane

pub mod source;
pub mod status;
pub mod variables;

pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StepInfo};
pub use variables::render_variables_pane;
