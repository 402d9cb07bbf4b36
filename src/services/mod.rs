// I/O collaborators around the grouping engine
pub mod loader;
pub mod reporter;

pub use loader::{SurveyLayout, SurveyLoader};
pub use reporter::{build_report, render_json, render_text};
