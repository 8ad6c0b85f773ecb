pub mod generator;
pub mod server;
pub mod summary;

pub use generator::{HttpTextGenerator, TextGenerator};
pub use server::{run_server, AppState};
pub use summary::{build_prompt, extract_response, render_summary, LakeSummaryParams};
