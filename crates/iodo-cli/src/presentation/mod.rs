//! Report rendering for the terminal.
//!
//! Format-only: no domain transforms happen here.

mod report;

pub use report::{HEALTHY_MESSAGE, render_json, render_text};
