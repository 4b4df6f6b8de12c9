//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult, PreviewFile, WrittenFile};
pub use output::{Report, TerminalOutput};
#[cfg(test)]
pub use output::RecordedOutput;
