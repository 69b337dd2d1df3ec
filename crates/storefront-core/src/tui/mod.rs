//! Question flow and CLI prompts
//!
//! The sequencer and source selection are always available. The cliclack-based
//! prompts are only compiled with the `tui` feature.

pub mod flow;
pub mod sequencer;

#[cfg(feature = "tui")]
mod ask;
#[cfg(feature = "tui")]
mod prompts;

pub use flow::select_source;
pub use sequencer::{run_stage, Answers, AnswerValue, Asker, DefaultAsker, Question};

#[cfg(feature = "tui")]
pub use ask::CliclackAsker;
#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};
