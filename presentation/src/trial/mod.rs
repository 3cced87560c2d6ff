//! Interactive trial mode

mod repl;

pub use repl::{ReplCommand, TrialRepl};
