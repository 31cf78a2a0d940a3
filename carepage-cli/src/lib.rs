//! Scripted harness for the care pages.

pub mod args;
pub mod error;
pub mod harness;
pub mod page;
pub mod script;

pub use error::{CliError, ScriptError};
pub use harness::Harness;
pub use page::{NodeSpec, PageFile, PageKind, SelectSpec};
pub use script::{Command, parse_line, parse_script};
