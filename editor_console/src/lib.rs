//! # Editor Console
//!
//! Scripted host for the editing engine.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The session never reads files or prints
//! - **Input is explicit events**: Key scripts, not raw terminal streams
//! - **Output is snapshot rendering**: Plain text or JSON, printed once
//! - **Deterministic**: Same document + same script => same output

pub mod input_script;
pub mod runtime;

pub use input_script::{InputScript, InputScriptError};
pub use runtime::{read_file, ConsoleConfig, ConsoleError, ConsoleRuntime};
