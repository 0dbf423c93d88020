//! # cgshare-core
//!
//! Cgroup plumbing for cgshare.
//!
//! - **Directive**: the typed colon-delimited line protocol shared by the
//!   policy engine and the interpreter.
//! - **Cgroup**: direct filesystem operations against a cgroup v1 CPU
//!   controller hierarchy. No shell is ever involved.
//! - **Interpreter**: applies one directive per input line and keeps going
//!   past bad lines.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cgroup;
pub mod directive;
pub mod input;
pub mod interpreter;

pub use directive::Directive;
pub use interpreter::{Action, Interpreter, InterpreterOptions, RunReport};
