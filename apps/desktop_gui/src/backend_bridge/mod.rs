//! Bridge between the UI thread and the network worker.

pub mod commands;
pub mod runtime;
