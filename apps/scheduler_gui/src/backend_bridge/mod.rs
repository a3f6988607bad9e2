//! Backend bridge: command queue from the UI and the worker that executes it.

pub mod commands;
pub mod runtime;
