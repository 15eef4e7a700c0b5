//! Batch allocator for household power demand over a priced minute timeline.

pub mod alloc;
pub mod config;
pub mod instance;
pub mod io;
pub mod output;
pub mod runner;
