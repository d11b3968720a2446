//! Command-line interface for music-batch.
//!
//! Two independent utilities plus a tool check:
//! - `flatten`: collapse an `Artist/Album/Song` tree into one folder
//! - `process`: download a song list and convert it in parallel
//! - `check-tools`: report whether `gamdl` and `ffmpeg` can be run

mod commands;

pub use commands::{Cli, Commands, run_command};
