//! `onboard` command-line front end.
//!
//! Re-exports the argument definitions and text rendering so they can be
//! tested without spawning the binary. The entrypoint lives in `main.rs`.

pub mod cli;
pub mod render;
