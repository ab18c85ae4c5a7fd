//! Robovox CLI library.
//!
//! Command implementations for the `robovox` binary: batch rendering, single
//! renders, the prompt fallback song, WAVE inspection, vocal-asset mapping and
//! style listing.

pub mod commands;
pub mod config;
