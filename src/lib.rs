//! Arcade space shooter: a deterministic per-frame simulation plus thin
//! drawing and audio boundaries for a host loop to drive.

pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod render;
