// src/os/mod.rs

//! Operating system plumbing: the framebuffer device and SIGINT handling.

pub mod fb;
pub mod signal;
