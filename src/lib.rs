// src/lib.rs

//! Native display surface adapter for framebuffer devices.
//!
//! A benchmark harness builds a [`NativeState`] with [`native_state::create`],
//! opens the display, creates the (always fullscreen) window and passes the
//! opaque handles on to its graphics context setup. SIGINT raises the injected
//! [`QuitFlag`], which the render loop observes through
//! [`NativeState::should_quit`].

pub mod config;
pub mod error;
pub mod native_state;
pub mod os;

pub use config::{BackendKind, Config};
pub use error::SurfaceError;
pub use native_state::{
    DeviceHandle, NativeDisplayHandle, NativeState, NativeWindow, NativeWindowHandle,
    WindowProperties,
};
pub use os::signal::QuitFlag;
