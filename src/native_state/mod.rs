// src/native_state/mod.rs
//
// Defines the `NativeState` trait, which abstracts over the backends able to
// hand a native display and window to the rendering layer.

pub mod fbdev;
pub mod vendor_stub;


use std::ffi::c_void;
use std::os::fd::RawFd;
use std::ptr;

use crate::config::{BackendKind, Config};
use crate::error::SurfaceError;
use crate::os::signal::QuitFlag;

pub use fbdev::FbdevNativeState;
pub use vendor_stub::{SetupHook, VendorNativeWindow, VendorStubNativeState, VideoConfig};

/// Descriptor of the display device owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(RawFd);

impl DeviceHandle {
    /// The "not open" sentinel.
    pub const CLOSED: DeviceHandle = DeviceHandle(-1);

    pub fn from_raw(fd: RawFd) -> Self {
        DeviceHandle(fd)
    }

    pub fn as_raw(self) -> RawFd {
        self.0
    }

    pub fn is_open(self) -> bool {
        self != Self::CLOSED
    }
}

impl Default for DeviceHandle {
    fn default() -> Self {
        Self::CLOSED
    }
}

/// Geometry of the native window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowProperties {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl WindowProperties {
    pub fn new(width: u32, height: u32, fullscreen: bool) -> Self {
        Self {
            width,
            height,
            fullscreen,
        }
    }
}

/// Opaque display value passed to the graphics context-creation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeDisplayHandle(*mut c_void);

impl NativeDisplayHandle {
    /// Reinterprets a device descriptor as a display handle.
    pub fn from_device(handle: DeviceHandle) -> Self {
        NativeDisplayHandle(handle.as_raw() as isize as *mut c_void)
    }

    pub fn from_ptr(ptr: *mut c_void) -> Self {
        NativeDisplayHandle(ptr)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }

    /// The handle's value as a signed integer, e.g. `-1` for a closed device.
    pub fn as_raw_value(self) -> isize {
        self.0 as isize
    }
}

/// Opaque window value passed to the graphics surface-creation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeWindowHandle(*mut c_void);

impl NativeWindowHandle {
    pub fn null() -> Self {
        NativeWindowHandle(ptr::null_mut())
    }

    pub fn from_ptr(ptr: *mut c_void) -> Self {
        NativeWindowHandle(ptr)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for NativeWindowHandle {
    fn default() -> Self {
        Self::null()
    }
}

/// What `NativeState::window` reports: the stored geometry and the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeWindow {
    pub properties: WindowProperties,
    pub handle: NativeWindowHandle,
}

/// A source of a native display and window for the renderer.
///
/// Driven synchronously from a single render loop:
/// `init_display` → `create_window` → `window` → (`flip` until `should_quit`)
/// → `cleanup`.
pub trait NativeState {
    /// Opens the display device if it is not open yet.
    fn init_display(&mut self) -> Result<(), SurfaceError>;

    /// The display handle expected by the rendering backend. Not validated;
    /// call `init_display` first.
    fn display(&self) -> NativeDisplayHandle;

    /// Records the device geometry as the window geometry. The requested size
    /// is ignored; the surface is always fullscreen.
    fn create_window(&mut self, requested: WindowProperties) -> Result<(), SurfaceError>;

    /// The stored geometry together with the opaque window handle.
    fn window(&self) -> NativeWindow;

    /// Framebuffer surfaces cannot be hidden.
    fn visible(&mut self, visible: bool);

    fn should_quit(&self) -> bool;

    /// Presentation happens outside the adapter.
    fn flip(&mut self);

    /// Closes the device and releases the window. A later `init_display` reopens.
    fn cleanup(&mut self);

    /// Current device handle, `DeviceHandle::CLOSED` when not open.
    fn device_handle(&self) -> DeviceHandle;
}

/// Builds the backend selected by `config`, observing `quit` for interrupts.
pub fn create(config: &Config, quit: QuitFlag) -> Box<dyn NativeState> {
    match config.backend {
        BackendKind::Fbdev => Box::new(FbdevNativeState::new(config.device.path(), quit)),
        BackendKind::VendorStub => Box::new(VendorStubNativeState::new(config.vendor.video, quit)),
    }
}
