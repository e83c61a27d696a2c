// src/native_state/vendor_stub.rs

//! `NativeState` for GPU drivers that ship their own framebuffer windowing
//! extension. Nothing is queried from hardware: the geometry is a fixed
//! [`VideoConfig`] which is handed to the vendor's setup routine on open.

use std::ffi::c_void;

use log::{debug, error, info, trace};
use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::native_state::{
    DeviceHandle, NativeDisplayHandle, NativeState, NativeWindow, NativeWindowHandle,
    WindowProperties,
};
use crate::os::signal::{install_interrupt_handler, QuitFlag};

/// Device handle reported while the stub display is "open".
pub const VENDOR_STUB_DEVICE_HANDLE: DeviceHandle = DeviceHandle(0xffff);

/// `EGL_DEFAULT_DISPLAY`.
const EGL_DEFAULT_DISPLAY: *mut c_void = std::ptr::null_mut();

/// Video mode consumed by the vendor setup routine.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
    /// Bytes per pixel.
    pub bpp: u32,
    pub num_buffers: u32,
    pub use_screen: u32,
    pub monitor_index: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            width: 1280,
            height: 720,
            bpp: 4,
            num_buffers: 3,
            use_screen: 0,
            monitor_index: 0,
        }
    }
}

/// Window record the vendor EGL implementation expects behind the native
/// window pointer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorNativeWindow {
    pub width: u16,
    pub height: u16,
}

/// Vendor initialisation routine, run once each time the display is opened.
pub trait SetupHook {
    fn setup(&mut self, video: &VideoConfig);
}

impl<F> SetupHook for F
where
    F: FnMut(&VideoConfig),
{
    fn setup(&mut self, video: &VideoConfig) {
        self(video)
    }
}

fn default_setup_hook(video: &VideoConfig) {
    debug!(
        "Vendor setup: {}x{}, {} bytes/pixel, {} buffers",
        video.width, video.height, video.bpp, video.num_buffers
    );
}

pub struct VendorStubNativeState {
    video: VideoConfig,
    setup_hook: Box<dyn SetupHook>,
    handle: DeviceHandle,
    native_window: Option<Box<VendorNativeWindow>>,
    properties: WindowProperties,
    quit: QuitFlag,
}

impl VendorStubNativeState {
    pub fn new(video: VideoConfig, quit: QuitFlag) -> Self {
        Self::with_setup_hook(video, quit, default_setup_hook)
    }

    pub fn with_setup_hook(
        video: VideoConfig,
        quit: QuitFlag,
        setup_hook: impl SetupHook + 'static,
    ) -> Self {
        Self {
            video,
            setup_hook: Box::new(setup_hook),
            handle: DeviceHandle::CLOSED,
            native_window: None,
            properties: WindowProperties::default(),
            quit,
        }
    }

    pub fn video_config(&self) -> &VideoConfig {
        &self.video
    }
}

impl NativeState for VendorStubNativeState {
    fn init_display(&mut self) -> Result<(), SurfaceError> {
        if self.handle.is_open() {
            return Ok(());
        }

        self.setup_hook.setup(&self.video);
        install_interrupt_handler(&self.quit).map_err(|source| {
            error!("Cannot install SIGINT handler: {}", source);
            SurfaceError::SignalInstall { source }
        })?;

        // The vendor window record only carries 16-bit dimensions.
        self.native_window = Some(Box::new(VendorNativeWindow {
            width: self.video.width.min(u16::MAX as u32) as u16,
            height: self.video.height.min(u16::MAX as u32) as u16,
        }));
        self.handle = VENDOR_STUB_DEVICE_HANDLE;
        info!(
            "Vendor stub display ready ({}x{})",
            self.video.width, self.video.height
        );
        Ok(())
    }

    fn display(&self) -> NativeDisplayHandle {
        NativeDisplayHandle::from_ptr(EGL_DEFAULT_DISPLAY)
    }

    fn create_window(&mut self, requested: WindowProperties) -> Result<(), SurfaceError> {
        if !self.handle.is_open() {
            error!("Display has not been initialized");
            return Err(SurfaceError::NotInitialized);
        }
        trace!(
            "Ignoring requested size {}x{}",
            requested.width,
            requested.height
        );
        self.properties = WindowProperties::new(self.video.width, self.video.height, true);
        Ok(())
    }

    fn window(&self) -> NativeWindow {
        let handle = self
            .native_window
            .as_deref()
            .map_or_else(NativeWindowHandle::null, |window| {
                NativeWindowHandle::from_ptr(window as *const VendorNativeWindow as *mut c_void)
            });
        NativeWindow {
            properties: self.properties,
            handle,
        }
    }

    fn visible(&mut self, _visible: bool) {}

    fn should_quit(&self) -> bool {
        self.quit.is_raised()
    }

    fn flip(&mut self) {}

    fn cleanup(&mut self) {
        self.handle = DeviceHandle::CLOSED;
        if self.native_window.take().is_some() {
            debug!("Released vendor native window");
        }
    }

    fn device_handle(&self) -> DeviceHandle {
        self.handle
    }
}
