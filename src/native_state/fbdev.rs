// src/native_state/fbdev.rs

//! `NativeState` backed by a kernel framebuffer device.

use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use log::{debug, error, info, trace};

use crate::error::SurfaceError;
use crate::native_state::{
    DeviceHandle, NativeDisplayHandle, NativeState, NativeWindow, NativeWindowHandle,
    WindowProperties,
};
use crate::os::fb::FramebufferDevice;
use crate::os::signal::{install_interrupt_handler, QuitFlag};

pub struct FbdevNativeState {
    device_path: PathBuf,
    device: Option<FramebufferDevice>,
    properties: WindowProperties,
    quit: QuitFlag,
}

impl FbdevNativeState {
    pub fn new(device_path: PathBuf, quit: QuitFlag) -> Self {
        Self {
            device_path,
            device: None,
            properties: WindowProperties::default(),
            quit,
        }
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }

    fn open_device(&mut self) -> Result<(), SurfaceError> {
        let device = FramebufferDevice::open(&self.device_path).map_err(|source| {
            error!(
                "Cannot open framebuffer device {}: {}",
                self.device_path.display(),
                source
            );
            SurfaceError::DeviceOpen {
                path: self.device_path.clone(),
                source,
            }
        })?;

        install_interrupt_handler(&self.quit).map_err(|source| {
            error!("Cannot install SIGINT handler: {}", source);
            SurfaceError::SignalInstall { source }
        })?;

        info!(
            "Framebuffer device {} open (fd {})",
            self.device_path.display(),
            device.as_raw_fd()
        );
        self.device = Some(device);
        Ok(())
    }
}

impl NativeState for FbdevNativeState {
    fn init_display(&mut self) -> Result<(), SurfaceError> {
        if self.device.is_some() {
            return Ok(());
        }
        self.open_device()
    }

    fn display(&self) -> NativeDisplayHandle {
        NativeDisplayHandle::from_device(self.device_handle())
    }

    fn create_window(&mut self, requested: WindowProperties) -> Result<(), SurfaceError> {
        let Some(device) = self.device.as_ref() else {
            error!("Display has not been initialized");
            return Err(SurfaceError::NotInitialized);
        };

        let info = device.var_screeninfo().map_err(|source| {
            error!("Cannot get variable frame buffer info: {}", source);
            SurfaceError::GeometryQuery { source }
        })?;

        if requested.width != info.xres || requested.height != info.yres {
            debug!(
                "Ignoring requested size {}x{}, framebuffer is {}x{}",
                requested.width, requested.height, info.xres, info.yres
            );
        }
        self.properties = WindowProperties::new(info.xres, info.yres, true);
        info!(
            "Framebuffer window {}x{} ({} bpp)",
            info.xres, info.yres, info.bits_per_pixel
        );
        Ok(())
    }

    fn window(&self) -> NativeWindow {
        NativeWindow {
            properties: self.properties,
            handle: NativeWindowHandle::null(),
        }
    }

    fn visible(&mut self, visible: bool) {
        trace!("FbdevNativeState: visible({}) ignored", visible);
    }

    fn should_quit(&self) -> bool {
        self.quit.is_raised()
    }

    fn flip(&mut self) {}

    fn cleanup(&mut self) {
        if let Some(device) = self.device.take() {
            debug!("Closing framebuffer device {}", device.path().display());
        }
    }

    fn device_handle(&self) -> DeviceHandle {
        self.device
            .as_ref()
            .map_or(DeviceHandle::CLOSED, |device| {
                DeviceHandle::from_raw(device.as_raw_fd())
            })
    }
}

impl Drop for FbdevNativeState {
    fn drop(&mut self) {
        self.cleanup();
    }
}
