// src/os/fb.rs

//! Thin wrapper around a Linux framebuffer character device (`/dev/fbN`).
//!
//! Only the pieces a display surface needs are exposed: opening the device
//! and reading its variable screen information with `FBIOGET_VSCREENINFO`.

use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use std::path::{Path, PathBuf};

use log::{debug, trace};
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;

#[cfg(target_os = "android")]
pub const FBDEV_PATH_PREFIX: &str = "/dev/graphics/fb";
#[cfg(not(target_os = "android"))]
pub const FBDEV_PATH_PREFIX: &str = "/dev/fb";

/// Framebuffer index used when the configuration does not name one.
pub const DEFAULT_FBDEV_INDEX: u32 = 0;

const FBIOGET_VSCREENINFO: u32 = 0x4600;

/// Builds the device path for framebuffer `index`, e.g. `/dev/fb0`.
pub fn fbdev_path(index: u32) -> PathBuf {
    PathBuf::from(format!("{}{}", FBDEV_PATH_PREFIX, index))
}

/// Mirror of the kernel's `struct fb_bitfield`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FbBitfield {
    pub offset: u32,
    pub length: u32,
    pub msb_right: u32,
}

/// Mirror of the kernel's `struct fb_var_screeninfo` (`<linux/fb.h>`).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FbVarScreeninfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    pub grayscale: u32,
    pub red: FbBitfield,
    pub green: FbBitfield,
    pub blue: FbBitfield,
    pub transp: FbBitfield,
    pub nonstd: u32,
    pub activate: u32,
    /// Height of the picture in mm.
    pub height: u32,
    /// Width of the picture in mm.
    pub width: u32,
    pub accel_flags: u32,
    pub pixclock: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub upper_margin: u32,
    pub lower_margin: u32,
    pub hsync_len: u32,
    pub vsync_len: u32,
    pub sync: u32,
    pub vmode: u32,
    pub rotate: u32,
    pub colorspace: u32,
    pub reserved: [u32; 4],
}

nix::ioctl_read_bad!(fbioget_vscreeninfo, FBIOGET_VSCREENINFO, FbVarScreeninfo);

/// An open framebuffer device. Dropping it closes the descriptor.
#[derive(Debug)]
pub struct FramebufferDevice {
    fd: OwnedFd,
    path: PathBuf,
}

impl FramebufferDevice {
    /// Opens `path` read/write. No retry is attempted.
    pub fn open(path: &Path) -> nix::Result<Self> {
        let fd = open(path, OFlag::O_RDWR | OFlag::O_CLOEXEC, Mode::empty())?;
        debug!(
            "FramebufferDevice: opened {} as fd {}",
            path.display(),
            fd.as_raw_fd()
        );
        Ok(Self {
            fd,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queries the current variable screen information of the device.
    pub fn var_screeninfo(&self) -> nix::Result<FbVarScreeninfo> {
        let mut info = FbVarScreeninfo::default();
        // SAFETY: `info` is a properly sized, writable `fb_var_screeninfo` and
        // the descriptor stays open for the duration of the call.
        unsafe { fbioget_vscreeninfo(self.fd.as_raw_fd(), &mut info) }?;
        trace!(
            "FramebufferDevice: {} reports {}x{} ({}x{} virtual, {} bpp)",
            self.path.display(),
            info.xres,
            info.yres,
            info.xres_virtual,
            info.yres_virtual,
            info.bits_per_pixel
        );
        Ok(info)
    }
}

impl AsRawFd for FramebufferDevice {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::errno::Errno;

    #[test]
    fn var_screeninfo_matches_kernel_layout() {
        // 8 leading words, 4 bitfields of 3 words, 16 trailing words, 4 reserved.
        assert_eq!(std::mem::size_of::<FbVarScreeninfo>(), 160);
    }

    #[test]
    fn fbdev_path_uses_platform_prefix_and_index() {
        assert_eq!(
            fbdev_path(DEFAULT_FBDEV_INDEX),
            PathBuf::from(format!("{}0", FBDEV_PATH_PREFIX))
        );
        #[cfg(not(target_os = "android"))]
        assert_eq!(fbdev_path(1), PathBuf::from("/dev/fb1"));
    }

    #[test_log::test]
    fn opening_a_missing_device_reports_enoent() {
        let err = FramebufferDevice::open(Path::new("/nonexistent/fb0")).unwrap_err();
        assert_eq!(err, Errno::ENOENT);
    }

    #[test_log::test]
    fn querying_a_non_framebuffer_fails() {
        let device = FramebufferDevice::open(Path::new("/dev/null")).unwrap();
        assert!(device.as_raw_fd() >= 0);
        assert_eq!(device.path(), Path::new("/dev/null"));
        assert!(device.var_screeninfo().is_err());
    }
}
