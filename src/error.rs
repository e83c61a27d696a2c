// src/error.rs

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use nix::errno::Errno;

/// Failures a native display surface can report.
///
/// Each failure leaves the surface exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The display device could not be opened.
    DeviceOpen { path: PathBuf, source: Errno },
    /// A window was requested before the display was initialized.
    NotInitialized,
    /// The device rejected the variable screen information query.
    GeometryQuery { source: Errno },
    /// The SIGINT handler could not be installed.
    SignalInstall { source: Errno },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::DeviceOpen { path, source } => write!(
                f,
                "cannot open framebuffer device {}: {}",
                path.display(),
                source
            ),
            SurfaceError::NotInitialized => write!(f, "display has not been initialized"),
            SurfaceError::GeometryQuery { source } => {
                write!(f, "cannot get variable frame buffer info: {}", source)
            }
            SurfaceError::SignalInstall { source } => {
                write!(f, "cannot install SIGINT handler: {}", source)
            }
        }
    }
}

impl Error for SurfaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SurfaceError::DeviceOpen { source, .. }
            | SurfaceError::GeometryQuery { source }
            | SurfaceError::SignalInstall { source } => Some(source),
            SurfaceError::NotInitialized => None,
        }
    }
}
