use std::fmt::{Debug, Display, Formatter};

/// Error type for runtime errors.
#[derive(Debug)]
pub enum RuntimeError {
    /// Logger error.
    Logger(log::SetLoggerError),
    /// Windowing shell (event loop, window creation) error.
    Shell(eframe::Error),
    /// Rendering Hardware Interface error.
    Rhi(WgpuError),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logger(err) => write!(f, "Logger error: {}", err),
            Self::Shell(err) => write!(f, "Windowing shell error: {}", err),
            Self::Rhi(err) => write!(f, "Rendering Hardware Interface error: {}", err),
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Wrapper around the error types surfaced by wgpu.
#[derive(Debug)]
pub struct WgpuError {
    source: Box<dyn std::error::Error + Send + 'static>,
}

impl Display for WgpuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.source) }
}

impl WgpuError {
    /// Returns whether the wrapped error is a validation error, i.e. a
    /// shader that failed to compile or a pipeline that failed to link.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self.source.downcast_ref::<wgpu::Error>(),
            Some(wgpu::Error::Validation { .. })
        )
    }
}

impl From<log::SetLoggerError> for RuntimeError {
    fn from(err: log::SetLoggerError) -> Self { RuntimeError::Logger(err) }
}

impl From<eframe::Error> for RuntimeError {
    fn from(err: eframe::Error) -> Self { RuntimeError::Shell(err) }
}

impl From<wgpu::Error> for RuntimeError {
    fn from(source: wgpu::Error) -> Self {
        RuntimeError::Rhi(WgpuError {
            source: Box::new(source),
        })
    }
}
