//! Crate-level error types.

use crate::scene::RegistryError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or write an options file.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("cannot read options file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize options: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Well-formed TOML holding a value the demo cannot use.
    #[error("invalid options: {0}")]
    Invalid(String),
}

/// Errors produced while setting up or running the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("failed to create the rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open the graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to create the window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("the surface does not support the adapter")]
    UnsupportedSurface,
}
