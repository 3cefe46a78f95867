use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlitError {
    #[error("Failed to find GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("Invalid window handle: {0}")]
    WindowHandle(#[from] raw_window_handle::HandleError),
    #[error("Shader validation failed: {0}")]
    Shader(String),
    #[error("Invalid texture data: {0}")]
    Texture(String),
    #[error("Failed to read back render target: {0}")]
    Readback(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BlitError>;
