use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse generated SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("Failed to allocate {width}x{height} surface")]
    Allocation { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
