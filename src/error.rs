use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhibarError {
    #[error("Invalid palette dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid axis width: {0}")]
    InvalidAxis(f64),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Unsupported palette image: {0}")]
    UnsupportedImage(String),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PhibarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let error = PhibarError::InvalidDimensions {
            width: 0,
            height: 511,
        };
        assert_eq!(error.to_string(), "Invalid palette dimensions: 0x511");
    }

    #[test]
    fn test_invalid_axis_message() {
        let error = PhibarError::InvalidAxis(-1.0);
        assert_eq!(error.to_string(), "Invalid axis width: -1");
    }

    #[test]
    fn test_invalid_hex_message() {
        let error = PhibarError::InvalidHex("#zz0000".to_string());
        assert_eq!(error.to_string(), "Invalid hex color: #zz0000");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: PhibarError = io.into();
        match error {
            PhibarError::Io(_) => {},
            _ => panic!("Expected Io variant"),
        }
    }
}
