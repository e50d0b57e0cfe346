use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("insufficient landmarks: need at least {required}, got {actual}")]
    InsufficientLandmarks { required: usize, actual: usize },

    #[error("degenerate face geometry: {ratio} denominator is {denominator}")]
    DegenerateGeometry {
        ratio: &'static str,
        denominator: f64,
    },

    #[error("unknown face shape: {0}")]
    UnknownFaceShape(String),

    #[error("unknown eyewear style: {0}")]
    UnknownStyle(String),

    #[error("no image provided")]
    MissingImage,

    #[error("invalid image format: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("no face detected in image")]
    NoFaceDetected,

    #[error("invalid landmark document: {0}")]
    InvalidLandmarks(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Whether a failure is the caller's fault or ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadInput,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InsufficientLandmarks { .. }
            | Error::DegenerateGeometry { .. }
            | Error::MissingImage
            | Error::ImageDecode(_)
            | Error::NoFaceDetected
            | Error::InvalidLandmarks(_)
            | Error::InvalidRequest(_) => ErrorKind::BadInput,
            // A shape missing from the preference table means the classifier
            // and the catalog disagree.
            Error::UnknownFaceShape(_)
            | Error::UnknownStyle(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Task(_) => ErrorKind::Internal,
        }
    }

    /// HTTP-equivalent status code.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::BadInput => 400,
            ErrorKind::Internal => 500,
        }
    }

    /// Message safe to hand back to an end user.
    pub fn public_message(&self) -> String {
        match self {
            Error::MissingImage => "No image provided".to_string(),
            Error::ImageDecode(_) => "Invalid image format".to_string(),
            Error::NoFaceDetected => "No face detected in image".to_string(),
            Error::InsufficientLandmarks { .. } | Error::DegenerateGeometry { .. } => {
                format!("Could not analyze face: {self}")
            }
            Error::InvalidLandmarks(e) => format!("Invalid landmarks: {e}"),
            Error::InvalidRequest(msg) => msg.clone(),
            _ => "Processing failed".to_string(),
        }
    }
}
