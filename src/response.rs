//! JSON bodies returned to clients of the CLI and HTTP service.

use serde::Serialize;
use tracing::error;

use crate::classifier::{FaceShape, Measurements, Ratios};
use crate::error::{Error, ErrorKind};
use crate::pipeline::AnalysisReport;
use crate::recommend::{RankedStyle, Recommendation};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDetails {
    pub measurements: Measurements,
    pub ratios: Ratios,
}

/// Successful photo analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub face_shape: FaceShape,
    pub recommendations: Vec<Recommendation>,
    pub landmarks_detected: usize,
    pub analysis_details: AnalysisDetails,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            success: true,
            face_shape: report.analysis.shape,
            recommendations: report.recommendations,
            landmarks_detected: report.landmarks_detected,
            analysis_details: AnalysisDetails {
                measurements: report.analysis.measurements,
                ratios: report.analysis.ratios,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsResponse {
    pub face_shape: FaceShape,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StylesResponse {
    pub face_shape: FaceShape,
    pub styles: Vec<RankedStyle>,
}

/// Failure body. Internal errors carry a generic message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip)]
    pub status: u16,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        if err.kind() == ErrorKind::Internal {
            error!(error = %err, "request failed");
        }
        Self {
            success: false,
            error: err.public_message(),
            status: err.status_code(),
        }
    }
}
