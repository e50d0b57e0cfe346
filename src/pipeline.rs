//! Photo in, face shape and recommendations out.
//!
//! Image decoding goes through the `image` crate. Landmark detection is
//! pluggable through [`LandmarkDetector`]; the crate ships
//! [`ProvidedLandmarks`] for landmarks computed by an out-of-process face-mesh
//! model (a browser-side MediaPipe run, a sidecar service, ...).

use image::DynamicImage;
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::classifier::{FaceAnalysis, FaceShapeClassifier};
use crate::error::{Error, Result};
use crate::recommend::{Recommendation, Recommender};
use crate::types::{LandmarkSet, Point};

/// Number of recommendations returned for a photo unless configured otherwise.
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 4;

/// Decode raw image bytes.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes)?;
    debug!(width = img.width(), height = img.height(), "decoded image");
    Ok(img)
}

/// Finds faces in a decoded image.
pub trait LandmarkDetector {
    /// Landmarks for every face found, in detector order. An empty vector
    /// means no face.
    fn detect(&self, image: &DynamicImage) -> Result<Vec<LandmarkSet>>;
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for &D {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<LandmarkSet>> {
        (**self).detect(image)
    }
}

/// Landmark output of an external detector, as JSON.
///
/// Either `{"faces": [[{"x":..,"y":..}, ...], ...]}` or a bare array of
/// points for a single face.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LandmarkDocument {
    Faces { faces: Vec<LandmarkSet> },
    Single(Vec<Point>),
}

impl LandmarkDocument {
    pub fn into_faces(self) -> Vec<LandmarkSet> {
        match self {
            LandmarkDocument::Faces { faces } => faces,
            LandmarkDocument::Single(points) if points.is_empty() => Vec::new(),
            LandmarkDocument::Single(points) => vec![LandmarkSet::new(points)],
        }
    }
}

/// A detector that replays landmarks computed elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ProvidedLandmarks {
    faces: Vec<LandmarkSet>,
}

impl ProvidedLandmarks {
    pub fn new(faces: Vec<LandmarkSet>) -> Self {
        Self { faces }
    }

    pub fn from_json(json: &[u8]) -> Result<Self> {
        let doc: LandmarkDocument = serde_json::from_slice(json)?;
        Ok(Self::new(doc.into_faces()))
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
}

impl LandmarkDetector for ProvidedLandmarks {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<LandmarkSet>> {
        Ok(self.faces.clone())
    }
}

/// Everything learned about one photo.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub analysis: FaceAnalysis,
    pub recommendations: Vec<Recommendation>,
    /// Landmarks in the analysed face.
    pub landmarks_detected: usize,
    pub faces_detected: usize,
}

/// Decode, detect, classify and recommend.
#[derive(Debug, Clone)]
pub struct FaceFit<'a, D> {
    detector: D,
    classifier: FaceShapeClassifier,
    recommender: Recommender<'a>,
    recommendation_count: usize,
}

impl<D: LandmarkDetector> FaceFit<'static, D> {
    /// A pipeline over the built-in catalog and MediaPipe landmark map.
    pub fn new(detector: D) -> Self {
        Self::with_catalog(detector, Catalog::builtin())
    }
}

impl<'a, D: LandmarkDetector> FaceFit<'a, D> {
    pub fn with_catalog(detector: D, catalog: &'a Catalog) -> Self {
        Self {
            detector,
            classifier: FaceShapeClassifier::default(),
            recommender: Recommender::new(catalog),
            recommendation_count: DEFAULT_RECOMMENDATION_COUNT,
        }
    }

    pub fn classifier(mut self, classifier: FaceShapeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn recommendation_count(mut self, count: usize) -> Self {
        self.recommendation_count = count;
        self
    }

    pub fn analyze_image(&self, bytes: &[u8]) -> Result<AnalysisReport> {
        self.analyze_decoded(&decode_image(bytes)?)
    }

    /// Detect, classify and recommend on an already decoded image.
    pub fn analyze_decoded(&self, image: &DynamicImage) -> Result<AnalysisReport> {
        let faces = self.detector.detect(image)?;
        let faces_detected = faces.len();
        // Only the first face is analysed.
        let face = faces.into_iter().next().ok_or(Error::NoFaceDetected)?;

        let mut report = self.analyze_landmarks(&face)?;
        report.faces_detected = faces_detected;
        Ok(report)
    }

    pub fn analyze_landmarks(&self, landmarks: &LandmarkSet) -> Result<AnalysisReport> {
        let analysis = self.classifier.analyze(landmarks)?;
        let recommendations = self
            .recommender
            .recommend(analysis.shape, self.recommendation_count)?;
        info!(
            shape = %analysis.shape,
            recommendations = recommendations.len(),
            "analysed face"
        );

        Ok(AnalysisReport {
            analysis,
            recommendations,
            landmarks_detected: landmarks.num_landmarks(),
            faces_detected: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_with_faces() {
        let json = br#"{"faces": [[{"x": 1, "y": 2}], [{"x": 3, "y": 4}, {"x": 5, "y": 6}]]}"#;
        let detector = ProvidedLandmarks::from_json(json).unwrap();
        assert_eq!(detector.num_faces(), 2);
    }

    #[test]
    fn bare_point_array_is_one_face() {
        let json = br#"[{"x": 0.1, "y": 0.2, "z": 0.0}]"#;
        let detector = ProvidedLandmarks::from_json(json).unwrap();
        assert_eq!(detector.num_faces(), 1);
        assert!(ProvidedLandmarks::from_json(b"[]").unwrap().faces.is_empty());
    }

    #[test]
    fn malformed_document() {
        let err = ProvidedLandmarks::from_json(b"{\"faces\": 7}").unwrap_err();
        assert!(matches!(err, Error::InvalidLandmarks(_)));
    }

    #[test]
    fn undecodable_bytes() {
        let err = decode_image(b"definitely not a png").unwrap_err();
        assert!(matches!(err, Error::ImageDecode(_)));
        assert_eq!(err.public_message(), "Invalid image format");
    }
}
