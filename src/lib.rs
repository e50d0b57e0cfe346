//! # facefit
//!
//! Face shape classification from facial landmarks, and eyewear style
//! recommendations for the classified shape.
//!
//! This crate provides:
//! - **Classification**: five landmark distances, three proportions, and a
//!   threshold tree over six shapes (oval, round, square, heart, oblong,
//!   diamond)
//! - **Recommendations**: a static style catalog and per-shape preferences,
//!   ranked with a coarse confidence score
//! - **Pipeline**: image bytes through decoding, landmark detection,
//!   classification and recommendation
//!
//! Landmarks are expected in MediaPipe Face Mesh order by default; see
//! [`LandmarkMap`] for the feature bindings.
//!
//! ## Quick Start
//!
//! ```rust
//! use facefit::{analyze_face, get_recommendations, LandmarkSet, Point};
//!
//! // Normally produced by a face-mesh detector.
//! let mut face = LandmarkSet::zeros(468);
//! face[33] = Point::new(0.0, 0.0); // left eye outer
//! face[362] = Point::new(60.0, 0.0); // right eye outer
//! face[9] = Point::new(30.0, -10.0); // forehead
//! face[18] = Point::new(30.0, 65.0); // chin
//! face[116] = Point::new(5.0, 20.0); // left cheek
//! face[345] = Point::new(55.0, 20.0); // right cheek
//! face[21] = Point::new(2.5, -5.0);
//! face[251] = Point::new(57.5, -5.0);
//!
//! let analysis = analyze_face(&face).unwrap();
//! assert_eq!(analysis.shape.as_str(), "oval");
//!
//! let recs = get_recommendations(analysis.shape, 2).unwrap();
//! assert_eq!(recs[0].style, "aviator");
//! ```
//!
//! ## Custom Detectors
//!
//! Implement [`LandmarkDetector`] to plug a face-mesh model into
//! [`FaceFit`]:
//!
//! ```rust
//! use facefit::{LandmarkDetector, LandmarkSet, Result};
//! use image::DynamicImage;
//!
//! struct MyDetector;
//!
//! impl LandmarkDetector for MyDetector {
//!     fn detect(&self, _image: &DynamicImage) -> Result<Vec<LandmarkSet>> {
//!         // Run the model; one LandmarkSet per face found.
//!         Ok(Vec::new())
//!     }
//! }
//! ```

pub mod catalog;
pub mod classifier;
pub mod config;
mod error;
pub mod landmarks;
pub mod pipeline;
pub mod recommend;
pub mod response;
#[cfg(feature = "server")]
pub mod server;
mod types;

pub use catalog::{Catalog, CatalogBuilder, ShapePreference, Style};
pub use classifier::{
    analyze_face, classify, FaceAnalysis, FaceShape, FaceShapeClassifier, Measurements, Ratios,
};
pub use config::AppConfig;
pub use error::{Error, ErrorKind, Result};
pub use landmarks::{Feature, LandmarkMap, MEDIAPIPE_FACE_MESH};
pub use pipeline::{
    decode_image, AnalysisReport, FaceFit, LandmarkDetector, LandmarkDocument, ProvidedLandmarks,
};
pub use recommend::{
    get_recommendations, get_recommendations_by_name, rank_all_styles, RankedStyle,
    Recommendation, Recommender, Suitability,
};
pub use types::{LandmarkSet, Point};
