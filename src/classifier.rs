//! Face shape classification from landmark proportions.
//!
//! Five distances are measured between fixed landmarks, reduced to three
//! ratios, and the ratios are matched against a small decision tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::landmarks::{Feature, LandmarkMap};
use crate::types::LandmarkSet;

/// Smallest denominator a ratio may be computed against.
pub const EPSILON: f64 = 1e-6;

/// Coarse face shape category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Oblong,
    Diamond,
}

impl FaceShape {
    pub const ALL: [FaceShape; 6] = [
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Heart,
        FaceShape::Oblong,
        FaceShape::Diamond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaceShape::Oval => "oval",
            FaceShape::Round => "round",
            FaceShape::Square => "square",
            FaceShape::Heart => "heart",
            FaceShape::Oblong => "oblong",
            FaceShape::Diamond => "diamond",
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaceShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        FaceShape::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownFaceShape(s.to_string()))
    }
}

/// Linear face measurements, in the units of the landmarks they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Outer eye corner to outer eye corner.
    pub face_width: f64,
    /// Forehead center to chin.
    pub face_length: f64,
    /// Cheek to cheek. Named for what it approximates.
    pub jaw_width: f64,
    /// Same as `face_width`; not measured separately.
    pub cheekbone_width: f64,
    pub forehead_width: f64,
}

/// Proportions derived from [`Measurements`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    pub face_ratio: f64,
    pub jaw_to_cheek: f64,
    pub forehead_to_cheek: f64,
}

/// Result of analyzing one face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceAnalysis {
    pub shape: FaceShape,
    pub measurements: Measurements,
    pub ratios: Ratios,
}

impl Measurements {
    /// Compute the three classification ratios.
    ///
    /// Fails with [`Error::DegenerateGeometry`] instead of producing an
    /// infinite or NaN ratio.
    pub fn ratios(&self) -> Result<Ratios> {
        Ok(Ratios {
            face_ratio: checked_ratio("face_ratio", self.face_length, self.face_width)?,
            jaw_to_cheek: checked_ratio("jaw_to_cheek", self.jaw_width, self.cheekbone_width)?,
            forehead_to_cheek: checked_ratio(
                "forehead_to_cheek",
                self.forehead_width,
                self.cheekbone_width,
            )?,
        })
    }
}

fn checked_ratio(name: &'static str, numerator: f64, denominator: f64) -> Result<f64> {
    // Written so that a NaN denominator also fails.
    if !(denominator >= EPSILON) {
        warn!(ratio = name, denominator, "degenerate face geometry");
        return Err(Error::DegenerateGeometry {
            ratio: name,
            denominator,
        });
    }
    let value = numerator / denominator;
    if !value.is_finite() {
        warn!(ratio = name, numerator, denominator, "non-finite face ratio");
        return Err(Error::DegenerateGeometry {
            ratio: name,
            denominator,
        });
    }
    Ok(value)
}

/// Map ratios to a face shape.
///
/// Total over its input: every ratio pair lands in exactly one branch, and the
/// boundaries 1.2 and 1.3 belong to the middle band.
pub fn classify(ratios: &Ratios) -> FaceShape {
    let face = ratios.face_ratio;
    let jaw = ratios.jaw_to_cheek;

    if (1.2..=1.3).contains(&face) {
        if (0.8..=1.0).contains(&jaw) {
            FaceShape::Oval
        } else if jaw < 0.8 {
            FaceShape::Heart
        } else {
            FaceShape::Square
        }
    } else if face < 1.2 {
        if jaw > 0.9 {
            FaceShape::Round
        } else {
            FaceShape::Heart
        }
    } else if jaw > 0.9 {
        FaceShape::Oblong
    } else {
        FaceShape::Diamond
    }
}

/// Measures and classifies faces using a fixed [`LandmarkMap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceShapeClassifier {
    map: LandmarkMap,
}

impl FaceShapeClassifier {
    pub fn new(map: LandmarkMap) -> Self {
        Self { map }
    }

    pub fn landmark_map(&self) -> &LandmarkMap {
        &self.map
    }

    /// Measure the five face distances.
    pub fn measure(&self, landmarks: &LandmarkSet) -> Result<Measurements> {
        let required = self.map.required_len();
        if landmarks.num_landmarks() < required {
            return Err(Error::InsufficientLandmarks {
                required,
                actual: landmarks.num_landmarks(),
            });
        }

        let dist = |a: Feature, b: Feature| {
            landmarks[self.map.index(a)].distance(&landmarks[self.map.index(b)])
        };

        let face_width = dist(Feature::LeftEyeOuter, Feature::RightEyeOuter);
        let measurements = Measurements {
            face_width,
            face_length: dist(Feature::ForeheadCenter, Feature::Chin),
            jaw_width: dist(Feature::LeftCheek, Feature::RightCheek),
            cheekbone_width: face_width,
            forehead_width: dist(Feature::ForeheadLeft, Feature::ForeheadRight),
        };
        debug!(?measurements, map = self.map.name, "measured face");
        Ok(measurements)
    }

    /// Measure, derive ratios and classify.
    pub fn analyze(&self, landmarks: &LandmarkSet) -> Result<FaceAnalysis> {
        let measurements = self.measure(landmarks)?;
        let ratios = measurements.ratios()?;
        let shape = classify(&ratios);
        debug!(?ratios, %shape, "classified face");

        Ok(FaceAnalysis {
            shape,
            measurements,
            ratios,
        })
    }
}

/// Analyze a MediaPipe face mesh.
pub fn analyze_face(landmarks: &LandmarkSet) -> Result<FaceAnalysis> {
    FaceShapeClassifier::default().analyze(landmarks)
}
