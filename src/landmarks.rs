//! Feature-to-index bindings for upstream landmark models.
//!
//! The classifier never indexes a [`LandmarkSet`](crate::LandmarkSet) with a
//! bare number. It asks a [`LandmarkMap`] where a feature lives, so moving to a
//! different face-mesh model only means adding a new map here.

/// Named facial features the classifier measures between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    LeftEyeOuter,
    RightEyeOuter,
    ForeheadCenter,
    Chin,
    LeftCheek,
    RightCheek,
    ForeheadLeft,
    ForeheadRight,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::LeftEyeOuter,
        Feature::RightEyeOuter,
        Feature::ForeheadCenter,
        Feature::Chin,
        Feature::LeftCheek,
        Feature::RightCheek,
        Feature::ForeheadLeft,
        Feature::ForeheadRight,
    ];
}

/// A versioned binding of [`Feature`]s to landmark indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkMap {
    pub name: &'static str,
    pub version: u32,
    pub left_eye_outer: usize,
    pub right_eye_outer: usize,
    pub forehead_center: usize,
    pub chin: usize,
    /// Cheek points stand in for the jaw; the mesh has no stable jaw-corner
    /// pair at this resolution.
    pub left_cheek: usize,
    pub right_cheek: usize,
    pub forehead_left: usize,
    pub forehead_right: usize,
}

/// MediaPipe Face Mesh (468 points, 478 with iris refinement).
pub const MEDIAPIPE_FACE_MESH: LandmarkMap = LandmarkMap {
    name: "mediapipe-face-mesh",
    version: 1,
    left_eye_outer: 33,
    right_eye_outer: 362,
    forehead_center: 9,
    chin: 18,
    left_cheek: 116,
    right_cheek: 345,
    forehead_left: 21,
    forehead_right: 251,
};

impl LandmarkMap {
    pub fn index(&self, feature: Feature) -> usize {
        match feature {
            Feature::LeftEyeOuter => self.left_eye_outer,
            Feature::RightEyeOuter => self.right_eye_outer,
            Feature::ForeheadCenter => self.forehead_center,
            Feature::Chin => self.chin,
            Feature::LeftCheek => self.left_cheek,
            Feature::RightCheek => self.right_cheek,
            Feature::ForeheadLeft => self.forehead_left,
            Feature::ForeheadRight => self.forehead_right,
        }
    }

    /// Minimum landmark count a set must have to be measured with this map.
    pub fn required_len(&self) -> usize {
        Feature::ALL
            .iter()
            .map(|f| self.index(*f))
            .max()
            .map_or(0, |max| max + 1)
    }
}

impl Default for LandmarkMap {
    fn default() -> Self {
        MEDIAPIPE_FACE_MESH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mediapipe_requires_363_points() {
        assert_eq!(MEDIAPIPE_FACE_MESH.required_len(), 363);
    }

    #[test]
    fn index_lookup() {
        assert_eq!(MEDIAPIPE_FACE_MESH.index(Feature::Chin), 18);
        assert_eq!(MEDIAPIPE_FACE_MESH.index(Feature::RightCheek), 345);
    }
}
