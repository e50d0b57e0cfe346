//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::io::Cursor;

use facefit::{LandmarkSet, Point, MEDIAPIPE_FACE_MESH};
use image::{ImageFormat, RgbImage};

/// Number of points in a MediaPipe face mesh.
pub const MESH_POINTS: usize = 468;

/// Builds a face mesh whose measured distances are known in advance.
///
/// Features are laid out symmetrically around `x = 0`; every point not used
/// by the classifier stays at the origin.
#[derive(Debug, Clone)]
pub struct FaceBuilder {
    face_width: f64,
    face_length: f64,
    jaw_width: f64,
    forehead_width: f64,
    points: usize,
}

impl Default for FaceBuilder {
    fn default() -> Self {
        Self {
            face_width: 60.0,
            face_length: 75.0,
            jaw_width: 50.0,
            forehead_width: 55.0,
            points: MESH_POINTS,
        }
    }
}

impl FaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face_width(mut self, v: f64) -> Self {
        self.face_width = v;
        self
    }

    pub fn face_length(mut self, v: f64) -> Self {
        self.face_length = v;
        self
    }

    pub fn jaw_width(mut self, v: f64) -> Self {
        self.jaw_width = v;
        self
    }

    pub fn forehead_width(mut self, v: f64) -> Self {
        self.forehead_width = v;
        self
    }

    pub fn points(mut self, n: usize) -> Self {
        self.points = n;
        self
    }

    /// A face with the given length/width and jaw/cheek ratios.
    pub fn with_ratios(face_ratio: f64, jaw_to_cheek: f64) -> Self {
        let width = 100.0;
        Self::new()
            .face_width(width)
            .face_length(face_ratio * width)
            .jaw_width(jaw_to_cheek * width)
            .forehead_width(0.9 * width)
    }

    pub fn build(&self) -> LandmarkSet {
        let map = MEDIAPIPE_FACE_MESH;
        let mut set = LandmarkSet::zeros(self.points);
        let mut put = |idx: usize, p: Point| {
            if idx < set.num_landmarks() {
                set[idx] = p;
            }
        };

        put(map.left_eye_outer, Point::new(-self.face_width / 2.0, 0.0));
        put(map.right_eye_outer, Point::new(self.face_width / 2.0, 0.0));
        put(map.forehead_center, Point::new(0.0, -20.0));
        put(map.chin, Point::new(0.0, self.face_length - 20.0));
        put(map.left_cheek, Point::new(-self.jaw_width / 2.0, 25.0));
        put(map.right_cheek, Point::new(self.jaw_width / 2.0, 25.0));
        put(map.forehead_left, Point::new(-self.forehead_width / 2.0, -10.0));
        put(map.forehead_right, Point::new(self.forehead_width / 2.0, -10.0));
        set
    }

    /// Landmark document with this face, as an external detector would emit.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "faces": [self.build()] }).to_string()
    }
}

/// A small valid PNG.
pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_fn(16, 16, |x, y| image::Rgb([(x * 16) as u8, (y * 16) as u8, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("encode test png");
    buf.into_inner()
}
