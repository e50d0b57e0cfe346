use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
///
/// Coordinates may be normalized to `[0,1]` or expressed in pixels; the
/// classifier only looks at relative distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Scale a normalized point to pixel coordinates.
    pub fn denormalize(&self, width: u32, height: u32) -> Point {
        Point::new(self.x * width as f64, self.y * height as f64)
    }
}

/// The landmarks of a single detected face, in detector order.
///
/// Position in the sequence carries meaning: index 33 of a MediaPipe face
/// mesh is always the left outer eye corner, and so on. See
/// [`LandmarkMap`](crate::LandmarkMap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    pub points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Create a zeroed set with n landmarks.
    pub fn zeros(n: usize) -> Self {
        Self {
            points: vec![Point::zero(); n],
        }
    }

    pub fn num_landmarks(&self) -> usize {
        self.points.len()
    }

    pub fn get(&self, idx: usize) -> Option<&Point> {
        self.points.get(idx)
    }

    /// Convert every point from normalized to pixel coordinates.
    pub fn denormalized(&self, width: u32, height: u32) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| p.denormalize(width, height))
                .collect(),
        }
    }
}

impl From<Vec<Point>> for LandmarkSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl std::ops::IndexMut<usize> for LandmarkSet {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.points[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn denormalize_scales_to_pixels() {
        let set = LandmarkSet::new(vec![Point::new(0.5, 0.25), Point::new(1.0, 1.0)]);
        let pixels = set.denormalized(640, 480);
        assert_eq!(pixels[0], Point::new(320.0, 120.0));
        assert_eq!(pixels[1], Point::new(640.0, 480.0));
    }

    #[test]
    fn points_ignore_extra_fields() {
        // MediaPipe emits a depth coordinate we don't use.
        let json = r#"[{"x": 0.1, "y": 0.2, "z": -0.03}, {"x": 0.4, "y": 0.5}]"#;
        let set: LandmarkSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.num_landmarks(), 2);
        assert_eq!(set[0], Point::new(0.1, 0.2));
    }
}
