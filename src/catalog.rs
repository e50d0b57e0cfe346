//! Eyewear style catalog and per-shape preferences.
//!
//! The built-in tables are assembled once on first use and shared read-only
//! for the life of the process. [`CatalogBuilder`] exists for callers (and
//! tests) that need a different set of styles.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::classifier::FaceShape;
use crate::classifier::FaceShape::{Diamond, Heart, Oblong, Oval, Round, Square};
use crate::error::{Error, Result};

/// One eyewear style.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub id: String,
    pub name: String,
    pub description: String,
    pub suitable_faces: Vec<FaceShape>,
    pub style_notes: String,
}

impl Style {
    pub fn suits(&self, shape: FaceShape) -> bool {
        self.suitable_faces.contains(&shape)
    }
}

/// What works for one face shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePreference {
    /// Style ids, best first. The order is the ranking.
    pub best_styles: Vec<String>,
    pub avoid: Vec<String>,
    pub notes: String,
}

/// Style catalog plus shape preference table.
#[derive(Debug, Clone)]
pub struct Catalog {
    styles: IndexMap<String, Style>,
    preferences: IndexMap<FaceShape, ShapePreference>,
}

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Styles in catalog order.
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }

    pub fn style(&self, id: &str) -> Result<&Style> {
        self.styles
            .get(id)
            .ok_or_else(|| Error::UnknownStyle(id.to_string()))
    }

    pub fn preference(&self, shape: FaceShape) -> Result<&ShapePreference> {
        self.preferences
            .get(&shape)
            .ok_or_else(|| Error::UnknownFaceShape(shape.to_string()))
    }

    pub fn num_styles(&self) -> usize {
        self.styles.len()
    }

    /// Check that every style a preference mentions exists.
    pub fn validate(&self) -> Result<()> {
        for pref in self.preferences.values() {
            for id in pref.best_styles.iter().chain(&pref.avoid) {
                if !self.styles.contains_key(id) {
                    return Err(Error::UnknownStyle(id.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Builder for custom catalogs.
///
/// # Example
///
/// ```
/// use facefit::{CatalogBuilder, FaceShape, ShapePreference, Style};
///
/// let catalog = CatalogBuilder::new()
///     .style(Style {
///         id: "pilot".into(),
///         name: "Pilot".into(),
///         description: "Double bridge".into(),
///         suitable_faces: vec![FaceShape::Oval],
///         style_notes: "Adds width".into(),
///     })
///     .preference(
///         FaceShape::Oval,
///         ShapePreference {
///             best_styles: vec!["pilot".into()],
///             avoid: vec![],
///             notes: "Anything goes".into(),
///         },
///     )
///     .build()
///     .unwrap();
/// assert_eq!(catalog.num_styles(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    styles: IndexMap<String, Style>,
    preferences: IndexMap<FaceShape, ShapePreference>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style. A later style with the same id replaces the earlier one
    /// but keeps its position.
    pub fn style(mut self, style: Style) -> Self {
        self.styles.insert(style.id.clone(), style);
        self
    }

    pub fn preference(mut self, shape: FaceShape, preference: ShapePreference) -> Self {
        self.preferences.insert(shape, preference);
        self
    }

    pub fn build(self) -> Result<Catalog> {
        let catalog = Catalog {
            styles: self.styles,
            preferences: self.preferences,
        };
        catalog.validate()?;
        Ok(catalog)
    }
}

struct StyleEntry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    suitable: &'static [FaceShape],
    notes: &'static str,
}

struct PreferenceEntry {
    shape: FaceShape,
    best: &'static [&'static str],
    avoid: &'static [&'static str],
    notes: &'static str,
}

const STYLES: &[StyleEntry] = &[
    StyleEntry {
        id: "aviator",
        name: "Classic Aviator",
        description: "Timeless teardrop shape with thin metal frames",
        suitable: &[Oval, Square, Heart],
        notes: "Balances strong jawlines and adds width to narrow faces",
    },
    StyleEntry {
        id: "round",
        name: "Round Frames",
        description: "Circular lenses with various frame materials",
        suitable: &[Oval, Square, Oblong],
        notes: "Softens angular features and complements geometric face shapes",
    },
    StyleEntry {
        id: "rectangular",
        name: "Rectangular Frames",
        description: "Straight lines and sharp angles",
        suitable: &[Round, Oval, Heart],
        notes: "Adds structure and definition to soft face shapes",
    },
    StyleEntry {
        id: "cat_eye",
        name: "Cat Eye",
        description: "Upswept outer corners with vintage appeal",
        suitable: &[Round, Square, Oval],
        notes: "Lifts features and adds sophistication",
    },
    StyleEntry {
        id: "square",
        name: "Square Frames",
        description: "Bold, geometric design with thick frames",
        suitable: &[Round, Oval, Heart],
        notes: "Adds definition and contemporary style",
    },
    StyleEntry {
        id: "wayfarer",
        name: "Wayfarer",
        description: "Trapezoidal frame shape, slightly wider at top",
        suitable: &[Oval, Round, Heart, Oblong],
        notes: "Versatile style that works with most face shapes",
    },
    StyleEntry {
        id: "browline",
        name: "Browline",
        description: "Prominent upper frame that mimics eyebrows",
        suitable: &[Oval, Round, Heart],
        notes: "Adds definition to the upper face",
    },
    StyleEntry {
        id: "oversized",
        name: "Oversized",
        description: "Large frames that make a fashion statement",
        suitable: &[Oval, Square, Oblong],
        notes: "Creates drama and covers more face area",
    },
];

const PREFERENCES: &[PreferenceEntry] = &[
    PreferenceEntry {
        shape: Oval,
        best: &["aviator", "wayfarer", "rectangular", "round"],
        avoid: &[],
        notes: "Oval faces can wear almost any style. Maintain the natural balance.",
    },
    PreferenceEntry {
        shape: Round,
        best: &["rectangular", "square", "cat_eye", "browline"],
        avoid: &["round"],
        notes: "Add angles and structure to complement the soft curves.",
    },
    PreferenceEntry {
        shape: Square,
        best: &["round", "aviator", "cat_eye", "oversized"],
        avoid: &["square", "rectangular"],
        notes: "Soften strong jawlines with curved frames.",
    },
    PreferenceEntry {
        shape: Heart,
        best: &["aviator", "rectangular", "wayfarer", "browline"],
        avoid: &["cat_eye"],
        notes: "Balance a wider forehead with frames that add width to the lower face.",
    },
    PreferenceEntry {
        shape: Oblong,
        best: &["wayfarer", "round", "oversized"],
        avoid: &["rectangular"],
        notes: "Add width and break up the length of the face.",
    },
    PreferenceEntry {
        shape: Diamond,
        best: &["cat_eye", "aviator", "browline", "wayfarer"],
        avoid: &["rectangular"],
        notes: "Highlight the eyes and add width to forehead and chin.",
    },
];

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let owned = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let styles = STYLES
        .iter()
        .map(|e| {
            let style = Style {
                id: e.id.to_string(),
                name: e.name.to_string(),
                description: e.description.to_string(),
                suitable_faces: e.suitable.to_vec(),
                style_notes: e.notes.to_string(),
            };
            (style.id.clone(), style)
        })
        .collect();

    let preferences = PREFERENCES
        .iter()
        .map(|e| {
            let pref = ShapePreference {
                best_styles: owned(e.best),
                avoid: owned(e.avoid),
                notes: e.notes.to_string(),
            };
            (e.shape, pref)
        })
        .collect();

    Catalog {
        styles,
        preferences,
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_consistent() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.num_styles(), 8);
        for shape in FaceShape::ALL {
            assert!(catalog.preference(shape).is_ok(), "missing {shape}");
        }
    }

    #[test]
    fn builtin_keeps_insertion_order() {
        let ids: Vec<_> = Catalog::builtin().styles().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "aviator",
                "round",
                "rectangular",
                "cat_eye",
                "square",
                "wayfarer",
                "browline",
                "oversized"
            ]
        );
    }

    #[test]
    fn builtin_is_shared() {
        assert!(std::ptr::eq(Catalog::builtin(), Catalog::builtin()));
    }

    #[test]
    fn builder_rejects_dangling_style() {
        let err = CatalogBuilder::new()
            .preference(
                FaceShape::Round,
                ShapePreference {
                    best_styles: vec!["monocle".into()],
                    avoid: vec![],
                    notes: String::new(),
                },
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownStyle(id) if id == "monocle"));
    }

    #[test]
    fn missing_preference_is_unknown_shape() {
        let catalog = CatalogBuilder::new().build().unwrap();
        assert!(matches!(
            catalog.preference(FaceShape::Heart),
            Err(Error::UnknownFaceShape(s)) if s == "heart"
        ));
    }
}
