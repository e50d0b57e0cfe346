//! Eyewear recommendations for a classified face shape.

use serde::Serialize;
use tracing::error;

use crate::catalog::{Catalog, ShapePreference};
use crate::classifier::FaceShape;
use crate::error::Result;

/// How well a style fits a face shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suitability {
    /// One of the two best styles for the shape.
    Top,
    /// Further down the shape's preferred list.
    Preferred,
    /// Listed as one to avoid.
    Avoided,
    /// Neither recommended nor discouraged.
    Neutral,
}

impl Suitability {
    /// Coarse confidence score. Not a probability.
    pub fn confidence(self) -> f64 {
        match self {
            Suitability::Top => 0.9,
            Suitability::Preferred => 0.8,
            Suitability::Avoided => 0.3,
            Suitability::Neutral => 0.6,
        }
    }

    fn of(preference: &ShapePreference, style: &str) -> Self {
        let rank = preference.best_styles.iter().position(|s| s == style);
        match rank {
            Some(0 | 1) => Suitability::Top,
            Some(_) => Suitability::Preferred,
            None if preference.avoid.iter().any(|s| s == style) => Suitability::Avoided,
            None => Suitability::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub style: String,
    pub name: String,
    pub description: String,
    pub reason: String,
    pub confidence: f64,
}

/// A catalog style scored against one face shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStyle {
    pub style: String,
    pub name: String,
    pub description: String,
    pub confidence: f64,
    /// Whether the catalog lists the shape among the style's suitable faces.
    pub suitable: bool,
}

/// Looks up recommendations in a [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    catalog: &'a Catalog,
}

impl Default for Recommender<'static> {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    fn preference(&self, shape: FaceShape) -> Result<&'a ShapePreference> {
        self.catalog.preference(shape).inspect_err(|_| {
            error!(%shape, "face shape has no entry in the preference table");
        })
    }

    pub fn suitability(&self, shape: FaceShape, style: &str) -> Result<Suitability> {
        Ok(Suitability::of(self.preference(shape)?, style))
    }

    pub fn confidence(&self, shape: FaceShape, style: &str) -> Result<f64> {
        Ok(self.suitability(shape, style)?.confidence())
    }

    /// The first `count` preferred styles for `shape`, best first.
    pub fn recommend(&self, shape: FaceShape, count: usize) -> Result<Vec<Recommendation>> {
        let preference = self.preference(shape)?;

        preference
            .best_styles
            .iter()
            .take(count)
            .map(|id| {
                let style = self.catalog.style(id)?;
                Ok(Recommendation {
                    style: style.id.clone(),
                    name: style.name.clone(),
                    description: style.description.clone(),
                    reason: format!("{} - {}", style.style_notes, preference.notes),
                    confidence: Suitability::of(preference, id).confidence(),
                })
            })
            .collect()
    }

    /// Every catalog style scored for `shape`, highest confidence first.
    ///
    /// Styles with equal confidence keep catalog order.
    pub fn rank_all_styles(&self, shape: FaceShape) -> Result<Vec<RankedStyle>> {
        let preference = self.preference(shape)?;

        let mut ranked: Vec<_> = self
            .catalog
            .styles()
            .map(|style| RankedStyle {
                style: style.id.clone(),
                name: style.name.clone(),
                description: style.description.clone(),
                confidence: Suitability::of(preference, &style.id).confidence(),
                suitable: style.suits(shape),
            })
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(ranked)
    }
}

/// Recommendations from the built-in catalog.
pub fn get_recommendations(shape: FaceShape, count: usize) -> Result<Vec<Recommendation>> {
    Recommender::default().recommend(shape, count)
}

/// Like [`get_recommendations`], for a shape given by name.
///
/// An unrecognised name fails with
/// [`Error::UnknownFaceShape`](crate::Error::UnknownFaceShape); it never
/// degrades to an empty list.
pub fn get_recommendations_by_name(shape: &str, count: usize) -> Result<Vec<Recommendation>> {
    get_recommendations(shape.parse()?, count)
}

/// All built-in styles ranked for `shape`.
pub fn rank_all_styles(shape: FaceShape) -> Result<Vec<RankedStyle>> {
    Recommender::default().rank_all_styles(shape)
}
