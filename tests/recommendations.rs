//! Recommendation engine properties over the built-in catalog.

use facefit::{
    get_recommendations, get_recommendations_by_name, rank_all_styles, Catalog, CatalogBuilder,
    Error, FaceShape, Recommender, ShapePreference, Style,
};

const CONFIDENCES: [f64; 4] = [0.9, 0.8, 0.3, 0.6];

#[test]
fn oval_top_four() {
    let recs = get_recommendations(FaceShape::Oval, 4).unwrap();
    let styles: Vec<_> = recs.iter().map(|r| r.style.as_str()).collect();
    assert_eq!(styles, ["aviator", "wayfarer", "rectangular", "round"]);
    assert_eq!(recs[0].confidence, 0.9);
    assert_eq!(recs[1].confidence, 0.9);
    assert_eq!(recs[2].confidence, 0.8);
    assert_eq!(recs[3].confidence, 0.8);
}

#[test]
fn length_and_order_follow_best_styles() {
    let catalog = Catalog::builtin();
    for shape in FaceShape::ALL {
        let best = &catalog.preference(shape).unwrap().best_styles;
        for count in 0..=6 {
            let recs = get_recommendations(shape, count).unwrap();
            assert_eq!(recs.len(), count.min(best.len()), "{shape} x {count}");
            for (rec, id) in recs.iter().zip(best) {
                assert_eq!(&rec.style, id);
            }
        }
    }
}

#[test]
fn zero_count_is_empty() {
    for shape in FaceShape::ALL {
        assert!(get_recommendations(shape, 0).unwrap().is_empty());
    }
}

#[test]
fn confidence_takes_only_four_values() {
    let recommender = Recommender::default();
    let catalog = Catalog::builtin();
    for shape in FaceShape::ALL {
        for style in catalog.styles() {
            let c = recommender.confidence(shape, &style.id).unwrap();
            assert!(CONFIDENCES.contains(&c), "{shape}/{}: {c}", style.id);
        }
    }
}

#[test]
fn ranking_is_a_sorted_permutation_of_the_catalog() {
    let catalog = Catalog::builtin();
    let mut catalog_ids: Vec<_> = catalog.styles().map(|s| s.id.clone()).collect();
    catalog_ids.sort();

    for shape in FaceShape::ALL {
        let ranked = rank_all_styles(shape).unwrap();

        let mut ids: Vec<_> = ranked.iter().map(|r| r.style.clone()).collect();
        ids.sort();
        assert_eq!(ids, catalog_ids);

        assert!(ranked
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));

        for r in &ranked {
            let style = catalog.style(&r.style).unwrap();
            assert_eq!(r.suitable, style.suitable_faces.contains(&shape));
        }
    }
}

#[test]
fn ranking_is_deterministic() {
    for shape in FaceShape::ALL {
        assert_eq!(rank_all_styles(shape).unwrap(), rank_all_styles(shape).unwrap());
    }
}

#[test]
fn recommendations_are_repeatable() {
    for shape in FaceShape::ALL {
        let first = get_recommendations(shape, 4).unwrap();
        for _ in 0..5 {
            assert_eq!(get_recommendations(shape, 4).unwrap(), first);
        }
    }
}

#[test]
fn square_avoids_rectangular_frames() {
    let ranked = rank_all_styles(FaceShape::Square).unwrap();
    let tail: Vec<_> = ranked[ranked.len() - 2..]
        .iter()
        .map(|r| (r.style.as_str(), r.confidence))
        .collect();
    assert_eq!(tail, [("rectangular", 0.3), ("square", 0.3)]);
}

#[test]
fn unknown_shape_name_fails_hard() {
    let err = get_recommendations_by_name("unknown_shape", 3).unwrap_err();
    assert!(matches!(err, Error::UnknownFaceShape(_)));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn shape_missing_from_custom_catalog() {
    let catalog = CatalogBuilder::new()
        .style(Style {
            id: "rimless".into(),
            name: "Rimless".into(),
            description: "Lenses without a frame".into(),
            suitable_faces: vec![FaceShape::Oval, FaceShape::Heart],
            style_notes: "Barely there".into(),
        })
        .preference(
            FaceShape::Heart,
            ShapePreference {
                best_styles: vec!["rimless".into()],
                avoid: vec![],
                notes: "Keep it light.".into(),
            },
        )
        .build()
        .unwrap();
    let recommender = Recommender::new(&catalog);

    let recs = recommender.recommend(FaceShape::Heart, 4).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].reason, "Barely there - Keep it light.");
    assert_eq!(recs[0].confidence, 0.9);

    assert!(matches!(
        recommender.recommend(FaceShape::Oblong, 4),
        Err(Error::UnknownFaceShape(_))
    ));
    assert!(matches!(
        recommender.rank_all_styles(FaceShape::Oblong),
        Err(Error::UnknownFaceShape(_))
    ));
}
