//! Sorting features into trails, plain regions and report regions.

use trail_report_feature_models::{AttributeSchema, Feature};
use trail_report_report_models::{SkipReason, SkippedFeature};
use trail_report_spatial::{ShapeKind, shape_kind};

use crate::ClassifierConfig;

/// Features of one document, bucketed by role. Every bucket keeps
/// document order.
#[derive(Debug, Default)]
pub struct Classification<'a> {
    pub trails: Vec<&'a Feature>,
    pub plain_regions: Vec<&'a Feature>,
    pub report_regions: Vec<&'a Feature>,
    pub skipped: Vec<SkippedFeature>,
}

impl<'a> Classification<'a> {
    /// Everything measured in the main table: trails first, then plain
    /// regions.
    #[must_use]
    pub fn drawable(&self) -> Vec<&'a Feature> {
        self.trails
            .iter()
            .chain(&self.plain_regions)
            .copied()
            .collect()
    }

    /// All regions, plain and report.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.plain_regions.len() + self.report_regions.len()
    }
}

/// Buckets `features` by geometry and report flag.
///
/// The attribute schema is taken from the first feature. Features drawn
/// as points, and features whose attribute keys differ from the schema,
/// are skipped and logged.
#[must_use]
pub fn classify<'a>(features: &'a [Feature], config: &ClassifierConfig) -> Classification<'a> {
    let schema = features
        .first()
        .map(|f| AttributeSchema::from_attributes(&f.attributes))
        .unwrap_or_default();

    let mut classification = Classification::default();

    for feature in features {
        let Some(kind) = shape_kind(feature.geometry_kind) else {
            log::warn!(
                "Skipping '{}': {} geometry is not measured",
                feature.name,
                feature.geometry_kind
            );
            classification.skipped.push(SkippedFeature {
                name: feature.name.clone(),
                reason: SkipReason::UnsupportedGeometry,
                message: format!("{} geometry is not measured", feature.geometry_kind),
            });
            continue;
        };

        if !schema.matches(&feature.attributes) {
            let keys: Vec<&str> = feature.attributes.keys().collect();
            log::warn!(
                "Skipping '{}': attributes [{}] differ from document schema [{}]",
                feature.name,
                keys.join(", "),
                schema.keys().join(", ")
            );
            classification.skipped.push(SkippedFeature {
                name: feature.name.clone(),
                reason: SkipReason::AmbiguousAttributeSchema,
                message: format!(
                    "attributes [{}] differ from document schema [{}]",
                    keys.join(", "),
                    schema.keys().join(", ")
                ),
            });
            continue;
        }

        match kind {
            ShapeKind::OpenPath => classification.trails.push(feature),
            ShapeKind::ClosedRegion if config.is_report(&feature.attributes) => {
                classification.report_regions.push(feature);
            }
            ShapeKind::ClosedRegion => classification.plain_regions.push(feature),
        }
    }

    log::debug!(
        "Classified {} trail(s), {} plain region(s), {} report region(s), {} skipped",
        classification.trails.len(),
        classification.plain_regions.len(),
        classification.report_regions.len(),
        classification.skipped.len()
    );

    classification
}
