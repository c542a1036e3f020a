// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene construction and hit testing.

use floret_catalog::RecordLookup;
use floret_garden::{GardenState, PlacementKey};
use kurbo::{Circle, Point, Rect};
use peniko::Color;

use crate::color::{bloom_fill, bloom_stroke, label_halo, topographic_fill};
use crate::drag::DragGrab;
use crate::viewport::PlanViewport;

/// Spread assumed for records the catalog has no spacing for, in feet.
///
/// Keeps such instances visible and hittable instead of collapsing them to a
/// zero-radius dot.
const DEFAULT_SPREAD: f64 = 1.0;

/// Which of the two mutually exclusive render modes is active.
///
/// Modes are purely a display concern: they change fills, strokes, and
/// labels, never the data model.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Bloom colors with name labels.
    #[default]
    Bloom,
    /// Height-ramped fills, no strokes or labels.
    Topographic,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Bloom => Self::Topographic,
            Self::Topographic => Self::Bloom,
        }
    }
}

/// Label drawn centered on a bloom-mode mark.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkLabel {
    /// Text to draw (the plant's common name).
    pub text: String,
    /// Text color (the solid bloom color).
    pub color: Color,
    /// Outline color behind the text, for legibility over any fill.
    pub halo: Color,
}

/// One placed instance, fully styled and positioned in view coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantMark {
    /// The placement this instance belongs to.
    pub key: PlacementKey,
    /// Index of the instance within its placement.
    pub position_index: usize,
    /// Center in view coordinates (pixels).
    pub center: Point,
    /// Radius in view coordinates: half the spread, scaled.
    pub radius: f64,
    /// Fill paint.
    pub fill: Color,
    /// Stroke paint, when the mode draws outlines.
    pub stroke: Option<Color>,
    /// Centered label, when the mode draws names.
    pub label: Option<MarkLabel>,
}

impl PlantMark {
    /// The mark's footprint as a circle.
    #[must_use]
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}

/// A drawable, hit-testable snapshot of the garden.
///
/// Marks are in draw order: placement insertion order, then position
/// insertion order within each placement. Backends draw them front to back
/// as listed; hit testing walks them in reverse so the visually topmost mark
/// wins ties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// The garden outline in view coordinates, when the viewport is usable.
    pub boundary: Option<Rect>,
    /// Styled instances in draw order.
    pub marks: Vec<PlantMark>,
}

impl Scene {
    /// Returns the topmost mark containing the view-space point, if any.
    ///
    /// Later-drawn marks win ties, matching what the user sees stacked on
    /// top.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<&PlantMark> {
        self.marks
            .iter()
            .rev()
            .find(|mark| (pt - mark.center).hypot() <= mark.radius)
    }
}

/// Builds the scene for one draw.
///
/// Placements without a resolved record are skipped silently; the draw loop
/// must never fail because the catalog is stale or unreachable. When `drag`
/// holds a grab for an instance, the grab's live position is used in place
/// of the stored one, so the instance follows the pointer without the model
/// changing until the drop.
#[must_use]
pub fn build_scene(
    state: &GardenState,
    records: &impl RecordLookup,
    viewport: &PlanViewport,
    mode: ViewMode,
    drag: Option<&DragGrab>,
) -> Scene {
    if viewport.is_degenerate() {
        return Scene::default();
    }

    let mut marks = Vec::new();
    for placement in &state.plants {
        let Some(record) = records.record(&placement.key) else {
            continue;
        };

        let radius = record.spread.unwrap_or(DEFAULT_SPREAD) / 2.0 * viewport.scale();
        let (fill, stroke, label) = match mode {
            ViewMode::Bloom => (
                bloom_fill(record.color),
                Some(bloom_stroke(record.color)),
                Some(MarkLabel {
                    text: record.common_name.clone(),
                    color: bloom_stroke(record.color),
                    halo: label_halo(),
                }),
            ),
            ViewMode::Topographic => (topographic_fill(record.height.unwrap_or(0.0)), None, None),
        };

        for (position_index, position) in placement.positions.iter().enumerate() {
            let stored = Point::new(position.x, position.y);
            let garden_center = match drag {
                Some(grab) if grab.overrides(&placement.key, position_index) => grab.live(),
                _ => stored,
            };
            marks.push(PlantMark {
                key: placement.key.clone(),
                position_index,
                center: viewport.garden_to_view(garden_center),
                radius,
                fill,
                stroke,
                label: label.clone(),
            });
        }
    }

    Scene {
        boundary: Some(viewport.garden_rect()),
        marks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DragController;
    use floret_catalog::{PlantRecord, Rgb8};
    use kurbo::Size;

    struct Records(Vec<PlantRecord>);

    impl RecordLookup for Records {
        fn record(&self, key: &PlacementKey) -> Option<&PlantRecord> {
            self.0.iter().find(|r| r.key == *key)
        }
    }

    fn record(plant: &str, color: &str, spread: Option<f64>, height: Option<f64>) -> PlantRecord {
        PlantRecord {
            key: PlacementKey::new(plant, color),
            common_name: format!("{plant} common"),
            scientific_name: format!("{plant} sci"),
            color_name: "Purple".into(),
            color: Rgb8::new(0x8a, 0x2b, 0xe2),
            height,
            spread,
            niche_id: None,
            niche_name: None,
            native: false,
            bloom: vec![],
            features: vec![],
        }
    }

    fn viewport() -> PlanViewport {
        PlanViewport::fit(Size::new(800.0, 600.0), Size::new(25.0, 10.0))
    }

    #[test]
    fn unresolved_placements_are_skipped() {
        let mut garden = GardenState::new();
        garden.toggle_placement("known", "c1", None);
        garden.add_position("known", "c1", 5.0, 5.0);
        garden.toggle_placement("unknown", "c1", None);
        garden.add_position("unknown", "c1", 6.0, 6.0);

        let records = Records(vec![record("known", "c1", Some(2.0), Some(1.0))]);
        let scene = build_scene(&garden, &records, &viewport(), ViewMode::Bloom, None);

        assert_eq!(scene.marks.len(), 1);
        assert_eq!(scene.marks[0].key, PlacementKey::new("known", "c1"));
    }

    #[test]
    fn radius_is_half_spread_scaled_with_default_for_missing_spread() {
        let mut garden = GardenState::new();
        garden.toggle_placement("wide", "c1", None);
        garden.add_position("wide", "c1", 5.0, 5.0);
        garden.toggle_placement("unsized", "c1", None);
        garden.add_position("unsized", "c1", 8.0, 5.0);

        let records = Records(vec![
            record("wide", "c1", Some(4.0), None),
            record("unsized", "c1", None, None),
        ]);
        let vp = viewport();
        let scene = build_scene(&garden, &records, &vp, ViewMode::Bloom, None);

        assert!((scene.marks[0].radius - 2.0 * vp.scale()).abs() < 1e-9);
        assert!((scene.marks[1].radius - 0.5 * vp.scale()).abs() < 1e-9);
    }

    #[test]
    fn bloom_mode_styles_marks_with_stroke_and_label() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.add_position("p1", "c1", 5.0, 5.0);

        let records = Records(vec![record("p1", "c1", Some(2.0), Some(3.0))]);
        let scene = build_scene(&garden, &records, &viewport(), ViewMode::Bloom, None);

        let mark = &scene.marks[0];
        assert!(mark.stroke.is_some());
        let label = mark.label.as_ref().unwrap();
        assert_eq!(label.text, "p1 common");
        assert_eq!(label.halo, label_halo());
    }

    #[test]
    fn topographic_mode_drops_stroke_and_label() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.add_position("p1", "c1", 5.0, 5.0);

        let records = Records(vec![record("p1", "c1", Some(2.0), Some(3.0))]);
        let scene = build_scene(&garden, &records, &viewport(), ViewMode::Topographic, None);

        let mark = &scene.marks[0];
        assert_eq!(mark.stroke, None);
        assert_eq!(mark.label, None);
        assert_eq!(mark.fill, topographic_fill(3.0));
    }

    #[test]
    fn missing_height_renders_as_ground_level() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.add_position("p1", "c1", 5.0, 5.0);

        let records = Records(vec![record("p1", "c1", Some(2.0), None)]);
        let scene = build_scene(&garden, &records, &viewport(), ViewMode::Topographic, None);
        assert_eq!(scene.marks[0].fill, topographic_fill(0.0));
    }

    #[test]
    fn hit_test_prefers_the_later_inserted_instance() {
        let mut garden = GardenState::new();
        garden.toggle_placement("under", "c1", None);
        garden.add_position("under", "c1", 5.0, 5.0);
        garden.toggle_placement("over", "c1", None);
        garden.add_position("over", "c1", 5.0, 5.0);

        let records = Records(vec![
            record("under", "c1", Some(2.0), None),
            record("over", "c1", Some(2.0), None),
        ]);
        let vp = viewport();
        let scene = build_scene(&garden, &records, &vp, ViewMode::Bloom, None);

        let hit = scene
            .hit_test(vp.garden_to_view(Point::new(5.0, 5.0)))
            .unwrap();
        assert_eq!(hit.key, PlacementKey::new("over", "c1"));
    }

    #[test]
    fn hit_test_misses_outside_the_radius() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.add_position("p1", "c1", 5.0, 5.0);

        let records = Records(vec![record("p1", "c1", Some(2.0), None)]);
        let vp = viewport();
        let scene = build_scene(&garden, &records, &vp, ViewMode::Bloom, None);

        // 1 ft radius; probe 1.5 ft away.
        let probe = vp.garden_to_view(Point::new(6.5, 5.0));
        assert!(scene.hit_test(probe).is_none());
    }

    #[test]
    fn drag_override_moves_only_the_grabbed_instance() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.add_position("p1", "c1", 2.0, 2.0);
        garden.add_position("p1", "c1", 8.0, 8.0);

        let mut drag = DragController::new();
        drag.begin(
            PlacementKey::new("p1", "c1"),
            1,
            Point::new(8.0, 8.0),
            Point::new(8.0, 8.0),
        );
        drag.update(Point::new(4.0, 4.0));

        let records = Records(vec![record("p1", "c1", Some(2.0), None)]);
        let vp = viewport();
        let scene = build_scene(&garden, &records, &vp, ViewMode::Bloom, drag.grab());

        assert_eq!(scene.marks[0].center, vp.garden_to_view(Point::new(2.0, 2.0)));
        assert_eq!(scene.marks[1].center, vp.garden_to_view(Point::new(4.0, 4.0)));
        // The model itself is untouched while dragging.
        assert_eq!(garden.positions("p1", "c1")[1].x, 8.0);
    }

    #[test]
    fn degenerate_viewport_builds_an_empty_scene() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.add_position("p1", "c1", 5.0, 5.0);

        let records = Records(vec![record("p1", "c1", Some(2.0), None)]);
        let vp = PlanViewport::fit(Size::new(0.0, 0.0), Size::new(25.0, 10.0));
        let scene = build_scene(&garden, &records, &vp, ViewMode::Bloom, None);

        assert_eq!(scene, Scene::default());
    }
}
