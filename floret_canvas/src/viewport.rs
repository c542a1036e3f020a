// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Fraction of the view the fitted garden rectangle may occupy.
///
/// The remaining 10% is margin, split evenly by the centering offsets.
pub const FIT_MARGIN: f64 = 0.9;

/// Per-draw mapping between garden space (feet) and view space (pixels).
///
/// The transform is a uniform scale plus a centering translation:
/// `scale = min(view_w / garden_w, view_h / garden_len) * 0.9`, then offsets
/// so the garden rectangle is centered in the view. Both directions are kept
/// as affines, so conversions are exact inverses of each other.
///
/// A viewport is cheap to build and is meant to be rebuilt for every draw;
/// garden dimensions can change between draws and the transform must never
/// be cached across such edits.
#[derive(Clone, Debug)]
pub struct PlanViewport {
    garden: Size,
    scale: f64,
    to_view: Affine,
    to_garden: Affine,
}

impl PlanViewport {
    /// Fits `garden` (in feet) into `view` (in pixels).
    ///
    /// Degenerate inputs (a view or garden with a non-positive or non-finite
    /// extent) yield a viewport with zero scale; see
    /// [`is_degenerate`](Self::is_degenerate). Conversions through such a
    /// viewport are not meaningful and scene construction produces nothing.
    #[must_use]
    pub fn fit(view: Size, garden: Size) -> Self {
        let usable = view.width > 0.0
            && view.height > 0.0
            && garden.width > 0.0
            && garden.height > 0.0
            && view.is_finite()
            && garden.is_finite();
        if !usable {
            return Self {
                garden,
                scale: 0.0,
                to_view: Affine::IDENTITY,
                to_garden: Affine::IDENTITY,
            };
        }

        let scale = (view.width / garden.width).min(view.height / garden.height) * FIT_MARGIN;
        let offset = Vec2::new(
            (view.width - garden.width * scale) / 2.0,
            (view.height - garden.height * scale) / 2.0,
        );
        let to_view = Affine::translate(offset) * Affine::scale(scale);
        Self {
            garden,
            scale,
            to_view,
            to_garden: to_view.inverse(),
        }
    }

    /// Returns `true` when the inputs could not produce a usable transform.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.scale <= 0.0
    }

    /// Pixels per foot of the fitted transform.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The garden extents this viewport was built for, in feet.
    #[must_use]
    pub fn garden_size(&self) -> Size {
        self.garden
    }

    /// The garden rectangle in view coordinates.
    #[must_use]
    pub fn garden_rect(&self) -> Rect {
        let origin = self.garden_to_view(Point::ORIGIN);
        let far = self.garden_to_view(Point::new(self.garden.width, self.garden.height));
        Rect::new(origin.x, origin.y, far.x, far.y)
    }

    /// Converts a garden-space point (feet) into view coordinates (pixels).
    #[must_use]
    pub fn garden_to_view(&self, pt: Point) -> Point {
        self.to_view * pt
    }

    /// Converts a view-space point (pixels) into garden coordinates (feet).
    #[must_use]
    pub fn view_to_garden(&self, pt: Point) -> Point {
        self.to_garden * pt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_uses_the_tighter_axis_with_margin() {
        // 800/25 = 32 px/ft, 600/10 = 60 px/ft; width is the tighter axis.
        let vp = PlanViewport::fit(Size::new(800.0, 600.0), Size::new(25.0, 10.0));
        assert!((vp.scale() - 32.0 * FIT_MARGIN).abs() < 1e-12);
    }

    #[test]
    fn garden_rect_is_centered_in_the_view() {
        let view = Size::new(800.0, 600.0);
        let vp = PlanViewport::fit(view, Size::new(25.0, 10.0));
        let rect = vp.garden_rect();

        let left = rect.x0;
        let right = view.width - rect.x1;
        let top = rect.y0;
        let bottom = view.height - rect.y1;
        assert!((left - right).abs() < 1e-9);
        assert!((top - bottom).abs() < 1e-9);
        assert!(left >= 0.0 && top >= 0.0);
    }

    #[test]
    fn round_trip_within_tolerance() {
        let vp = PlanViewport::fit(Size::new(640.0, 480.0), Size::new(25.0, 10.0));
        for &(x, y) in &[(0.0, 0.0), (12.5, 5.0), (25.0, 10.0), (3.7, 9.99)] {
            let garden = Point::new(x, y);
            let back = vp.view_to_garden(vp.garden_to_view(garden));
            assert!((back.x - garden.x).abs() < 1e-9);
            assert!((back.y - garden.y).abs() < 1e-9);
        }
    }

    #[test]
    fn transforms_are_mutual_inverses_from_the_view_side() {
        let vp = PlanViewport::fit(Size::new(300.0, 500.0), Size::new(8.0, 14.0));
        let view_pt = Point::new(150.0, 250.0);
        let back = vp.garden_to_view(vp.view_to_garden(view_pt));
        assert!((back.x - view_pt.x).abs() < 1e-9);
        assert!((back.y - view_pt.y).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_are_flagged() {
        assert!(PlanViewport::fit(Size::new(0.0, 600.0), Size::new(25.0, 10.0)).is_degenerate());
        assert!(PlanViewport::fit(Size::new(800.0, 600.0), Size::new(0.0, 10.0)).is_degenerate());
        assert!(
            PlanViewport::fit(Size::new(800.0, 600.0), Size::new(f64::NAN, 10.0)).is_degenerate()
        );
        assert!(!PlanViewport::fit(Size::new(800.0, 600.0), Size::new(25.0, 10.0)).is_degenerate());
    }
}
