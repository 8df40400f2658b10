//! Simulated rasterization of render plans.
//!
//! Every output pixel is mapped back through the plan's transform to the
//! source document. A pixel whose center lands inside the document is
//! covered; anything else is fill and must be transparent. That makes the
//! alpha decision, the transform and the output size checkable without a
//! real renderer.

use zenfit::*;

/// What a simulated output pixel samples.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Pixel {
    /// Document content at this source position.
    Source(f64, f64),
    /// Not covered by the document.
    Fill,
}

/// Rendered output of a plan.
struct Grid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Grid {
    fn render(plan: &RenderPlan) -> Self {
        let size = plan.output.size();
        let doc = plan.document;
        let mut pixels = Vec::with_capacity((size.width * size.height) as usize);
        for py in 0..size.height {
            for px in 0..size.width {
                let center = (px as f64 + 0.5, py as f64 + 0.5);
                let pixel = match plan.transform.invert(center.0, center.1) {
                    Some((sx, sy)) if sx >= 0.0 && sy >= 0.0 && sx < doc.width && sy < doc.height => {
                        Pixel::Source(sx, sy)
                    }
                    _ => Pixel::Fill,
                };
                pixels.push(pixel);
            }
        }
        Self {
            width: size.width,
            height: size.height,
            pixels,
        }
    }

    fn get(&self, x: u32, y: u32) -> Pixel {
        assert!(
            x < self.width && y < self.height,
            "({x},{y}) out of bounds {}x{}",
            self.width,
            self.height
        );
        self.pixels[(y * self.width + x) as usize]
    }

    fn fill_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p == Pixel::Fill).count()
    }

    /// Apply a pixel crop the way the renderer would.
    fn crop(&self, r: PixelRect) -> Self {
        let mut pixels = Vec::with_capacity((r.width * r.height) as usize);
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                pixels.push(self.get(x, y));
            }
        }
        Self {
            width: r.width,
            height: r.height,
            pixels,
        }
    }
}

fn check_alpha(plan: &RenderPlan) {
    let grid = Grid::render(plan);
    if !plan.needs_alpha {
        assert_eq!(
            grid.fill_count(),
            0,
            "opaque plan has uncovered pixels: {plan:?}"
        );
    }
    if grid.fill_count() > 0 {
        assert!(plan.needs_alpha, "uncovered pixels but no alpha: {plan:?}");
    }
}

// ---- Alpha decision ----

#[test]
fn bbox_inside_document_needs_no_alpha() {
    let plan = Request::new(Extent::new(300.0, 300.0))
        .crop_to_bbox(BoundingBox::new(50.4, 60.8, 200.0, 100.0), None, false)
        .plan();
    assert_eq!(plan.output.size(), Size::new(200, 100));
    assert!(!plan.needs_alpha);
    check_alpha(&plan);
}

#[test]
fn padding_to_document_edge_needs_no_alpha() {
    // Content inset by 10 on a 300×300 document; padding 10 reaches the edge.
    let plan = Request::new(Extent::new(300.0, 300.0))
        .crop_to_bbox(BoundingBox::new(10.0, 10.0, 280.0, 280.0), Some(10.0), false)
        .plan();
    assert_eq!(plan.viewport, CropRect { x: 0.0, y: 0.0, width: 300.0, height: 300.0 });
    assert!(plan.is_full_document());
    assert!(!plan.needs_alpha);
    check_alpha(&plan);
}

#[test]
fn fractional_document_edge_needs_alpha() {
    let plan = Request::new(Extent::new(100.5, 50.0)).plan();
    assert_eq!(plan.output.size(), Size::new(101, 50));
    assert!(plan.needs_alpha);
    let grid = Grid::render(&plan);
    // Column 100 starts at x = 100 and its center lies past the edge.
    assert_eq!(grid.get(100, 0), Pixel::Fill);
    assert!(matches!(grid.get(99, 49), Pixel::Source(..)));
    check_alpha(&plan);

    for w in [100.5, 100.6, 99.75, 320.5] {
        for fit in [FitTo::Original, FitTo::Height(75.0), FitTo::Zoom(1.5)] {
            check_alpha(&Request::new(Extent::new(w, 50.25)).fit_to(fit).plan());
        }
    }
}

#[test]
fn padding_past_document_is_transparent() {
    let plan = Request::new(Extent::new(200.0, 100.0))
        .crop_to_bbox(BoundingBox::new(10.0, 10.0, 180.0, 80.0), Some(30.0), false)
        .plan();
    assert!(plan.needs_alpha);
    let grid = Grid::render(&plan);
    // Corners are outside the document, the center is content.
    assert_eq!(grid.get(0, 0), Pixel::Fill);
    assert_eq!(grid.get(grid.width - 1, grid.height - 1), Pixel::Fill);
    assert!(matches!(grid.get(grid.width / 2, grid.height / 2), Pixel::Source(..)));
    check_alpha(&plan);
}

#[test]
fn square_crop_extends_past_short_side() {
    let plan = Request::new(Extent::new(200.0, 100.0))
        .crop_to_bbox(BoundingBox::new(10.0, 10.0, 180.0, 80.0), Some(0.0), true)
        .fit_to(FitTo::Zoom(2.0))
        .plan();
    assert_eq!(plan.output.size(), Size::new(360, 360));
    let grid = Grid::render(&plan);
    // Top rows fall above the document (y < 0 after squaring).
    assert_eq!(grid.get(180, 0), Pixel::Fill);
    check_alpha(&plan);
}

#[test]
fn alpha_matches_coverage_across_paddings() {
    let bbox = BoundingBox::new(40.0, 20.0, 120.0, 60.0);
    for p in [-5.0, 0.0, 5.0, 19.5, 20.0, 20.5, 40.0] {
        for square in [false, true] {
            for fit in [FitTo::Original, FitTo::Width(150.0), FitTo::Zoom(0.5)] {
                let plan = Request::new(Extent::new(200.0, 100.0))
                    .crop_to_bbox(bbox, Some(p), square)
                    .fit_to(fit)
                    .plan();
                check_alpha(&plan);
            }
        }
    }
}

// ---- Transform ----

#[test]
fn content_corners_land_inside_output() {
    let bbox = BoundingBox::new(37.0, 12.5, 100.0, 50.0);
    for p in [0.0, 10.0, 25.0] {
        for fit in [
            FitTo::Original,
            FitTo::Width(300.0),
            FitTo::Height(120.0),
            FitTo::Zoom(1.5),
        ] {
            let plan = Request::new(Extent::new(300.0, 150.0))
                .crop_to_bbox(bbox, Some(p), false)
                .fit_to(fit)
                .plan();
            let (x0, y0) = plan.transform.apply(bbox.x, bbox.y);
            let (x1, y1) = plan.transform.apply(bbox.right(), bbox.bottom());
            let (w, h) = (plan.output.width as f64, plan.output.height as f64);
            assert!(x0 >= -1e-9 && y0 >= -1e-9, "{fit:?} p={p}: ({x0},{y0})");
            assert!(x1 <= w + 0.5 && y1 <= h + 0.5, "{fit:?} p={p}: ({x1},{y1}) in {w}x{h}");
        }
    }
}

#[test]
fn samples_match_viewport_origin() {
    let plan = Request::new(Extent::new(300.0, 300.0))
        .crop_to_bbox(BoundingBox::new(50.0, 60.0, 200.0, 100.0), None, false)
        .fit_to(FitTo::Zoom(2.0))
        .plan();
    let grid = Grid::render(&plan);
    // First output pixel center (0.5, 0.5) maps to source (50.25, 60.25).
    assert_eq!(grid.get(0, 0), Pixel::Source(50.25, 60.25));
}

// ---- Output crop ----

#[test]
fn output_crop_keeps_requested_region() {
    let plan = Request::new(Extent::new(200.0, 100.0))
        .fit_to(FitTo::Width(400.0))
        .output_crop(OutputCrop::ltrb(100, 50, 300, 150))
        .plan();
    let full = Grid::render(&plan);
    let rect = plan.output_crop.expect("crop applies");
    let cropped = full.crop(rect);
    assert_eq!(Size::new(cropped.width, cropped.height), plan.final_size());
    assert_eq!(cropped.get(0, 0), full.get(100, 50));
    assert_eq!(cropped.fill_count(), 0);
}

// ---- Degenerate input ----

#[test]
fn degenerate_plans_render_empty() {
    let doc = Extent::new(300.0, 300.0);
    let cases = [
        (BoundingBox::new(50.0, 50.0, 0.0, 200.0), FitTo::Original),
        (BoundingBox::new(50.0, 50.0, -10.0, 200.0), FitTo::Width(500.0)),
        (BoundingBox::new(f64::NAN, 0.0, f64::NAN, 10.0), FitTo::Zoom(2.0)),
        (BoundingBox::new(50.0, 50.0, 200.0, 200.0), FitTo::Zoom(0.0)),
        (BoundingBox::new(50.0, 50.0, 200.0, 200.0), FitTo::Height(-1.0)),
    ];
    for (bbox, fit) in cases {
        let plan = Request::new(doc).crop_to_bbox(bbox, None, false).fit_to(fit).plan();
        assert_eq!(plan.output.size(), Size::new(0, 0), "{bbox:?} {fit:?}");
        assert!(plan.needs_alpha);
        assert_eq!(Grid::render(&plan).pixels.len(), 0);
    }
}
