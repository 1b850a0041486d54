mod common;

use approx::assert_abs_diff_eq;

use common::{gradient_image, solid_image};
use framecrop_core::config::OutputSpec;
use framecrop_core::error::CropError;
use framecrop_core::io::{ImageCrateEncoder, Quality, SourceImage};
use framecrop_core::raster::{bilinear_rgba, export, rasterize, source_rect, SourceRect};
use framecrop_core::viewport::{
    ClampPolicy, FrameSize, GestureController, ImageSize, Point, PointerId, ViewportState,
};

// ---------------------------------------------------------------------------
// Source rect
// ---------------------------------------------------------------------------

#[test]
fn test_source_rect_at_cover_scale() {
    let r = source_rect(&ViewportState::new(0.5, 0.0, 0.0), FrameSize::new(800.0, 450.0));
    assert_abs_diff_eq!(r.x, 0.0);
    assert_abs_diff_eq!(r.y, 0.0);
    assert_abs_diff_eq!(r.width, 1600.0);
    assert_abs_diff_eq!(r.height, 900.0);
}

#[test]
fn test_source_rect_zoomed_and_panned() {
    let r = source_rect(
        &ViewportState::new(2.0, -300.0, -100.0),
        FrameSize::new(640.0, 360.0),
    );
    assert_abs_diff_eq!(r.x, 150.0);
    assert_abs_diff_eq!(r.y, 50.0);
    assert_abs_diff_eq!(r.width, 320.0);
    assert_abs_diff_eq!(r.height, 180.0);
}

// ---------------------------------------------------------------------------
// Rasterize
// ---------------------------------------------------------------------------

#[test]
fn test_rasterize_output_size_is_exact() {
    let src = gradient_image(97, 53);
    for (w, h) in [(800, 450), (1, 1), (33, 17), (400, 400)] {
        let rect = SourceRect {
            x: 3.7,
            y: 1.2,
            width: 61.3,
            height: 40.9,
        };
        let out = rasterize(&src, &rect, OutputSpec::new(w, h)).expect("rasterize");
        assert_eq!(out.dimensions(), (w, h));
    }
}

#[test]
fn test_rasterize_identity_copies_pixels() {
    let src = gradient_image(8, 8);
    let rect = SourceRect {
        x: 0.0,
        y: 0.0,
        width: 8.0,
        height: 8.0,
    };
    let out = rasterize(&src, &rect, OutputSpec::new(8, 8)).expect("rasterize");
    assert_eq!(out.as_raw(), src.as_raw());
}

#[test]
fn test_rasterize_solid_stays_solid() {
    let src = solid_image(40, 30, [10, 200, 30, 255]);
    let rect = SourceRect {
        x: 5.0,
        y: 5.0,
        width: 20.0,
        height: 11.25,
    };
    let out = rasterize(&src, &rect, OutputSpec::new(160, 90)).expect("rasterize");
    assert!(out.pixels().all(|p| p.0 == [10, 200, 30, 255]));
}

#[test]
fn test_rasterize_parallel_path_matches_direct_sampling() {
    // 400x300 is above the parallel threshold.
    let src = gradient_image(123, 77);
    let rect = SourceRect {
        x: 10.0,
        y: 5.0,
        width: 100.0,
        height: 75.0,
    };
    let out = rasterize(&src, &rect, OutputSpec::new(400, 300)).expect("rasterize");
    let step_x = rect.width / 400.0;
    let step_y = rect.height / 300.0;
    for (x, y) in [(0u32, 0u32), (399, 299), (200, 150), (17, 250)] {
        let sx = rect.x + (x as f64 + 0.5) * step_x - 0.5;
        let sy = rect.y + (y as f64 + 0.5) * step_y - 0.5;
        assert_eq!(out.get_pixel(x, y).0, bilinear_rgba(&src, sx, sy));
    }
}

#[test]
fn test_bilinear_midpoint_blends() {
    let mut src = solid_image(2, 1, [0, 0, 0, 255]);
    src.put_pixel(1, 0, image::Rgba([200, 100, 50, 255]));
    assert_eq!(bilinear_rgba(&src, 0.5, 0.0), [100, 50, 25, 255]);
}

#[test]
fn test_bilinear_clamps_outside_edges() {
    let src = gradient_image(10, 10);
    assert_eq!(bilinear_rgba(&src, -5.0, -5.0), src.get_pixel(0, 0).0);
    assert_eq!(bilinear_rgba(&src, 50.0, 50.0), src.get_pixel(9, 9).0);
}

#[test]
fn test_rasterize_zero_output_is_canvas_unavailable() {
    let src = gradient_image(10, 10);
    let rect = SourceRect {
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 10.0,
    };
    for spec in [OutputSpec::new(0, 450), OutputSpec::new(800, 0)] {
        match rasterize(&src, &rect, spec) {
            Err(CropError::CanvasUnavailable(_)) => {}
            other => panic!("expected CanvasUnavailable, got {other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn test_export_fixed_size_webp() {
    let image = SourceImage::new("photo.jpg", gradient_image(1600, 900));
    let result = export(
        &ViewportState::new(0.5, 0.0, 0.0),
        FrameSize::new(800.0, 450.0),
        &image,
        OutputSpec::new(800, 450),
        Quality::new(0.82),
        &ImageCrateEncoder,
    )
    .expect("export");

    assert_eq!(result.content_type, "image/webp");
    assert_eq!(result.filename, "photo.webp");
    assert_eq!((result.width, result.height), (800, 450));
    let decoded = image::load_from_memory(&result.data).expect("decode export");
    assert_eq!((decoded.width(), decoded.height()), (800, 450));
}

#[test]
fn test_export_size_is_exact_for_any_legal_view() {
    let frame = FrameSize::new(320.0, 180.0);
    let output = OutputSpec::new(160, 90);
    let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % 10_000) as f64 / 10_000.0
    };

    for (iw, ih) in [(1600, 900), (333, 777), (100, 50), (4000, 181)] {
        let image = SourceImage::new("sweep.png", gradient_image(iw, ih));
        let policy = ClampPolicy::new(ImageSize::new(iw, ih), frame, 3.0);
        let mut g = GestureController::new(policy, 0.05);

        for step in 0..12 {
            let pivot = Point::new(next() * frame.width, next() * frame.height);
            g.zoom_at(pivot, next() * 4.0);
            g.begin_drag(PointerId(1), pivot);
            g.continue_drag(
                PointerId(1),
                Point::new(pivot.x + next() * 800.0 - 400.0, pivot.y + next() * 800.0 - 400.0),
            );
            g.end_drag();

            let state = g.state();
            assert!(g.policy().is_legal(&state), "{state:?}");
            let result = export(&state, frame, &image, output, Quality::new(0.82), &ImageCrateEncoder)
                .unwrap_or_else(|e| panic!("{iw}x{ih} step {step}: {e}"));
            assert_eq!((result.width, result.height), (160, 90));
            let decoded = image::load_from_memory(&result.data).expect("decode export");
            assert_eq!((decoded.width(), decoded.height()), (160, 90));
        }
    }
}

#[test]
fn test_export_zoomed_region_matches_source() {
    // 2x zoom on a solid-quadrant image: top-left quadrant only.
    let mut src = solid_image(200, 100, [0, 0, 255, 255]);
    for y in 0..50 {
        for x in 0..100 {
            src.put_pixel(x, y, image::Rgba([255, 0, 0, 255]));
        }
    }
    let image = SourceImage::new("quad.png", src);
    let result = export(
        &ViewportState::new(2.0, 0.0, 0.0),
        FrameSize::new(200.0, 100.0),
        &image,
        OutputSpec::new(80, 40),
        Quality::new(0.82),
        &ImageCrateEncoder,
    )
    .expect("export");
    let decoded = image::load_from_memory(&result.data).expect("decode").to_rgba8();
    assert_eq!(decoded.dimensions(), (80, 40));
    // Lossy encode: allow small codec drift around pure red.
    assert!(decoded
        .pixels()
        .all(|p| p.0[0] >= 240 && p.0[1] <= 16 && p.0[2] <= 16 && p.0[3] == 255));
}
