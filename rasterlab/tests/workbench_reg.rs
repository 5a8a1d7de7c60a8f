//! Workbench regression test
//!
//! Drives operations through [`ParamOp`] the way a parameter slider does,
//! and chains crates through the facade.

use rasterlab::color::threshold_otsu;
use rasterlab::filter::{CannyOptions, canny, gaussian_filter};
use rasterlab::morph::thin_zhang_suen;
use rasterlab::region::{ConnectivityType, label_components};
use rasterlab::{Error, GrayImage, Image, ImageKind, ParamOp, op::builtin};
use rasterlab_test::{RegParams, synthetic};

#[test]
fn workbench_reg_sweep() {
    let mut rp = RegParams::new("workbench_sweep");

    // -----------------------------------------------------------
    // Threshold sweep: foreground shrinks as the level rises
    // -----------------------------------------------------------
    let pixs = synthetic::horizontal_gradient(256, 4).unwrap();
    let op = ParamOp::GrayToGray(builtin::threshold);
    let results = op
        .sweep(&Image::Gray(pixs.clone()), [0.0, 63.0, 127.0, 191.0, 255.0])
        .expect("threshold sweep");
    rp.compare_values(5.0, results.len() as f64, 0.0);
    let counts: Vec<usize> = results
        .iter()
        .map(|(_, img)| img.as_gray().map_or(0, |g| g.count_nonzero()))
        .collect();
    rp.compare_values(255.0 * 4.0, counts[0] as f64, 0.0);
    rp.compare_values(0.0, counts[4] as f64, 0.0);
    let monotone = counts.windows(2).all(|w| w[0] >= w[1]);
    rp.compare_values(1.0, if monotone { 1.0 } else { 0.0 }, 0.0);

    // Parameters come back in order
    rp.compare_values(127.0, results[2].0, 0.0);

    // -----------------------------------------------------------
    // Errors from the underlying crate surface unchanged
    // -----------------------------------------------------------
    let even = ParamOp::GrayToGray(builtin::mean).apply(&Image::Gray(pixs.clone()), 4.0);
    rp.compare_values(1.0, if matches!(even, Err(Error::Filter(_))) { 1.0 } else { 0.0 }, 0.0);
    let frac = ParamOp::GrayToGray(builtin::mean).apply(&Image::Gray(pixs.clone()), 2.5);
    let is_param = matches!(frac, Err(Error::InvalidParameter(_)));
    rp.compare_values(1.0, if is_param { 1.0 } else { 0.0 }, 0.0);

    let huge = ParamOp::GrayToGray(builtin::gaussian).apply(&Image::Gray(pixs.clone()), 20000.0);
    rp.compare_values(1.0, if matches!(huge, Err(Error::Filter(_))) { 1.0 } else { 0.0 }, 0.0);

    // A failing value stops the sweep
    let swept = ParamOp::GrayToGray(builtin::gaussian).sweep(&Image::Gray(pixs), [1.0, -1.0]);
    rp.compare_values(1.0, if swept.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "workbench sweep regression test failed");
}

#[test]
fn workbench_reg_kinds() {
    let mut rp = RegParams::new("workbench_kinds");
    let blocks = synthetic::color_blocks(40, 40).unwrap();
    let image = Image::Color(blocks);

    // Color -> gray: only the red quadrant is near red
    let red = ParamOp::ColorToGray(builtin::near_red)
        .apply(&image, 10.0)
        .expect("near_red");
    let red = red.as_gray().cloned().unwrap_or_else(|| GrayImage::new(1, 1).unwrap());
    rp.compare_values(400.0, red.count_nonzero() as f64, 0.0);
    rp.compare_values(255.0, red.value(5, 30) as f64, 0.0);

    // Color -> color keeps the kind and scales the size
    let big = ParamOp::ColorToColor(builtin::scale_color)
        .apply(&image, 1.5)
        .unwrap();
    rp.compare_values(1.0, if big.kind() == ImageKind::Color { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(60.0, big.dimensions().0 as f64, 0.0);

    // Gray -> color: two blobs, two colors
    let blobs = synthetic::filled_rect(40, 20, 2, 2, 10, 10, 200, 0).unwrap();
    let blobs = GrayImage::from_fn(40, 20, |x, y| {
        [if (25..35).contains(&x) && (5..15).contains(&y) { 200 } else { blobs.value(x, y) }]
    })
    .unwrap();
    let colored = ParamOp::GrayToColor(builtin::components)
        .apply(&Image::Gray(blobs), 100.0)
        .unwrap();
    let colored = colored.as_color().unwrap();
    rp.compare_values(1.0, if colored.pixel(0, 0) == [0, 0, 0] { 1.0 } else { 0.0 }, 0.0);
    let differ = colored.pixel(5, 5) != colored.pixel(30, 10);
    rp.compare_values(1.0, if differ { 1.0 } else { 0.0 }, 0.0);

    // Wrong input kind
    let wrong = ParamOp::GrayToGray(builtin::sobel).apply(&image, 100.0);
    let mismatch = matches!(
        wrong,
        Err(Error::KindMismatch {
            expected: ImageKind::Gray,
            actual: ImageKind::Color
        })
    );
    rp.compare_values(1.0, if mismatch { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "workbench kinds regression test failed");
}

#[test]
fn workbench_reg_pipeline() {
    let mut rp = RegParams::new("workbench_pipeline");

    // Smooth -> Canny -> thin -> label: a square outline is one component
    let pixs = synthetic::filled_rect(48, 48, 12, 12, 36, 36, 210, 30).unwrap();
    let smoothed = gaussian_filter(&pixs, 1.0).expect("gaussian");
    let edges = canny(&smoothed, &CannyOptions::default()).expect("canny");
    rp.compare_values(1.0, if edges.count_nonzero() > 0 { 1.0 } else { 0.0 }, 0.0);
    let thin = thin_zhang_suen(&edges).expect("thin");
    rp.compare_values(
        1.0,
        if thin.count_nonzero() <= edges.count_nonzero() { 1.0 } else { 0.0 },
        0.0,
    );
    let labels = label_components(&edges, ConnectivityType::EightWay).expect("label");
    rp.compare_values(1.0, labels.count() as f64, 0.0);

    // Otsu on two flat levels keeps them apart
    let otsu = threshold_otsu(&pixs).expect("otsu");
    rp.compare_values(1.0, if otsu.value(0, 0) < otsu.value(24, 24) { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "workbench pipeline regression test failed");
}
