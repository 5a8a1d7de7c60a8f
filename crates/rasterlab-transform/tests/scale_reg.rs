//! Scale and rotate regression test
//!
//! Checks round trips that must reproduce the input: 2x up then 0.5x
//! down, a full turn, and four quarter turns.

use rasterlab_core::GrayImage;
use rasterlab_test::{RegParams, synthetic};
use rasterlab_transform::{TransformError, rotate, scale, scale_to_size};

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    // -----------------------------------------------------------
    // Up then down by the same factor is lossless
    // -----------------------------------------------------------
    let pixs = synthetic::horizontal_gradient(20, 12).unwrap();
    let up = scale(&pixs, 2.0, 2.0).expect("scale up");
    rp.compare_values(40.0, up.width() as f64, 0.0);
    rp.compare_values(24.0, up.height() as f64, 0.0);
    let down = scale(&up, 0.5, 0.5).expect("scale down");
    rp.compare_rasters(&pixs, &down);

    // Interpolated samples lie between their neighbours
    let (a, b) = (pixs.value(3, 0), pixs.value(4, 0));
    let mid = up.value(7, 0);
    rp.compare_values(1.0, if a <= mid && mid <= b { 1.0 } else { 0.0 }, 0.0);

    // -----------------------------------------------------------
    // Color: channels are scaled independently
    // -----------------------------------------------------------
    let blocks = synthetic::color_blocks(20, 20).unwrap();
    let big = scale_to_size(&blocks, 40, 40).expect("scale_to_size");
    rp.compare_values(1.0, if big.pixel(5, 5) == [255, 0, 0] { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if big.pixel(35, 5) == [0, 255, 0] { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if big.pixel(5, 35) == [0, 0, 255] { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if big.pixel(39, 39) == [255, 255, 255] { 1.0 } else { 0.0 }, 0.0);

    // -----------------------------------------------------------
    // Invalid factors
    // -----------------------------------------------------------
    let bad = matches!(scale(&pixs, 0.0, 1.0), Err(TransformError::InvalidScaleFactor(_)));
    rp.compare_values(1.0, if bad { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "scale regression test failed");
}

#[test]
fn rotate_reg() {
    let mut rp = RegParams::new("rotate");

    // A full turn is the identity within interpolation tolerance
    let pixs = GrayImage::from_fn(31, 17, |x, y| [((x * 7 + y * 3) % 256) as u8]).unwrap();
    let full = rotate(&pixs, 360.0).expect("rotate 360");
    rp.compare_rasters_within(&pixs, &full, 1.0, 0.0);

    let blocks = synthetic::color_blocks(24, 24).unwrap();
    let full = rotate(&blocks, 360.0).unwrap();
    rp.compare_rasters_within(&blocks, &full, 1.0, 0.0);

    // Four quarter turns on a square image
    let square = synthetic::checkerboard(21, 21, 3, 40, 220).unwrap();
    let mut turned = square.clone();
    for _ in 0..4 {
        turned = rotate(&turned, 90.0).unwrap();
    }
    rp.compare_rasters_within(&square, &turned, 1.0, 0.0);

    // Corners that rotate in from outside are black
    let white = synthetic::uniform(21, 21, 255).unwrap();
    let tilted = rotate(&white, 30.0).unwrap();
    rp.compare_values(0.0, tilted.value(0, 0) as f64, 0.0);
    rp.compare_values(255.0, tilted.value(10, 10) as f64, 0.0);

    assert!(rp.cleanup(), "rotate regression test failed");
}
