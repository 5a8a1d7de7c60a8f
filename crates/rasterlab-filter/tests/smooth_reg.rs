//! Smoothing filter regression test
//!
//! Mean, Gaussian, bilateral and Kuwahara filters on synthetic images.

use rasterlab_core::{ColorImage, GrayImage};
use rasterlab_filter::{
    BilateralOptions, FilterError, bilateral_filter, fast_median_filter, gaussian_filter,
    kuwahara_filter, mean_filter, median_filter, vector_median_filter,
};
use rasterlab_test::{RegParams, synthetic};

#[test]
fn smooth_reg_mean() {
    let mut rp = RegParams::new("smooth_mean");

    // Mask size 1 is the identity
    let pixs = synthetic::bimodal(37, 23, 60, 190, 40, 11).unwrap();
    let out = mean_filter(&pixs, 1).expect("mean_filter");
    rp.compare_rasters(&pixs, &out);

    // 4x4 all-128 with mask 3 stays 128
    let flat = synthetic::uniform(4, 4, 128).unwrap();
    let out = mean_filter(&flat, 3).expect("mean_filter");
    rp.compare_rasters(&flat, &out);

    // Output keeps its size for every mask
    for mask in [3, 5, 9, 15] {
        let out = mean_filter(&pixs, mask).expect("mean_filter");
        rp.compare_values(37.0, out.width() as f64, 0.0);
        rp.compare_values(23.0, out.height() as f64, 0.0);
    }

    // Smoothing reduces the spread of noisy regions
    let out = mean_filter(&pixs, 5).unwrap();
    let (lo, hi) = out.crop(2, 2, 16, 21).unwrap().min_max();
    rp.compare_values(1.0, if hi - lo < 60 { 1.0 } else { 0.0 }, 0.0);

    // Even mask is rejected
    rp.compare_values(1.0, if mean_filter(&pixs, 4).is_err() { 1.0 } else { 0.0 }, 0.0);

    // Color per channel
    let color = synthetic::color_blocks(16, 16).unwrap();
    let out = mean_filter(&color, 3).unwrap();
    rp.compare_strings(&out.pixel(2, 2), &[255, 0, 0]);
    rp.compare_strings(&out.pixel(13, 13), &[255, 255, 255]);

    assert!(rp.cleanup(), "smooth_reg mean tests failed");
}

#[test]
fn smooth_reg_gaussian() {
    let mut rp = RegParams::new("smooth_gaussian");

    let flat = synthetic::uniform(12, 12, 200).unwrap();
    for variance in [0.5, 1.0, 2.0] {
        let out = gaussian_filter(&flat, variance).expect("gaussian_filter");
        rp.compare_rasters(&flat, &out);
    }

    // A step gets a monotone ramp across the edge
    let step = synthetic::step_edge(20, 4, 10, 0, 200).unwrap();
    let out = gaussian_filter(&step, 1.0).unwrap();
    let row: Vec<u8> = (0..20).map(|x| out.value(x, 1)).collect();
    let monotone = row.windows(2).all(|p| p[0] <= p[1]);
    rp.compare_values(1.0, if monotone { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, row[0] as f64, 0.0);
    rp.compare_values(200.0, row[19] as f64, 0.0);

    let bad = gaussian_filter(&step, 0.0);
    rp.compare_values(1.0, if bad.is_err() { 1.0 } else { 0.0 }, 0.0);

    // A huge variance is a kernel error, not an overflow
    let small = synthetic::uniform(3, 3, 50).unwrap();
    let huge = gaussian_filter(&small, 20000.0);
    let is_kernel = matches!(huge, Err(FilterError::InvalidKernel(_)));
    rp.compare_values(1.0, if is_kernel { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "smooth_reg gaussian tests failed");
}

#[test]
fn smooth_reg_edge_preserving() {
    let mut rp = RegParams::new("smooth_edge_preserving");

    let step = synthetic::step_edge(24, 8, 12, 30, 220).unwrap();

    let opts = BilateralOptions::default().with_variance_r(15.0);
    let out = bilateral_filter(&step, &opts).expect("bilateral_filter");
    rp.compare_rasters(&step, &out);

    let out = kuwahara_filter(&step).expect("kuwahara_filter");
    rp.compare_rasters(&step, &out);

    // Kuwahara on color keeps flat quadrants flat
    let color: ColorImage = synthetic::color_blocks(12, 12).unwrap();
    let out = kuwahara_filter(&color).unwrap();
    rp.compare_strings(&out.pixel(1, 1), &color.pixel(1, 1));
    rp.compare_strings(&out.pixel(10, 10), &color.pixel(10, 10));

    // Gaussian blurs the same step
    let blurred: GrayImage = rasterlab_filter::gaussian_filter(&step, 2.0).unwrap();
    rp.compare_values(1.0, if blurred != step { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "smooth_reg edge preserving tests failed");
}

#[test]
fn smooth_reg_oversized_masks() {
    let mut rp = RegParams::new("smooth_oversized");

    // Windows whose area overflows u32 are rejected up front
    let pixs = synthetic::uniform(3, 3, 50).unwrap();
    let color = synthetic::to_color(&pixs);
    for mask in [65537, 70001] {
        let rejected = [
            mean_filter(&pixs, mask).is_err(),
            median_filter(&pixs, mask).is_err(),
            fast_median_filter(&pixs, mask).is_err(),
            vector_median_filter(&color, mask).is_err(),
        ];
        let all = rejected.iter().all(|&r| r);
        rp.compare_values(1.0, if all { 1.0 } else { 0.0 }, 0.0);
    }

    // A mask larger than the image is still fine
    let out = mean_filter(&pixs, 7).expect("mean_filter");
    rp.compare_rasters(&pixs, &out);

    assert!(rp.cleanup(), "smooth_reg oversized mask tests failed");
}
