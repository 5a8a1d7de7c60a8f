//! Rank filter regression test
//!
//! Median, fast median and vector median on synthetic noise.

use rasterlab_core::ColorImage;
use rasterlab_filter::{fast_median_filter, median_filter, vector_median_filter};
use rasterlab_test::{RegParams, synthetic};

#[test]
fn rank_reg_fast_median_matches_naive() {
    let mut rp = RegParams::new("rank_fast_median");

    for (seed, (w, h)) in [(1u64, (31, 17)), (2, (8, 40)), (3, (2, 2)), (4, (50, 3))] {
        let pixs = synthetic::bimodal(w, h, 40, 210, 60, seed).unwrap();
        for mask in [1, 3, 5, 7] {
            let naive = median_filter(&pixs, mask).expect("median_filter");
            let fast = fast_median_filter(&pixs, mask).expect("fast_median_filter");
            rp.compare_rasters(&naive, &fast);
        }
    }

    // Per-channel on color
    let color = synthetic::to_color(&synthetic::bimodal(20, 20, 10, 240, 15, 9).unwrap());
    let naive = median_filter(&color, 5).unwrap();
    let fast = fast_median_filter(&color, 5).unwrap();
    rp.compare_rasters(&naive, &fast);

    assert!(rp.cleanup(), "rank_reg fast median tests failed");
}

#[test]
fn rank_reg_salt_and_pepper() {
    let mut rp = RegParams::new("rank_salt_pepper");

    let mut pixs = synthetic::uniform(15, 15, 100).unwrap();
    for (x, y) in [(3, 3), (7, 2), (11, 11), (0, 14)] {
        pixs.set_value(x, y, 255);
    }
    pixs.set_value(5, 9, 0);
    let clean = synthetic::uniform(15, 15, 100).unwrap();
    rp.compare_rasters(&clean, &median_filter(&pixs, 3).unwrap());
    rp.compare_rasters(&clean, &fast_median_filter(&pixs, 3).unwrap());

    let mut color = ColorImage::new_with_value(9, 9, [20, 120, 220]).unwrap();
    color.set_pixel(4, 4, [255, 255, 0]);
    color.set_pixel(0, 0, [0, 0, 0]);
    let out = vector_median_filter(&color, 3).expect("vector_median_filter");
    let expected = ColorImage::new_with_value(9, 9, [20, 120, 220]).unwrap();
    rp.compare_rasters(&expected, &out);

    assert!(rp.cleanup(), "rank_reg salt and pepper tests failed");
}
