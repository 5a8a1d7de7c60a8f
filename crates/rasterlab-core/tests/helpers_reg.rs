//! Helper utilities regression test
//!
//! Tests integral images, histograms, lookup tables and the disjoint set.

use rasterlab_core::{DisjointSet, Histogram, IntegralImage, Lut};
use rasterlab_test::{RegParams, synthetic};

#[test]
fn helpers_reg_integral_mean() {
    let mut rp = RegParams::new("helpers_integral");

    for seed in 0..4 {
        let img = synthetic::bimodal(31, 19, 40, 180, 30, seed).unwrap();
        let ii = IntegralImage::new(&img, 0).unwrap();
        let direct = img.data().iter().map(|&v| v as f64).sum::<f64>() / img.data().len() as f64;
        let mean = ii.mean_area(0, 0, 30, 18).unwrap();
        rp.compare_values(direct, mean, 1e-9);
    }

    let img = synthetic::filled_rect(20, 20, 5, 5, 10, 10, 255, 0).unwrap();
    let ii = IntegralImage::new(&img, 0).unwrap();
    rp.compare_values(25.0 * 255.0, ii.sum_area(5, 5, 9, 9).unwrap() as f64, 0.0);
    rp.compare_values(25.0 * 255.0, ii.sum_area(0, 0, 19, 19).unwrap() as f64, 0.0);
    rp.compare_values(0.0, ii.sum_area(10, 10, 19, 19).unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "helpers_reg integral tests failed");
}

#[test]
fn helpers_reg_histogram() {
    let mut rp = RegParams::new("helpers_histogram");

    let img = synthetic::step_edge(10, 10, 3, 20, 220).unwrap();
    let hist = Histogram::from_gray(&img);
    rp.compare_values(100.0, hist.total() as f64, 0.0);
    rp.compare_values(30.0, hist.count(20) as f64, 0.0);
    rp.compare_values(20.0 * 0.3 + 220.0 * 0.7, hist.mean().unwrap(), 1e-9);
    rp.compare_values(220.0, hist.quantile_level(1.0).unwrap() as f64, 0.0);
    rp.compare_values(20.0, hist.quantile_level(0.3).unwrap() as f64, 0.0);
    rp.compare_values(220.0, hist.quantile_level(0.31).unwrap() as f64, 0.0);
    rp.compare_values(1.0, hist.cumulative_relative()[255], 1e-12);

    assert!(rp.cleanup(), "helpers_reg histogram tests failed");
}

#[test]
fn helpers_reg_lut() {
    let mut rp = RegParams::new("helpers_lut");

    let img = synthetic::horizontal_gradient(256, 1).unwrap();
    let neg = Lut::negate().apply(&img);
    rp.compare_values(255.0, neg.value(0, 0) as f64, 0.0);
    rp.compare_values(0.0, neg.value(255, 0) as f64, 0.0);

    let thresh = Lut::threshold(127).apply(&img);
    rp.compare_values(128.0, thresh.count_nonzero() as f64, 0.0);

    let color = synthetic::color_blocks(4, 4).unwrap();
    let inv = Lut::negate().apply(&color);
    rp.compare_strings(&inv.pixel(0, 0), &[0, 255, 255]);

    assert!(rp.cleanup(), "helpers_reg lut tests failed");
}

#[test]
fn helpers_reg_disjoint_set() {
    let mut rp = RegParams::new("helpers_disjoint_set");

    let mut ds = DisjointSet::new();
    let labels: Vec<u32> = (0..10).map(|_| ds.make_set()).collect();
    // Two chains: even labels and odd labels
    for w in labels.chunks(2).collect::<Vec<_>>().windows(2) {
        ds.union(w[0][0], w[1][0]);
        ds.union(w[0][1], w[1][1]);
    }
    let even_root = ds.find_set(labels[0]);
    let odd_root = ds.find_set(labels[1]);
    rp.compare_values(1.0, if even_root != odd_root { 1.0 } else { 0.0 }, 0.0);
    for (i, &l) in labels.iter().enumerate() {
        let expected = if i % 2 == 0 { even_root } else { odd_root };
        rp.compare_values(expected as f64, ds.find_set(l) as f64, 0.0);
    }

    assert!(rp.cleanup(), "helpers_reg disjoint set tests failed");
}
