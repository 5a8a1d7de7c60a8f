//! rasterlab-region - Region analysis for binary images
//!
//! This crate provides:
//!
//! - **Connected component labeling** ([`conncomp`]) - single-scan
//!   union-find labeling with random-color rendering
//! - **Hough transforms** ([`hough`]) - line accumulators over two or three
//!   quadrants and fixed-radius circle accumulators
//!
//! # Examples
//!
//! ```
//! use rasterlab_core::GrayImage;
//! use rasterlab_region::{ConnectivityType, label_components};
//!
//! let mut img = GrayImage::new(10, 10).unwrap();
//! img.set_value(1, 1, 255);
//! img.set_value(2, 1, 255);
//! img.set_value(7, 7, 255);
//!
//! let cc = label_components(&img, ConnectivityType::EightWay).unwrap();
//! assert_eq!(cc.count(), 2);
//! ```

pub mod conncomp;
mod error;
pub mod hough;

pub use error::{RegionError, RegionResult};

pub use conncomp::{
    Bounds, ComponentLabels, ConnectedComponent, ConnectivityType, color_components,
    color_components_with_rng, find_connected_components, label_components,
};
pub use hough::{
    Accumulator, CirclePeak, HoughCircles, HoughLineOptions, HoughLines, HoughQuadrants,
    LinePeak, hough_circles, hough_lines,
};
