//! rasterlab core - Basic data structures for image processing
//!
//! This crate provides the building blocks shared by every algorithm crate
//! in the workspace:
//!
//! - [`Raster`] - The image container, with the [`GrayImage`] /
//!   [`ColorImage`] aliases and integer / float / label variants
//! - [`IntegralImage`] - Summed-area tables for O(1) window sums
//! - [`Histogram`] - 256-bucket intensity histograms
//! - [`Lut`] - Pointwise intensity lookup tables
//! - [`DisjointSet`] - Union-find used by component labeling
//! - [`Matrix3`] - 3x3 matrices for homogeneous 2D geometry
//! - [`color`] - BGR / HSV / gray pixel helpers and random colors

pub mod color;
pub mod disjoint_set;
pub mod error;
pub mod histogram;
pub mod integral;
pub mod lut;
pub mod matrix;
pub mod raster;

pub use disjoint_set::DisjointSet;
pub use error::{Error, Result};
pub use histogram::Histogram;
pub use integral::IntegralImage;
pub use lut::Lut;
pub use matrix::Matrix3;
pub use raster::{ColorImage, FloatImage, GrayImage, IntImage, LabelImage, Raster, Sample};
