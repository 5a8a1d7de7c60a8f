//! rasterlab-morph - Morphological operations for image processing
//!
//! This crate provides morphological operations including:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Binary morphology: erosion, dilation, opening, closing
//! - Grayscale morphology: erosion, dilation, opening, closing
//! - Morphological gradient and smoothing
//! - Hit-miss transform and XOR boundary extraction
//! - Skeletonization with eight hit-or-miss templates
//! - Zhang-Suen thinning
//!
//! Binary images hold 0 (background) and 255 (foreground); every binary
//! operation rejects other values with [`MorphError::NotBinary`].

pub mod binary;
mod error;
pub mod grayscale;
pub mod sel;
pub mod skeleton;
pub mod thin;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement, check_mask_size};

// Re-export commonly used binary morphology functions
pub use binary::{
    check_binary, close, close_brick, dilate, dilate_brick, erode, erode_brick,
    hit_miss_transform, open, open_brick, xor_edges,
};

// Re-export commonly used grayscale morphology functions
pub use grayscale::{close_gray, dilate_gray, erode_gray, gradient_gray, open_gray, smooth_gray};

pub use skeleton::{skeleton_sels, skeletonize};
pub use thin::thin_zhang_suen;
