//! rasterlab-transform - Geometric resampling transforms
//!
//! This crate provides inverse-mapped geometric transforms with bilinear
//! interpolation:
//!
//! - Scaling by factors or to a target size
//! - Rotation about the image center
//! - Twirl and ripple warps
//! - Projective rectification from four corner points
//!
//! Every function is generic over the channel count, so grayscale and
//! color rasters share one implementation; color channels are
//! interpolated independently.

mod error;
pub mod interp;
pub mod projective;
pub mod rotate;
pub mod scale;
pub mod warp;

pub use error::{TransformError, TransformResult};
pub use interp::{Fallback, bilinear, nearest, sample};
pub use projective::{Point, homography, projective_warp, rectified_size};
pub use rotate::rotate;
pub use scale::{scale, scale_to_size};
pub use warp::{RippleOptions, TwirlOptions, ripple, twirl};
