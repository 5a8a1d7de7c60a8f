//! rasterlab-test - Regression test framework for rasterlab
//!
//! This crate provides the regression harness used by every `tests/*_reg.rs`
//! file in the workspace, supporting two modes:
//!
//! - **Compare**: Check computed values against expectations (default)
//! - **Display**: Run the same checks but also print every comparison
//!
//! The workspace ships no image files, so fixtures come from the
//! [`synthetic`] generators instead of golden images.
//!
//! # Usage
//!
//! ```ignore
//! use rasterlab_test::{RegParams, synthetic};
//!
//! let mut rp = RegParams::new("conncomp");
//! let img = synthetic::filled_rect(32, 32, 4, 4, 10, 10, 255, 0).unwrap();
//! rp.compare_values(36.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
