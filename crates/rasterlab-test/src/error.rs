//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Core raster error
    #[error("core error: {0}")]
    Core(#[from] rasterlab_core::Error),

    /// Fixture parameters don't describe a drawable shape
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
