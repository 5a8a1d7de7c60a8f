//! Regression test parameters and operations

use rasterlab_core::{Raster, Sample};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and report failures only (default)
    #[default]
    Compare,
    /// Display mode - also report every passing comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "conncomp")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (compare or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "conncomp")
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured based on the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    fn pass(&self, what: &str) -> bool {
        if self.display() {
            eprintln!("{}_reg index {}: {} ok", self.test_name, self.index, what);
        }
        true
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            self.pass("value")
        }
    }

    /// Compare two rasters for exact equality
    ///
    /// # Returns
    ///
    /// `true` if rasters are identical, `false` otherwise.
    pub fn compare_rasters<T: Sample, const C: usize>(
        &mut self,
        expected: &Raster<T, C>,
        actual: &Raster<T, C>,
    ) -> bool {
        self.compare_rasters_within(expected, actual, 0.0, 0.0)
    }

    /// Compare two rasters allowing small per-sample differences
    ///
    /// # Arguments
    ///
    /// * `expected` - Reference raster
    /// * `actual` - Computed raster
    /// * `max_diff` - Samples differing by at most this much count as equal
    /// * `max_fraction` - Fraction of samples allowed to exceed `max_diff`
    ///
    /// # Returns
    ///
    /// `true` if dimensions agree and the mismatch fraction is within bounds.
    pub fn compare_rasters_within<T: Sample, const C: usize>(
        &mut self,
        expected: &Raster<T, C>,
        actual: &Raster<T, C>,
        max_diff: f64,
        max_fraction: f64,
    ) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - dimension mismatch \
                 {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            );
            return self.fail(msg);
        }

        let mut first_bad = None;
        let mut bad = 0usize;
        for (i, (e, a)) in expected.data().iter().zip(actual.data()).enumerate() {
            if (e.to_f64() - a.to_f64()).abs() > max_diff {
                bad += 1;
                first_bad.get_or_insert(i);
            }
        }

        let fraction = bad as f64 / expected.data().len() as f64;
        if fraction > max_fraction {
            let i = first_bad.unwrap_or(0) / C;
            let (x, y) = (i % expected.width() as usize, i / expected.width() as usize);
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - {} samples differ, \
                 first at ({}, {})",
                self.test_name, self.index, bad, x, y
            );
            self.fail(msg)
        } else {
            self.pass("raster")
        }
    }

    /// Compare two byte strings
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg)
        } else {
            self.pass("string")
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
