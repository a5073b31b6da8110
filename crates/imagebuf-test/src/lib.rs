//! imagebuf-test - Regression test framework for imagebuf
//!
//! Supports three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use imagebuf_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("rla");
//! let bytes = fixtures::fixture_bytes("ginsu_rgb_nc8.rla")?;
//! let buf = imagebuf_io::read_image_mem(&bytes)?;
//! rp.compare_values(3.0, buf.nchannels() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"
//! - `RUST_LOG`: Log filter for the codec's `log` output

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{FixtureName, RLA_FIXTURES};
pub use params::{RegParams, RegTestMode};

use imagebuf_core::ImageBuf;

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "ginsu_rgb_nc8.rla")
pub fn load_test_image(name: &str) -> TestResult<ImageBuf> {
    let path = test_data_path(name);
    let file = std::fs::File::open(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })?;
    imagebuf_io::read_image(std::io::BufReader::new(file)).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // imagebuf-test is at crates/imagebuf-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
