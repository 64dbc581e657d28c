//! Image analysis domain: the instruction template sent to the vision model,
//! the four-field result object and the two-tier reply parser.
//!
//! The upstream model is *prompted* to answer in a labeled, blank-line
//! separated format, but that format is not contractually guaranteed. The
//! parser therefore degrades gracefully (see `parser`) and the result object
//! is guaranteed to carry four non-empty fields.

pub mod parser;
pub mod prompt;

pub use parser::parse_analysis;

use serde::{Deserialize, Serialize};

/// The four textual outputs produced for every analyzed image.
///
/// All fields are always non-empty: parsing substitutes fixed defaults when
/// the model reply cannot be matched to a label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Comprehensive English description of the image.
    pub detailed: String,

    /// The same description in Vietnamese (with diacritics).
    pub vietnamese_description: String,

    /// Prompt optimized for AI image generation tools.
    pub optimized: String,

    /// Comma-separated keyword list.
    pub keywords: String,
}
