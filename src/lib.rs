//! csv-mask: format-preserving masking of sensitive columns in delimited text
//!
//! Rewrites every data value of a delimited file into a deterministic
//! look-alike: same length, same punctuation, same casing, same digit grouping.
//! Tools that expect the original shape keep working on the masked file.
//!
//! # Quick Start
//!
//! ```no_run
//! use csv_mask::{LayoutDescriptor, Masker, Separator};
//!
//! // Header on line 0, data from line 1, pipe separated
//! let layout = LayoutDescriptor::new(Separator::Pipe, 1).with_header(0, 0);
//! let masker = Masker::new(layout);
//!
//! let report = masker.transform_path("clientes.txt", "output/ANON_clientes.txt").unwrap();
//!
//! println!("Types: {}", report.column_types);
//! for row in &report.preview {
//!     println!("{} -> {}", row.original, row.masked);
//! }
//! ```
//!
//! # How it works
//!
//! 1. A sample of up to 150 data lines is read and the first 100 vote, field
//!    by field, on a semantic type per column (e-mail, CPF, CNPJ, date, amount,
//!    number, region code, organization, person, generic text).
//! 2. Every value is masked according to its column type, from a generator
//!    seeded with the SHA-256 of the value itself. Equal values always mask
//!    to equal replacements, which keeps repeated keys joinable.
//! 3. Header lines are copied verbatim; lines before the data start and blank
//!    lines are dropped.
//!
//! Masking is not anonymity: it preserves shapes on purpose and gives no
//! guarantee against re-identification.

pub mod classify;
mod encoding;
pub mod engine;
mod error;
mod layout;
mod pipeline;
mod sample;
mod semantic_type;

pub use classify::{ColumnTypes, ColumnVoteTally, classify};
pub use engine::{Engine, Outcome, SubstitutionRatios};
pub use error::{MaskError, Result, TransformError};
pub use layout::{HeaderRange, LayoutDescriptor, Separator};
pub use pipeline::{DEFAULT_PREVIEW_ROWS, MaskReport, Masker, PreviewRow, transform};
pub use sample::Sampling;
pub use semantic_type::SemanticType;

// Re-export for advanced usage
pub use encoding::{EncodingInfo, decode_to_string, detect_encoding, is_utf8, skip_bom};
