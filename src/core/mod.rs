//! Rate acquisition, normalization and conversion

pub mod config;
pub mod conversion;
pub mod error;
pub mod fallback;
pub mod log;
pub mod metrics;
pub mod source;
pub mod store;
pub mod table;

// Re-export main types for cleaner imports
pub use conversion::{ConversionRequest, ConversionResult, convert};
pub use error::FxError;
pub use source::RateSource;
pub use store::{RateOrigin, RateStore, ResolvedRates, resolve};
pub use table::RateTable;
