//! Core SCGI protocol types.
//!
//! - [`HeaderTable`]: the parsed key/value header mapping
//! - [`ScgiError`]: failures of a header read
//! - [`ConfigError`]: rejected reader settings
//!
//! # Wire format
//!
//! ```text
//! <decimal-length>:<key0>\0<value0>\0...<keyN>\0<valueN>\0,
//! ```
//!
//! `<decimal-length>` counts the field bytes between `:` and the trailing `,`.
//! The raw request body follows the `,` directly.

mod header_table;
pub use header_table::HeaderTable;

mod error;
pub use error::ConfigError;
pub use error::ScgiError;
