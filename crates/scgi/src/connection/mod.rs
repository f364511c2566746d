//! SCGI request handling module
//!
//! This module reads the header frame of one SCGI request off an async byte source
//! and keeps that source available, positioned at the body, for the caller.
//!
//! # Components
//!
//! - [`Request`]: owns the source and the parsed headers
//!   - Reads the header frame exactly once
//!   - Exposes the header table and the body
//!   - Closes the source when dropped
//! - [`ByteSource`]: the async read/close interface a source implements
//! - [`BodyReader`]: the body, starting right after the header frame
//!
//! # Features
//!
//! - Non-blocking reads, raced against a `CancellationToken`
//! - Chunking independent: any split of the input gives the same headers
//! - Field splitting off the I/O path, on the blocking pool

mod async_reader;
mod request;
mod source;

#[cfg(test)]
mod mock_source;

pub use request::Request;
pub use source::{BodyReader, ByteSource, LocalByteSource};
