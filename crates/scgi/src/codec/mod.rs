//! SCGI header frame decoding
//!
//! The building blocks shared by the async reader and the buffered decoder:
//!
//! - [`HeaderBuffer`]: growable storage for the frame bytes
//! - [`LengthFramer`]: decodes the `<length>:` prefix into a [`Frame`]
//! - [`FieldSplitter`]: splits the field block into a header table
//! - [`HeaderDecoder`]: a [`tokio_util::codec::Decoder`] built from the above
//!
//! # Example
//!
//! ```
//! use micro_scgi::codec::HeaderDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = HeaderDecoder::new();
//! let mut buffer = BytesMut::from(&b"12:k1\0v1\0k2\0v2\0,body"[..]);
//! let table = decoder.decode(&mut buffer).unwrap().unwrap();
//!
//! assert_eq!(table.get_str("k2"), Some("v2"));
//! assert_eq!(&buffer[..], b"body");
//! ```

mod field_splitter;
mod header_buffer;
mod header_decoder;
mod length_framer;

pub use field_splitter::FieldSplitter;
pub use header_buffer::HeaderBuffer;
pub use header_decoder::HeaderDecoder;
pub use length_framer::{Frame, LengthFramer};
