//! An asynchronous micro SCGI request header reader
//!
//! This crate reads the header block of an SCGI request from an async byte stream.
//! SCGI frames the headers as a netstring of NUL separated key/value fields, followed
//! directly by the raw request body:
//!
//! ```text
//! 70:CONTENT_LENGTH\027\0SCGI\01\0REQUEST_METHOD\0POST\0REQUEST_URI\0/deepthought\0,
//! ```
//!
//! # Features
//!
//! - Asynchronous, cancellable reads using tokio
//! - Correct under any chunking of the input stream
//! - Zero-copy header table backed by one frame buffer
//! - Source left positioned at the request body
//! - A `tokio_util` codec for buffered decoding
//!
//! # Example
//!
//! ```no_run
//! use micro_scgi::connection::Request;
//! use tokio::net::TcpListener;
//! use tokio_util::sync::CancellationToken;
//! use tracing::{error, info, warn, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     info!(port = 4000, "start listening");
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:4000").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let shutdown = CancellationToken::new();
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let cancel = shutdown.child_token();
//!         tokio::spawn(async move {
//!             let mut request = Request::new();
//!             request.set_source(tcp_stream);
//!             match request.read_headers(&cancel).await {
//!                 Ok(headers) => info!(uri = ?headers.get_str("REQUEST_URI"), "received scgi request"),
//!                 Err(e) => error!(cause = %e, "can't read scgi headers"),
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: the [`connection::Request`] façade and the byte source abstraction
//! - [`codec`]: frame decoding building blocks and the buffered [`codec::HeaderDecoder`]
//! - [`protocol`]: the [`protocol::HeaderTable`] and error types
//! - [`config`]: reader tunables
//!
//! # Error Handling
//!
//! [`protocol::ScgiError`] separates stream failures (including EOF before the frame is
//! complete), invalid framing, and cancellation. All of them end the request.
//!
//! # Limitations
//!
//! - The length delimiter must appear within the first 16 bytes
//! - Maximum header frame size: 64KB by default
//! - Header values are not interpreted, `CONTENT_LENGTH` included

pub mod codec;
pub mod config;
pub mod connection;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
