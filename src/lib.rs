//! Typed HTTP header values and response metadata.
//!
//! A [`CodecRegistry`](registry::CodecRegistry) binds header names to value
//! codecs and hands out [`Header`](header::Header)s that convert lazily
//! between wire text and typed [`Value`](header::Value)s. The crate also
//! carries the method and status registries and a
//! [`Response`](response::Response) aggregate that serializes header lines.

pub mod codec;
pub(crate) mod common;
pub(crate) mod errors;
pub mod header;
pub mod registry;
pub mod response;

pub use common::*;
pub use errors::*;
