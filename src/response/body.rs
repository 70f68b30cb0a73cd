use bytes::{Bytes, BytesMut};
use std::{
    collections::VecDeque,
    fmt,
    io::{self, Read},
};
use tracing::trace;

pub const STREAM_CHUNK_SIZE: usize = 8 * 1024;

/// A response payload.
///
/// The variant follows the shape of the payload it was built from: a single
/// string, a list of parts, or a reader streamed in chunks.
#[derive(Debug)]
#[non_exhaustive]
pub enum Body {
    Text(String),
    Parts(Vec<Bytes>),
    Stream(StreamBody),
}

/// A body read lazily from an [`io::Read`] source.
pub struct StreamBody {
    reader: Option<Box<dyn Read + Send>>,
    len_hint: Option<u64>,
    tail: VecDeque<Bytes>,
    chunk_size: usize,
}

impl StreamBody {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            len_hint: None,
            tail: VecDeque::new(),
            chunk_size: STREAM_CHUNK_SIZE,
        }
    }

    /// Declares the number of bytes the reader will produce.
    #[inline]
    pub fn with_len(mut self, len: u64) -> Self {
        self.len_hint = Some(len);
        self
    }

    #[inline]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    fn close(&mut self) {
        if self.reader.take().is_some() {
            trace!("stream body closed");
        }
    }

    fn next_chunk(&mut self) -> Option<io::Result<Bytes>> {
        if let Some(reader) = self.reader.as_mut() {
            let mut buf = vec![0u8; self.chunk_size];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        buf.truncate(n);
                        return Some(Ok(Bytes::from(buf)));
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        trace!(error=%e, "stream body read failed");
                        self.close();
                        return Some(Err(e));
                    }
                }
            }
            self.close();
        }
        self.tail.pop_front().map(Ok)
    }
}

impl fmt::Debug for StreamBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamBody")
            .field("closed", &self.is_closed())
            .field("len_hint", &self.len_hint)
            .field("tail", &self.tail)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

impl Body {
    #[inline]
    pub fn stream(reader: impl Read + Send + 'static) -> Self {
        Self::Stream(StreamBody::new(reader))
    }

    /// Size in bytes; `None` for a stream of unknown length.
    ///
    /// A stream's size is its declared length plus any appended parts,
    /// saturating at `u64::MAX`.
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::Text(s) => Some(s.len() as u64),
            Self::Parts(parts) => Some(parts_len(parts.iter())),
            Self::Stream(s) => s
                .len_hint
                .map(|len| len.saturating_add(parts_len(s.tail.iter()))),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Parts(parts) => parts.iter().all(Bytes::is_empty),
            Self::Stream(s) => s.is_closed() && s.tail.iter().all(Bytes::is_empty),
        }
    }

    /// Appends `part` in place. For a stream the part is emitted after the
    /// reader is exhausted.
    pub fn append(&mut self, part: &str) -> &mut Self {
        match self {
            Self::Text(s) => s.push_str(part),
            Self::Parts(parts) => parts.push(Bytes::copy_from_slice(part.as_bytes())),
            Self::Stream(s) => s.tail.push_back(Bytes::copy_from_slice(part.as_bytes())),
        }
        self
    }

    /// The payload as a lazy sequence of chunks.
    ///
    /// Text and parts are yielded as they are; a stream is read chunk by
    /// chunk and closed once drained.
    #[inline]
    pub fn parts(&mut self) -> BodyParts<'_> {
        let inner = match self {
            Self::Text(s) => PartsInner::Text(Some(s.as_str())),
            Self::Parts(parts) => PartsInner::Parts(parts.iter()),
            Self::Stream(s) => PartsInner::Stream(s),
        };
        BodyParts { inner }
    }

    /// Releases the underlying reader, if any.
    #[inline]
    pub fn close(&mut self) {
        if let Self::Stream(s) = self {
            s.close();
        }
    }

    /// Collects the whole payload.
    pub fn into_bytes(mut self) -> io::Result<Bytes> {
        match self {
            Self::Text(s) => Ok(Bytes::from(s)),
            Self::Parts(ref parts) if parts.len() == 1 => Ok(parts[0].clone()),
            _ => {
                // a stream's declared length is not trusted for allocation
                let capacity = match self {
                    Self::Stream(_) => STREAM_CHUNK_SIZE,
                    _ => self.size().map_or(0, |n| n as usize),
                };
                let mut buf = BytesMut::with_capacity(capacity);
                for part in self.parts() {
                    buf.extend_from_slice(&part?);
                }
                Ok(buf.freeze())
            }
        }
    }
}

fn parts_len<'a>(parts: impl Iterator<Item = &'a Bytes>) -> u64 {
    parts.fold(0, |acc: u64, p| acc.saturating_add(p.len() as u64))
}

impl Default for Body {
    #[inline]
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for Body {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Body {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<Bytes>> for Body {
    #[inline]
    fn from(parts: Vec<Bytes>) -> Self {
        Self::Parts(parts)
    }
}

impl From<Vec<String>> for Body {
    #[inline]
    fn from(parts: Vec<String>) -> Self {
        Self::Parts(parts.into_iter().map(Bytes::from).collect())
    }
}

impl From<Vec<&str>> for Body {
    #[inline]
    fn from(parts: Vec<&str>) -> Self {
        Self::Parts(
            parts
                .into_iter()
                .map(|p| Bytes::copy_from_slice(p.as_bytes()))
                .collect(),
        )
    }
}

impl From<StreamBody> for Body {
    #[inline]
    fn from(s: StreamBody) -> Self {
        Self::Stream(s)
    }
}

#[derive(Debug)]
pub struct BodyParts<'a> {
    inner: PartsInner<'a>,
}

#[derive(Debug)]
enum PartsInner<'a> {
    Text(Option<&'a str>),
    Parts(std::slice::Iter<'a, Bytes>),
    Stream(&'a mut StreamBody),
}

impl Iterator for BodyParts<'_> {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner {
            PartsInner::Text(ref mut s) => s
                .take()
                .map(|s| Ok(Bytes::copy_from_slice(s.as_bytes()))),
            PartsInner::Parts(ref mut iter) => iter.next().cloned().map(Ok),
            PartsInner::Stream(ref mut s) => s.next_chunk(),
        }
    }
}
