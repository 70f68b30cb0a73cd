mod body;

pub use body::*;

use crate::{
    common::{Status, StatusKey},
    errors::{CodecError, NotFoundError},
    header::Header,
    registry::CodecRegistry,
};
use bytes::BytesMut;

/// Status, headers and body of an outgoing response.
#[derive(Debug, Default)]
pub struct Response {
    status: Option<Status>,
    headers: Vec<Header>,
    body: Option<Body>,
}

impl Response {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    #[inline]
    pub fn set_status(&mut self, status: Status) -> &mut Self {
        self.status = Some(status);
        self
    }

    /// Sets the status from a registered code, given as an integer or text.
    pub fn set_status_code<'a>(
        &mut self,
        code: impl Into<StatusKey<'a>>,
    ) -> Result<&mut Self, NotFoundError> {
        let status = Status::fetch(code)?;
        Ok(self.set_status(status))
    }

    #[inline]
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    #[inline]
    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }

    #[inline]
    pub fn set_body(&mut self, body: impl Into<Body>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    #[inline]
    pub fn take_body(&mut self) -> Option<Body> {
        self.body.take()
    }

    #[inline]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// The first header named `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|h| *h.name() == name)
    }

    pub fn header_mut(&mut self, name: &str) -> Option<&mut Header> {
        self.headers.iter_mut().find(|h| *h.name() == name)
    }

    #[inline]
    pub fn push_header(&mut self, header: Header) -> &mut Header {
        self.headers.push(header);
        let last = self.headers.len() - 1;
        &mut self.headers[last]
    }

    /// Appends a new header for `name`, bound to the codec `registry` picks.
    #[inline]
    pub fn append_header(&mut self, registry: &CodecRegistry, name: &str) -> &mut Header {
        self.push_header(registry.lookup(name))
    }

    /// Removes every header named `name`, returning how many were removed.
    pub fn remove_header(&mut self, name: &str) -> usize {
        let before = self.headers.len();
        self.headers.retain(|h| *h.name() != name);
        before - self.headers.len()
    }

    /// Writes one `"<Name>: <raw-value>\r\n"` line per header, in order.
    pub fn encode_headers(&self, wbuf: &mut BytesMut) -> Result<(), CodecError> {
        for h in &self.headers {
            h.encode(wbuf)?;
        }
        Ok(())
    }
}
