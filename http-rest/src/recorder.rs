//! in memory response writer.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, Response, StatusCode};

use crate::response::ResponseWriter;

/// [ResponseWriter] recording everything written to it in memory.
///
/// Useful for testing handlers and for transports that need a complete [Response] before
/// sending it out.
///
/// # Examples:
/// ```rust
/// # use http_rest::{handler_fn, http::{Request, StatusCode}, Handler, Recorder};
/// let handler = handler_fn(|ctx| ctx.send(StatusCode::ACCEPTED));
///
/// let mut req = Request::new(&b""[..]);
/// let mut rec = Recorder::new();
/// handler.call(&mut req, &mut rec);
///
/// let res = rec.into_response();
/// assert_eq!(res.status(), StatusCode::ACCEPTED);
/// assert!(res.body().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Recorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// written status. defaults to 200 OK when nothing is written.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// returns true when status has been written.
    pub fn is_written(&self) -> bool {
        self.status.is_some()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Transform self to a [Response] with everything recorded so far.
    pub fn into_response(self) -> Response<Bytes> {
        let status = self.status();
        let mut res = Response::new(self.body.freeze());
        *res.status_mut() = status;
        *res.headers_mut() = self.headers;
        res
    }
}

impl ResponseWriter for Recorder {
    #[inline]
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(written) => tracing::warn!("superfluous write of status {status}. {written} is already written"),
            None => self.status = Some(status),
        }
    }

    fn write_body(&mut self, body: Bytes) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(&body);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_written_once() {
        let mut rec = Recorder::new();
        assert!(!rec.is_written());
        assert_eq!(rec.status(), StatusCode::OK);

        rec.write_status(StatusCode::NOT_FOUND);
        rec.write_status(StatusCode::BAD_GATEWAY);

        assert!(rec.is_written());
        assert_eq!(rec.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn body_implies_ok() {
        let mut rec = Recorder::new();
        rec.write_body(Bytes::from_static(b"hello"));
        rec.write_body(Bytes::from_static(b" world"));
        rec.write_status(StatusCode::IM_A_TEAPOT);

        let res = rec.into_response();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body(), "hello world");
    }
}
