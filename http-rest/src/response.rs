//! outbound response channel.

use core::cell::OnceCell;

use bytes::Bytes;
use http::{Extensions, HeaderMap, StatusCode};

use crate::params::{Params, ParamsFn};

/// Sink of http response handed to handlers by the transport layer.
///
/// Header map can be mutated until status is written. Status and body are expected to be
/// written once. Most transports finalize headers on the first write so callers must set
/// headers before calling [ResponseWriter::write_status].
pub trait ResponseWriter {
    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn write_status(&mut self, status: StatusCode);

    fn write_body(&mut self, body: Bytes);

    /// route parameters carried by this writer. The argument is the [Extensions] of the request
    /// being served.
    ///
    /// Writers return [None] by default. [RestResponse] produced by [Wrapper] overrides it to
    /// hand route parameters to the handler adapters.
    ///
    /// [Wrapper]: crate::Wrapper
    #[inline]
    fn route_params(&self, _: &Extensions) -> Option<&Params> {
        None
    }
}

impl<W> ResponseWriter for &mut W
where
    W: ResponseWriter + ?Sized,
{
    #[inline]
    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    #[inline]
    fn write_status(&mut self, status: StatusCode) {
        (**self).write_status(status)
    }

    #[inline]
    fn write_body(&mut self, body: Bytes) {
        (**self).write_body(body)
    }

    #[inline]
    fn route_params(&self, ext: &Extensions) -> Option<&Params> {
        (**self).route_params(ext)
    }
}

/// Decorated response writer forwarding all writes to the transport's writer unchanged while
/// carrying an optional [ParamsFn].
///
/// The [ParamsFn] is called on the first [ResponseWriter::route_params] call and its output is
/// cached for the lifetime of the decorator, which is one request.
pub struct RestResponse<'a> {
    inner: &'a mut dyn ResponseWriter,
    params_fn: Option<&'a ParamsFn>,
    params: OnceCell<Params>,
}

impl<'a> RestResponse<'a> {
    pub fn new(inner: &'a mut dyn ResponseWriter, params_fn: Option<&'a ParamsFn>) -> Self {
        Self {
            inner,
            params_fn,
            params: OnceCell::new(),
        }
    }
}

impl ResponseWriter for RestResponse<'_> {
    #[inline]
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    #[inline]
    fn write_status(&mut self, status: StatusCode) {
        self.inner.write_status(status)
    }

    #[inline]
    fn write_body(&mut self, body: Bytes) {
        self.inner.write_body(body)
    }

    fn route_params(&self, ext: &Extensions) -> Option<&Params> {
        self.params_fn.map(|func| {
            self.params.get_or_init(|| {
                let params = func(ext);
                tracing::debug!(len = params.len(), "route params extracted");
                params
            })
        })
    }
}
