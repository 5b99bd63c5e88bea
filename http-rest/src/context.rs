//! restful context type.

use std::{io::Read, mem};

use bytes::Bytes;
use http::{Request, StatusCode};

use crate::{
    error::{BodyOverflow, ReceiveError},
    params::{Params, ParamsFn},
    response::ResponseWriter,
};

#[cfg(feature = "serde")]
use {
    crate::format::Format,
    http::header::CONTENT_TYPE,
    serde_core::{de::DeserializeOwned, ser::Serialize},
};

/// restful context type bundling request body access, response writing and route parameter
/// lookup for the lifetime of one request.
///
/// # Examples:
/// ```rust
/// # use http_rest::{http::StatusCode, Context};
/// # #[derive(serde::Deserialize, serde::Serialize)]
/// # struct User { name: String }
/// fn update_user(ctx: &mut Context<'_, &[u8]>) {
///     let id = ctx.param("id").to_owned();
///
///     match ctx.receive_json::<User>() {
///         Ok(user) if !id.is_empty() => ctx.send_json(&user, StatusCode::OK),
///         Ok(_) => ctx.send(StatusCode::NOT_FOUND),
///         Err(_) => ctx.send(StatusCode::BAD_REQUEST),
///     }
/// }
/// ```
pub struct Context<'a, B> {
    req: &'a mut Request<B>,
    res: &'a mut dyn ResponseWriter,
    params: Params,
    limit: usize,
    consumed: bool,
}

impl<'a, B> Context<'a, B> {
    /// Construct a context with empty route parameters.
    pub fn new(req: &'a mut Request<B>, res: &'a mut dyn ResponseWriter) -> Self {
        Self {
            req,
            res,
            params: Params::new(),
            limit: usize::MAX,
            consumed: false,
        }
    }

    /// Construct a context and populate route parameters with given extractor.
    pub fn with_params_fn(
        req: &'a mut Request<B>,
        res: &'a mut dyn ResponseWriter,
        params_fn: Option<&ParamsFn>,
    ) -> Self {
        let mut ctx = Self::new(req, res);
        ctx.set_params(params_fn);
        ctx
    }

    pub(crate) fn with_params(
        req: &'a mut Request<B>,
        res: &'a mut dyn ResponseWriter,
        params: Params,
    ) -> Self {
        let mut ctx = Self::new(req, res);
        ctx.params = params;
        ctx
    }

    /// Returns the route parameter value for `name`. Empty string is returned when it's absent.
    #[inline]
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).unwrap_or("")
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Replace route parameters with the output of given extractor. The extractor is called with
    /// [Extensions] of request.
    ///
    /// No-op when `params_fn` is [None].
    ///
    /// [Extensions]: http::Extensions
    pub fn set_params(&mut self, params_fn: Option<&ParamsFn>) {
        if let Some(params_fn) = params_fn {
            self.params = params_fn(self.req.extensions());
            tracing::debug!(len = self.params.len(), "route params injected");
        }
    }

    /// Set max size in byte unit the request body can be. Default is unlimited.
    pub fn set_body_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Get an immutable reference of [Request]
    #[inline]
    pub fn req(&self) -> &Request<B> {
        self.req
    }

    /// Get a mutable reference of [Request]
    #[inline]
    pub fn req_mut(&mut self) -> &mut Request<B> {
        self.req
    }

    /// Get an immutable reference of [ResponseWriter]
    #[inline]
    pub fn res(&self) -> &dyn ResponseWriter {
        self.res
    }

    /// Get a mutable reference of [ResponseWriter]. Can be used to write response directly.
    #[inline]
    pub fn res_mut(&mut self) -> &mut dyn ResponseWriter {
        self.res
    }

    /// Send a bodiless response.
    pub fn send(&mut self, status: StatusCode) {
        self.send_bytes(Bytes::new(), status);
    }

    /// Send a response with `value` encoded in wire format `F` and Content-Type header of it.
    ///
    /// When encoding fails the error is logged and response is sent with an empty body. The
    /// status is always written.
    #[cfg(feature = "serde")]
    pub fn send_with<F, T>(&mut self, value: &T, status: StatusCode)
    where
        F: Format,
        T: Serialize + ?Sized,
    {
        // header must be set before status write where transport would finalize it.
        self.res.headers_mut().insert(CONTENT_TYPE, F::content_type());
        let body = F::encode(value).unwrap_or_else(|e| {
            tracing::warn!("{e}. sending empty body with status {status}");
            Bytes::new()
        });
        self.send_bytes(body, status);
    }

    /// Send a response encoded to JSON.
    #[cfg(feature = "json")]
    #[inline]
    pub fn send_json<T>(&mut self, value: &T, status: StatusCode)
    where
        T: Serialize + ?Sized,
    {
        self.send_with::<crate::format::Json, _>(value, status)
    }

    /// Send a response encoded to XML.
    #[cfg(feature = "xml")]
    #[inline]
    pub fn send_xml<T>(&mut self, value: &T, status: StatusCode)
    where
        T: Serialize + ?Sized,
    {
        self.send_with::<crate::format::Xml, _>(value, status)
    }

    fn send_bytes(&mut self, body: Bytes, status: StatusCode) {
        self.res.write_status(status);
        self.res.write_body(body);
    }
}

impl<B> Context<'_, B>
where
    B: Read,
{
    /// Read the entire request body and decode it with wire format `F`.
    ///
    /// Request body can only be read once. Following calls return [ReceiveError::Consumed].
    #[cfg(feature = "serde")]
    pub fn receive<F, T>(&mut self) -> Result<T, ReceiveError>
    where
        F: Format,
        T: DeserializeOwned,
    {
        let body = self.read_body()?;
        F::decode(&body).map_err(Into::into)
    }

    /// Read a JSON request body.
    #[cfg(feature = "json")]
    #[inline]
    pub fn receive_json<T>(&mut self) -> Result<T, ReceiveError>
    where
        T: DeserializeOwned,
    {
        self.receive::<crate::format::Json, _>()
    }

    /// Read a XML request body.
    #[cfg(feature = "xml")]
    #[inline]
    pub fn receive_xml<T>(&mut self) -> Result<T, ReceiveError>
    where
        T: DeserializeOwned,
    {
        self.receive::<crate::format::Xml, _>()
    }

    /// Read the entire request body into memory.
    pub fn receive_bytes(&mut self) -> Result<Bytes, ReceiveError> {
        self.read_body().map(Bytes::from)
    }

    fn read_body(&mut self) -> Result<Vec<u8>, ReceiveError> {
        if mem::replace(&mut self.consumed, true) {
            return Err(ReceiveError::Consumed);
        }

        let limit = self.limit;
        let mut buf = Vec::new();

        // read one byte past limit to tell an overflowed body from one exactly at limit.
        self.req
            .body_mut()
            .by_ref()
            .take((limit as u64).saturating_add(1))
            .read_to_end(&mut buf)?;

        if buf.len() > limit {
            return Err(BodyOverflow { limit }.into());
        }

        Ok(buf)
    }
}
