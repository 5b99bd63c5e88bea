//! dispatch wrapper installed into transport's handler slot.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use http::{Extensions, Request};

use crate::{
    error::Fault,
    handler::{Handler, NoRecover, Recover},
    params::{Params, ParamsFn},
    response::{ResponseWriter, RestResponse},
};

/// Restful wrapper enclosing an application [Handler].
///
/// On every request the transport's [ResponseWriter] is decorated with [RestResponse] carrying
/// the configured route parameter extractor, so handlers built with [handler_fn] get their
/// [Context] populated with route params.
///
/// Configuration is set with builder methods once and shared read only by all requests.
///
/// # Examples:
/// ```rust
/// # use http_rest::{handler_fn, recover_fn, http::{Extensions, Request, StatusCode}, Handler, Params, Recorder, Wrapper};
/// // route params stored in request extensions by router.
/// #[derive(Clone)]
/// struct RouteParams(Vec<(String, String)>);
///
/// let wrapper = Wrapper::new(handler_fn(|ctx| {
///         let name = ctx.param("name").to_owned();
///         ctx.send_json(&name, StatusCode::OK);
///     }))
///     // extract route params from request extensions.
///     .params(|ext: &Extensions| {
///         ext.get::<RouteParams>()
///             .map(|p| p.0.iter().cloned().collect::<Params>())
///             .unwrap_or_default()
///     })
///     // produce 500 response when handler panics.
///     .recover(recover_fn(|ctx, fault| {
///         if fault.is_some() {
///             ctx.send(StatusCode::INTERNAL_SERVER_ERROR);
///         }
///     }));
///
/// let mut req = Request::new(&b""[..]);
/// req.extensions_mut().insert(RouteParams(vec![("name".into(), "world".into())]));
///
/// let mut rec = Recorder::new();
/// wrapper.call(&mut req, &mut rec);
///
/// assert_eq!(rec.status(), StatusCode::OK);
/// assert_eq!(rec.body(), br#""world""#);
/// ```
///
/// [handler_fn]: crate::handler_fn
/// [Context]: crate::Context
pub struct Wrapper<H, R = NoRecover> {
    handler: H,
    recover: Option<R>,
    params_fn: Option<ParamsFn>,
}

impl<H> Wrapper<H> {
    /// Construct a wrapper without recover handler and route params extractor.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            recover: None,
            params_fn: None,
        }
    }
}

impl<H, R> Wrapper<H, R> {
    /// Set recover handler called after application handler returned or panicked.
    ///
    /// Without recover handler a panic inside application handler would unwind to the caller of
    /// [Wrapper] which is typically the transport.
    pub fn recover<R1>(self, recover: R1) -> Wrapper<H, R1> {
        Wrapper {
            handler: self.handler,
            recover: Some(recover),
            params_fn: self.params_fn,
        }
    }

    /// Set route params extractor. It's called at most once per request with request's
    /// [Extensions].
    pub fn params<F, P>(mut self, func: F) -> Self
    where
        F: Fn(&Extensions) -> P + Send + Sync + 'static,
        P: Into<Params>,
    {
        self.params_fn = Some(Arc::new(move |ext: &Extensions| -> Params { func(ext).into() }));
        self
    }

    /// Set route params extractor from an already constructed [ParamsFn].
    pub fn params_fn(mut self, params_fn: ParamsFn) -> Self {
        self.params_fn = Some(params_fn);
        self
    }
}

impl<H, R, B> Handler<B> for Wrapper<H, R>
where
    H: Handler<B>,
    R: Recover<B>,
{
    fn call(&self, req: &mut Request<B>, res: &mut dyn ResponseWriter) {
        let mut res = RestResponse::new(res, self.params_fn.as_ref());

        match self.recover {
            Some(ref recover) => {
                let fault = panic::catch_unwind(AssertUnwindSafe(|| self.handler.call(req, &mut res)))
                    .err()
                    .map(Fault::new);

                if let Some(ref fault) = fault {
                    tracing::error!("{fault}. calling recover handler");
                }

                recover.recover(req, &mut res, fault);
            }
            None => self.handler.call(req, &mut res),
        }
    }
}
