//! handler traits and adapters turning functions taking [Context] into handlers.

use core::marker::PhantomData;

use http::Request;

use crate::{context::Context, error::Fault, response::ResponseWriter};

/// Request handler installed into transport's handler slot.
///
/// Implemented for:
/// - closures in the form of `Fn(&mut Request<B>, &mut dyn ResponseWriter)`.
/// - [HandlerFn] returned by [handler_fn].
/// - [Wrapper].
///
/// [Wrapper]: crate::Wrapper
pub trait Handler<B> {
    fn call(&self, req: &mut Request<B>, res: &mut dyn ResponseWriter);
}

impl<F, B> Handler<B> for F
where
    F: Fn(&mut Request<B>, &mut dyn ResponseWriter),
{
    #[inline]
    fn call(&self, req: &mut Request<B>, res: &mut dyn ResponseWriter) {
        self(req, res)
    }
}

/// Recover handler called by [Wrapper] after application handler returned or panicked.
///
/// `fault` is [None] when application handler returned normally. Otherwise it carries the panic
/// payload and the recover handler is responsible for producing a response.
///
/// [Wrapper]: crate::Wrapper
pub trait Recover<B> {
    fn recover(&self, req: &mut Request<B>, res: &mut dyn ResponseWriter, fault: Option<Fault>);
}

impl<F, B> Recover<B> for F
where
    F: Fn(&mut Request<B>, &mut dyn ResponseWriter, Option<Fault>),
{
    #[inline]
    fn recover(&self, req: &mut Request<B>, res: &mut dyn ResponseWriter, fault: Option<Fault>) {
        self(req, res, fault)
    }
}

/// placeholder recover type of [Wrapper] without recover handler.
///
/// [Wrapper]: crate::Wrapper
pub struct NoRecover;

impl<B> Recover<B> for NoRecover {
    #[inline]
    fn recover(&self, _: &mut Request<B>, _: &mut dyn ResponseWriter, _: Option<Fault>) {}
}

/// Adapter type for function taking [Context] as argument. See [handler_fn] for detail.
pub struct HandlerFn<F, B> {
    func: F,
    _body: PhantomData<fn(B)>,
}

/// Construct a [Handler] from function taking [Context] as argument.
///
/// A fresh [Context] is built for every request. When the [ResponseWriter] handed to the handler
/// carries route parameters (which is the case when it's enclosed by [Wrapper]) they are
/// populated before the function is called. Otherwise [Context::param] always returns empty
/// string.
///
/// # Examples:
/// ```rust
/// # use http_rest::{handler_fn, http::{Request, StatusCode}, Handler, Recorder, Wrapper};
/// # use std::collections::HashMap;
/// let handler = handler_fn(|ctx| {
///     let status = if ctx.param("hello").is_empty() {
///         StatusCode::BAD_REQUEST
///     } else {
///         StatusCode::OK
///     };
///     ctx.send(status);
/// });
///
/// // handler used without Wrapper has no route params.
/// let mut rec = Recorder::new();
/// handler.call(&mut Request::new(&b""[..]), &mut rec);
/// assert_eq!(rec.status(), StatusCode::BAD_REQUEST);
///
/// // Wrapper injects route params extractor.
/// let wrapper = Wrapper::new(handler)
///     .params(|_| HashMap::from([(String::from("hello"), String::from("world"))]));
///
/// let mut rec = Recorder::new();
/// wrapper.call(&mut Request::new(&b""[..]), &mut rec);
/// assert_eq!(rec.status(), StatusCode::OK);
/// ```
///
/// [Wrapper]: crate::Wrapper
pub fn handler_fn<F, B>(func: F) -> HandlerFn<F, B>
where
    F: Fn(&mut Context<'_, B>),
{
    HandlerFn {
        func,
        _body: PhantomData,
    }
}

impl<F, B> Handler<B> for HandlerFn<F, B>
where
    F: Fn(&mut Context<'_, B>),
{
    fn call(&self, req: &mut Request<B>, res: &mut dyn ResponseWriter) {
        let params = res.route_params(req.extensions()).cloned().unwrap_or_default();
        let mut ctx = Context::with_params(req, res, params);
        (self.func)(&mut ctx)
    }
}

/// Adapter type for recover function taking [Context] as argument. See [recover_fn] for detail.
pub struct RecoverFn<F, B> {
    func: F,
    _body: PhantomData<fn(B)>,
}

/// Construct a [Recover] from function taking [Context] and optional [Fault] as arguments.
///
/// The [Context] is built the same way as [handler_fn] does. Route parameters already extracted
/// for the application handler are reused.
///
/// # Examples:
/// ```rust
/// # use http_rest::{handler_fn, recover_fn, http::{Request, StatusCode}, Handler, Recorder, Wrapper};
/// let wrapper = Wrapper::new(handler_fn(|_| panic!("boom")))
///     .recover(recover_fn(|ctx, fault| {
///         if let Some(fault) = fault {
///             assert_eq!(fault.message(), Some("boom"));
///             ctx.send(StatusCode::INTERNAL_SERVER_ERROR);
///         }
///     }));
///
/// let mut rec = Recorder::new();
/// wrapper.call(&mut Request::new(&b""[..]), &mut rec);
/// assert_eq!(rec.status(), StatusCode::INTERNAL_SERVER_ERROR);
/// ```
pub fn recover_fn<F, B>(func: F) -> RecoverFn<F, B>
where
    F: Fn(&mut Context<'_, B>, Option<Fault>),
{
    RecoverFn {
        func,
        _body: PhantomData,
    }
}

impl<F, B> Recover<B> for RecoverFn<F, B>
where
    F: Fn(&mut Context<'_, B>, Option<Fault>),
{
    fn recover(&self, req: &mut Request<B>, res: &mut dyn ResponseWriter, fault: Option<Fault>) {
        let params = res.route_params(req.extensions()).cloned().unwrap_or_default();
        let mut ctx = Context::with_params(req, res, params);
        (self.func)(&mut ctx, fault)
    }
}
