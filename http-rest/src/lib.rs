//! Restful request context on top of `http` crate types.
//!
//! Handler functions receive a [Context] which offers:
//! - decoding request body in JSON or XML format.
//! - encoding response body in JSON or XML format with matching Content-Type header.
//! - route parameter lookup without coupling to any router implementation.
//!
//! Route parameters are injected by [Wrapper]. It decorates transport's [ResponseWriter] with a
//! route parameter extractor ([ParamsFn]) supplied by router integration code. Handlers built with
//! [handler_fn] pick the extractor up when constructing their [Context]. The same handler runs
//! without [Wrapper] as well, in which case route parameters are always empty.
//!
//! # Examples:
//! ```rust
//! use http_rest::{
//!     handler_fn,
//!     http::{Extensions, Request, StatusCode},
//!     Context, Handler, Params, Recorder, Wrapper,
//! };
//!
//! #[derive(serde::Deserialize, serde::Serialize)]
//! #[serde(rename = "mock")]
//! struct Mock {
//!     hello: String,
//! }
//!
//! fn echo(ctx: &mut Context<'_, &[u8]>) {
//!     match ctx.receive_json::<Mock>() {
//!         Ok(mut mock) => {
//!             mock.hello = format!("{} {}", mock.hello, ctx.param("id"));
//!             ctx.send_xml(&mock, StatusCode::CREATED);
//!         }
//!         Err(_) => ctx.send(StatusCode::BAD_REQUEST),
//!     }
//! }
//!
//! let wrapper = Wrapper::new(handler_fn(echo)).params(|_: &Extensions| Params::from_iter([("id", "996")]));
//!
//! let mut req = Request::new(&br#"{"hello":"world"}"#[..]);
//! let mut rec = Recorder::new();
//! wrapper.call(&mut req, &mut rec);
//!
//! let res = rec.into_response();
//! assert_eq!(res.status(), StatusCode::CREATED);
//! assert_eq!(res.headers()["content-type"], "application/xml");
//! assert_eq!(res.body(), "<mock><hello>world 996</hello></mock>");
//! ```

#![forbid(unsafe_code)]

mod context;
mod handler;
mod params;
mod recorder;
mod response;
mod wrapper;

pub mod error;

#[cfg(feature = "serde")]
pub mod format;

pub use self::{
    context::Context,
    handler::{Handler, HandlerFn, NoRecover, Recover, RecoverFn, handler_fn, recover_fn},
    params::{Iter as ParamsIter, Params, ParamsFn},
    recorder::Recorder,
    response::{ResponseWriter, RestResponse},
    wrapper::Wrapper,
};

pub use http;
