use std::{
    collections::HashMap,
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use http_rest::{
    Context, Handler, Params, Recorder, ResponseWriter, Wrapper,
    error::Fault,
    handler_fn,
    http::{Extensions, Request, StatusCode},
    recover_fn,
};

fn request() -> Request<&'static [u8]> {
    Request::new(&b""[..])
}

fn hello(ctx: &mut Context<'_, &'static [u8]>) {
    if ctx.param("hello").is_empty() {
        ctx.send(StatusCode::BAD_REQUEST);
    } else {
        ctx.send(StatusCode::OK);
    }
}

#[test]
fn wrapper() {
    let with_params = Wrapper::new(handler_fn(hello))
        .params(|_: &Extensions| HashMap::from([(String::from("hello"), String::from("world"))]));

    let mut rec = Recorder::new();
    with_params.call(&mut request(), &mut rec);
    assert_eq!(rec.status(), StatusCode::OK);

    let without_params = Wrapper::new(handler_fn(hello));

    let mut rec = Recorder::new();
    without_params.call(&mut request(), &mut rec);
    assert_eq!(rec.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn params_match_extractor() {
    #[derive(Clone)]
    struct Matched(&'static [(&'static str, &'static str)]);

    fn extract(ext: &Extensions) -> Params {
        ext.get::<Matched>().map(|m| m.0.iter().copied().collect()).unwrap_or_default()
    }

    let wrapper = Wrapper::new(handler_fn(|ctx: &mut Context<'_, &'static [u8]>| {
        let expected = extract(ctx.req().extensions());
        assert_eq!(ctx.params(), &expected);
        for (name, value) in &expected {
            assert_eq!(ctx.param(name), value);
        }
        assert_eq!(ctx.param("missing"), "");
        ctx.send(StatusCode::OK);
    }))
    .params(extract);

    for matched in [
        Matched(&[]),
        Matched(&[("id", "996")]),
        Matched(&[("user", "foo"), ("post", "bar"), ("comment", "baz")]),
    ] {
        let mut req = request();
        req.extensions_mut().insert(matched);

        let mut rec = Recorder::new();
        wrapper.call(&mut req, &mut rec);
        assert_eq!(rec.status(), StatusCode::OK);
    }
}

#[test]
fn recover_called_once_on_panic() {
    let count = AtomicUsize::new(0);

    let wrapper = Wrapper::new(handler_fn(|_: &mut Context<'_, &'static [u8]>| panic!("boom")))
        .params(|_: &Extensions| Params::from_iter([("hello", "world")]))
        .recover(recover_fn(|ctx, fault: Option<Fault>| {
            count.fetch_add(1, Ordering::SeqCst);

            let fault = fault.expect("fault must be passed to recover handler");
            assert_eq!(fault.message(), Some("boom"));

            // recover handler observes the same decorated writer with route params.
            assert_eq!(ctx.param("hello"), "world");
            ctx.send(StatusCode::INTERNAL_SERVER_ERROR);
        }));

    let mut rec = Recorder::new();
    wrapper.call(&mut request(), &mut rec);

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(rec.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn recover_called_once_on_return() {
    let count = AtomicUsize::new(0);

    let wrapper = Wrapper::new(handler_fn(hello)).recover(
        |_: &mut Request<&'static [u8]>, res: &mut dyn ResponseWriter, fault: Option<Fault>| {
            assert!(fault.is_none());
            assert!(res.route_params(&Extensions::new()).is_none());
            count.fetch_add(1, Ordering::SeqCst);
        },
    );

    let mut rec = Recorder::new();
    wrapper.call(&mut request(), &mut rec);

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(rec.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn params_extracted_once_per_request() {
    let extracted = Arc::new(AtomicUsize::new(0));

    let wrapper = Wrapper::new(handler_fn(|ctx: &mut Context<'_, &'static [u8]>| {
        assert_eq!(ctx.param("hello"), "world");
        ctx.send(StatusCode::OK);
    }))
    .params({
        let extracted = extracted.clone();
        move |_: &Extensions| {
            extracted.fetch_add(1, Ordering::SeqCst);
            Params::from_iter([("hello", "world")])
        }
    })
    .recover(recover_fn(|ctx, fault: Option<Fault>| {
        assert!(fault.is_none());
        assert_eq!(ctx.param("hello"), "world");
    }));

    for n in 1..=3 {
        let mut rec = Recorder::new();
        wrapper.call(&mut request(), &mut rec);

        assert_eq!(rec.status(), StatusCode::OK);
        assert_eq!(extracted.load(Ordering::SeqCst), n);
    }
}

#[test]
fn unrecovered_panic_escapes() {
    let wrapper = Wrapper::new(handler_fn(|_: &mut Context<'_, &'static [u8]>| panic!("boom")));

    let res = panic::catch_unwind(AssertUnwindSafe(|| wrapper.call(&mut request(), &mut Recorder::new())));
    assert!(res.is_err());
}

#[test]
fn shared_across_threads() {
    let calls = AtomicUsize::new(0);

    let wrapper = Wrapper::new(handler_fn(|ctx: &mut Context<'_, &'static [u8]>| {
        let id = ctx.param("id").to_owned();
        ctx.send_json(&id, StatusCode::OK);
    }))
    .params(move |ext: &Extensions| {
        let id = ext.get::<usize>().copied().unwrap_or_default();
        Params::from_iter([("id", id.to_string())])
    })
    .recover(recover_fn(|ctx: &mut Context<'_, &'static [u8]>, fault: Option<Fault>| {
        calls.fetch_add(1, Ordering::Relaxed);
        if fault.is_some() {
            ctx.send(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }));

    thread::scope(|s| {
        for id in 0..8usize {
            let wrapper = &wrapper;
            s.spawn(move || {
                for _ in 0..16 {
                    let mut req = request();
                    req.extensions_mut().insert(id);

                    let mut rec = Recorder::new();
                    wrapper.call(&mut req, &mut rec);

                    assert_eq!(rec.status(), StatusCode::OK);
                    assert_eq!(rec.body(), format!("\"{id}\"").as_bytes());
                }
            });
        }
    });

    assert_eq!(calls.load(Ordering::Relaxed), 8 * 16);
}
