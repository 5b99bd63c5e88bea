//! error types.

use core::{any::Any, fmt};

use std::{error, io};

type BoxError = Box<dyn error::Error + Send + Sync>;

/// Error occur when receiving and decoding request body with [Context::receive].
///
/// [Context::receive]: crate::Context::receive
#[derive(Debug)]
#[non_exhaustive]
pub enum ReceiveError {
    /// request body stream can not be read to it's end.
    Io(io::Error),
    /// request body is larger than the limit set by [Context::set_body_limit].
    ///
    /// [Context::set_body_limit]: crate::Context::set_body_limit
    Overflow(BodyOverflow),
    /// request body is read but it's content does not conform to the wire format.
    Decode(DecodeError),
    /// request body has already been consumed by previous receive call.
    Consumed,
}

impl fmt::Display for ReceiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Io(ref e) => write!(f, "failed to read request body: {e}"),
            Self::Overflow(ref e) => fmt::Display::fmt(e, f),
            Self::Decode(ref e) => fmt::Display::fmt(e, f),
            Self::Consumed => f.write_str("request body is already consumed"),
        }
    }
}

impl error::Error for ReceiveError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::Io(ref e) => Some(e),
            Self::Overflow(ref e) => Some(e),
            Self::Decode(ref e) => Some(e),
            Self::Consumed => None,
        }
    }
}

impl From<io::Error> for ReceiveError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<BodyOverflow> for ReceiveError {
    fn from(e: BodyOverflow) -> Self {
        Self::Overflow(e)
    }
}

impl From<DecodeError> for ReceiveError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

#[derive(Debug, Clone)]
pub struct BodyOverflow {
    pub(crate) limit: usize,
}

impl BodyOverflow {
    /// the limit in bytes that was exceeded.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl fmt::Display for BodyOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body size reached limit: {} bytes", self.limit)
    }
}

impl error::Error for BodyOverflow {}

/// Error produced by [Format::decode].
///
/// [Format::decode]: crate::format::Format::decode
#[derive(Debug)]
pub struct DecodeError {
    format: &'static str,
    source: BoxError,
}

impl DecodeError {
    pub fn new(format: &'static str, e: impl Into<BoxError>) -> Self {
        Self {
            format,
            source: e.into(),
        }
    }

    /// name of the wire format failed to decode.
    pub fn format(&self) -> &'static str {
        self.format
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode {} body: {}", self.format, self.source)
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&*self.source)
    }
}

/// Error produced by [Format::encode].
///
/// Send methods of [Context] do not return this error. It's logged and the response goes out
/// with an empty body instead.
///
/// [Format::encode]: crate::format::Format::encode
/// [Context]: crate::Context
#[derive(Debug)]
pub struct EncodeError {
    format: &'static str,
    source: BoxError,
}

impl EncodeError {
    pub fn new(format: &'static str, e: impl Into<BoxError>) -> Self {
        Self {
            format,
            source: e.into(),
        }
    }

    /// name of the wire format failed to encode.
    pub fn format(&self) -> &'static str {
        self.format
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to encode {} body: {}", self.format, self.source)
    }
}

impl error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&*self.source)
    }
}

/// Panic payload caught by [Wrapper] when a recover handler is configured.
///
/// # Examples:
/// ```rust
/// # use http_rest::error::Fault;
/// fn handle_fault(fault: Fault) {
///     // typical panic message from panic! macro or unwrap/expect methods can be displayed.
///     println!("{fault}");
///
///     // arbitrary payload needs manual downcast.
///     struct Foo;
///     if let Some(_foo) = fault.payload().downcast_ref::<Foo>() {}
///
///     // or keep unwinding as if the panic was never caught.
///     std::panic::resume_unwind(fault.into_inner());
/// }
/// ```
///
/// [Wrapper]: crate::Wrapper
pub struct Fault(Box<dyn Any + Send>);

impl Fault {
    pub(crate) fn new(payload: Box<dyn Any + Send>) -> Self {
        Self(payload)
    }

    /// reference of the panic payload.
    pub fn payload(&self) -> &(dyn Any + Send) {
        &*self.0
    }

    /// the panic payload. can be passed to [std::panic::resume_unwind].
    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.0
    }

    /// panic message if the payload is a string type.
    pub fn message(&self) -> Option<&str> {
        self.0
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| self.0.downcast_ref::<&str>().copied())
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fault").field(&self.message()).finish()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(msg) => write!(f, "handler panicked: {msg}"),
            None => f.write_str("handler panicked: unknown. please consider downcast Fault::payload"),
        }
    }
}

impl error::Error for Fault {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fault_message() {
        let fault = Fault::new(Box::new("boom"));
        assert_eq!(fault.message(), Some("boom"));
        assert_eq!(fault.to_string(), "handler panicked: boom");

        let fault = Fault::new(Box::new(String::from("boom 996")));
        assert_eq!(fault.message(), Some("boom 996"));

        let fault = Fault::new(Box::new(996usize));
        assert!(fault.message().is_none());
        assert_eq!(*fault.payload().downcast_ref::<usize>().unwrap(), 996);
    }

    #[test]
    fn receive_error_source() {
        let e = ReceiveError::from(BodyOverflow { limit: 8 });
        assert_eq!(e.to_string(), "body size reached limit: 8 bytes");
        assert!(error::Error::source(&e).is_some());
        assert!(error::Error::source(&ReceiveError::Consumed).is_none());
    }
}
