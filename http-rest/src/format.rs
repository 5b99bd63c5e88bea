//! wire formats for request and response body.

use bytes::Bytes;
use http::header::HeaderValue;
use serde_core::{de::DeserializeOwned, ser::Serialize};

use crate::error::{DecodeError, EncodeError};

/// Some often used header value.
#[allow(clippy::declare_interior_mutable_const)]
pub mod const_header_value {
    use http::header::HeaderValue;

    macro_rules! const_value {
            ($(($ident: ident, $expr: expr)), *) => {
                $(
                   pub const $ident: HeaderValue = HeaderValue::from_static($expr);
                )*
            }
        }

    const_value!((JSON, "application/json"), (XML, "application/xml"));
}

/// A serialization convention with a canonical content type.
///
/// [Context::receive] and [Context::send_with] are generic over this trait so wire formats other
/// than the built in [Json] and [Xml] can be plugged in.
///
/// [Context::receive]: crate::Context::receive
/// [Context::send_with]: crate::Context::send_with
pub trait Format {
    /// name of the format. used in error and log messages.
    const NAME: &'static str;

    /// value of Content-Type header for body encoded in this format.
    fn content_type() -> HeaderValue;

    fn decode<T>(body: &[u8]) -> Result<T, DecodeError>
    where
        T: DeserializeOwned;

    fn encode<T>(value: &T) -> Result<Bytes, EncodeError>
    where
        T: Serialize + ?Sized;
}

#[cfg(feature = "json")]
pub use self::json::Json;

#[cfg(feature = "json")]
mod json {
    use bytes::{BufMut, BytesMut};

    use super::*;

    /// `application/json` format.
    pub struct Json;

    impl Format for Json {
        const NAME: &'static str = "json";

        #[inline]
        fn content_type() -> HeaderValue {
            const_header_value::JSON
        }

        fn decode<T>(body: &[u8]) -> Result<T, DecodeError>
        where
            T: DeserializeOwned,
        {
            serde_json::from_slice(body).map_err(|e| DecodeError::new(Self::NAME, e))
        }

        fn encode<T>(value: &T) -> Result<Bytes, EncodeError>
        where
            T: Serialize + ?Sized,
        {
            let mut writer = BytesMut::new().writer();
            serde_json::to_writer(&mut writer, value).map_err(|e| EncodeError::new(Self::NAME, e))?;
            Ok(writer.into_inner().freeze())
        }
    }
}

#[cfg(feature = "xml")]
pub use self::xml::Xml;

#[cfg(feature = "xml")]
mod xml {
    use super::*;

    /// `application/xml` format.
    ///
    /// The root element is named after the serialized type. Use `#[serde(rename = "..")]` on the
    /// type to pick a different one.
    pub struct Xml;

    impl Format for Xml {
        const NAME: &'static str = "xml";

        #[inline]
        fn content_type() -> HeaderValue {
            const_header_value::XML
        }

        fn decode<T>(body: &[u8]) -> Result<T, DecodeError>
        where
            T: DeserializeOwned,
        {
            quick_xml::de::from_reader(body).map_err(|e| DecodeError::new(Self::NAME, e))
        }

        fn encode<T>(value: &T) -> Result<Bytes, EncodeError>
        where
            T: Serialize + ?Sized,
        {
            quick_xml::se::to_string(value)
                .map(Bytes::from)
                .map_err(|e| EncodeError::new(Self::NAME, e))
        }
    }
}
