// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Codecs converting field values to and from their wire form.
//!
//! Most attributes travel as the matching JSON primitive, but Google's REST
//! APIs carry some types in a converted form: 64-bit integers as decimal
//! strings, byte payloads as base64, timestamps as RFC 3339 strings. A
//! [Codec] names one such conversion. Representations attach a codec to a
//! field at declaration time; the combinators [Repeated] and [MapOf] lift any
//! codec over collections, and [Nested] recurses into a message with its own
//! representation.

use crate::error::{DecodeError, EncodeError};
use crate::representable::Representable;
use crate::scalar::Scalar;
use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;
use std::collections::HashMap;

/// Converts one field value to and from its JSON wire form.
///
/// A codec is a stateless strategy: it is never instantiated, and both
/// conversions are associated functions. Every [Scalar] is its own codec,
/// passing values through unchanged. The other implementations perform a
/// representation change, such as [Base64] for byte payloads or [I64] for
/// 64-bit integers.
///
/// # Examples
/// ```
/// # use google_apis_rep::{Codec, I64};
/// let encoded = I64::encode(&i64::MAX)?;
/// assert_eq!(encoded, serde_json::json!("9223372036854775807"));
/// assert_eq!(I64::decode(encoded)?, i64::MAX);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Codec: 'static {
    /// The in-memory type this codec produces and consumes.
    type Value;

    /// The phrase naming this codec's wire form in diagnostics.
    const EXPECTING: &'static str;

    /// Converts `value` into its wire form.
    fn encode(value: &Self::Value) -> Result<Value, EncodeError>;

    /// Converts the wire form back into the in-memory type.
    fn decode(value: Value) -> Result<Self::Value, DecodeError>;
}

/// Scalars travel as themselves.
impl<P: Scalar> Codec for P {
    type Value = P;
    const EXPECTING: &'static str = P::EXPECTING;

    fn encode(value: &P) -> Result<Value, EncodeError> {
        value.to_value()
    }

    fn decode(value: Value) -> Result<P, DecodeError> {
        P::from_value(value)
    }
}

// The APIs emit URL-safe base64 with padding, but payloads arrive in either
// alphabet, padded or not, depending on the service and its age.
const BASE64_LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const BASE64_ENCODE: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, GeneralPurposeConfig::new());
const BASE64_DECODE_URL_SAFE: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, BASE64_LENIENT);
const BASE64_DECODE_STANDARD: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, BASE64_LENIENT);

/// Maps byte payloads to their base64 wire form.
///
/// # Examples
/// ```
/// # use google_apis_rep::{Base64, Codec};
/// let encoded = Base64::encode(&bytes::Bytes::from_static(b"hello world"))?;
/// assert_eq!(encoded, serde_json::json!("aGVsbG8gd29ybGQ="));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Base64;

impl Codec for Base64 {
    type Value = bytes::Bytes;
    const EXPECTING: &'static str = "a base64 string";

    fn encode(value: &Self::Value) -> Result<Value, EncodeError> {
        Ok(Value::String(BASE64_ENCODE.encode(value)))
    }

    fn decode(value: Value) -> Result<Self::Value, DecodeError> {
        match value {
            Value::String(s) => BASE64_DECODE_URL_SAFE
                .decode(&s)
                .or_else(|_| BASE64_DECODE_STANDARD.decode(&s))
                .map(bytes::Bytes::from)
                .map_err(|e| DecodeError::invalid(Self::EXPECTING, e)),
            other => Err(DecodeError::unexpected(Self::EXPECTING, &other)),
        }
    }
}

macro_rules! impl_int64_codec {
    ($name:ident, $t:ty, $msg:literal) => {
        impl Codec for $name {
            type Value = $t;
            const EXPECTING: &'static str = $msg;

            fn encode(value: &$t) -> Result<Value, EncodeError> {
                Ok(Value::String(value.to_string()))
            }

            fn decode(value: Value) -> Result<$t, DecodeError> {
                fn from_f64(value: f64) -> Result<$t, DecodeError> {
                    if value.fract() != 0.0 {
                        return Err(DecodeError::invalid(
                            $msg,
                            format!("{value} has a fractional part"),
                        ));
                    }
                    if value < <$t>::MIN as f64 || value > <$t>::MAX as f64 {
                        return Err(out_of_range(&value));
                    }
                    // In range with a zero fraction, so the cast is exact.
                    Ok(value as $t)
                }
                fn out_of_range(value: &dyn std::fmt::Display) -> DecodeError {
                    DecodeError::invalid($msg, format!("{value} is out of range"))
                }
                match &value {
                    Value::String(s) => match s.parse::<i128>() {
                        Ok(v) => <$t>::try_from(v).map_err(|_| out_of_range(&v)),
                        // Exponent forms such as "5e3" only parse as floats.
                        Err(e) => match s.parse::<f64>() {
                            Ok(v) => from_f64(v),
                            Err(_) => Err(DecodeError::invalid($msg, e)),
                        },
                    },
                    Value::Number(n) => {
                        if let Some(v) = n.as_i64() {
                            return <$t>::try_from(v).map_err(|_| out_of_range(&v));
                        }
                        if let Some(v) = n.as_u64() {
                            return <$t>::try_from(v).map_err(|_| out_of_range(&v));
                        }
                        match n.as_f64() {
                            Some(v) => from_f64(v),
                            None => Err(DecodeError::unexpected($msg, &value)),
                        }
                    }
                    _ => Err(DecodeError::unexpected($msg, &value)),
                }
            }
        }
    };
}

/// Maps `i64` values to their decimal string wire form.
///
/// JSON numbers are 64-bit floats in most parsers and cannot carry the full
/// 64-bit integer range without rounding, so the APIs quote these values.
/// Parsing also accepts plain JSON numbers, including floats with a zero
/// fractional part, because some services and older clients send them.
///
/// # Examples
/// ```
/// # use google_apis_rep::{Codec, I64};
/// assert_eq!(I64::encode(&-123)?, serde_json::json!("-123"));
/// assert_eq!(I64::decode(serde_json::json!(-123))?, -123);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct I64;
impl_int64_codec!(I64, i64, "a 64-bit signed integer");

/// Maps `u64` values to their decimal string wire form.
///
/// The same quoting rules as [I64], for the unsigned range.
pub struct U64;
impl_int64_codec!(U64, u64, "a 64-bit unsigned integer");

/// Maps timestamps to their RFC 3339 wire form.
///
/// # Examples
/// ```
/// # use google_apis_rep::{Codec, Rfc3339};
/// let ts = Rfc3339::decode(serde_json::json!("2025-03-01T12:00:00Z"))?;
/// assert_eq!(ts.year(), 2025);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Rfc3339;

impl Codec for Rfc3339 {
    type Value = time::OffsetDateTime;
    const EXPECTING: &'static str = "an RFC 3339 timestamp";

    fn encode(value: &Self::Value) -> Result<Value, EncodeError> {
        value
            .format(&time::format_description::well_known::Rfc3339)
            .map(Value::String)
            .map_err(|e| EncodeError::invalid(Self::EXPECTING, e))
    }

    fn decode(value: Value) -> Result<Self::Value, DecodeError> {
        match value {
            Value::String(s) => time::OffsetDateTime::parse(
                &s,
                &time::format_description::well_known::Rfc3339,
            )
            .map_err(|e| DecodeError::invalid(Self::EXPECTING, e)),
            other => Err(DecodeError::unexpected(Self::EXPECTING, &other)),
        }
    }
}

/// Passes JSON values through unchanged.
///
/// Some schemas declare fields as arbitrary JSON, such as the
/// service-specific payloads inside long-running operations. Those fields
/// keep their wire form in memory.
///
/// A field holding a bare `Value::Null` encodes as absent, matching the
/// parse direction where a `null` field value means unset. Nulls nested
/// inside a set value's arrays and objects are data and travel unchanged.
pub struct Raw;

impl Codec for Raw {
    type Value = Value;
    const EXPECTING: &'static str = "a JSON value";

    fn encode(value: &Self::Value) -> Result<Value, EncodeError> {
        Ok(value.clone())
    }

    fn decode(value: Value) -> Result<Self::Value, DecodeError> {
        Ok(value)
    }
}

/// Recurses into a message with its own representation.
///
/// The nested representation is looked up when a value is converted, not when
/// the table is declared, so messages that contain themselves work.
pub struct Nested<N>(std::marker::PhantomData<N>);

impl<N: Representable> Codec for Nested<N> {
    type Value = N;
    const EXPECTING: &'static str = "an object";

    fn encode(value: &N) -> Result<Value, EncodeError> {
        N::representation().encode(value)
    }

    fn decode(value: Value) -> Result<N, DecodeError> {
        N::representation().decode(value)
    }
}

/// Maps repeated fields to JSON arrays, preserving element order.
///
/// Conversion is all or nothing: one bad element fails the whole array, and
/// the error names the offending position.
pub struct Repeated<C>(std::marker::PhantomData<C>);

impl<C: Codec> Codec for Repeated<C> {
    type Value = Vec<C::Value>;
    const EXPECTING: &'static str = "an array";

    fn encode(value: &Self::Value) -> Result<Value, EncodeError> {
        value
            .iter()
            .enumerate()
            .map(|(i, v)| C::encode(v).map_err(|e| EncodeError::element(i, e)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn decode(value: Value) -> Result<Self::Value, DecodeError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| C::decode(v).map_err(|e| DecodeError::element(i, e)))
                .collect(),
            other => Err(DecodeError::unexpected(Self::EXPECTING, &other)),
        }
    }
}

/// Maps string-keyed maps to JSON objects.
///
/// Keys pass through untouched; only the values go through `C`. As with
/// [Repeated], one bad entry fails the whole map.
pub struct MapOf<C>(std::marker::PhantomData<C>);

impl<C: Codec> Codec for MapOf<C> {
    type Value = HashMap<String, C::Value>;
    const EXPECTING: &'static str = "an object";

    fn encode(value: &Self::Value) -> Result<Value, EncodeError> {
        let mut map = serde_json::Map::new();
        for (k, v) in value {
            let encoded = C::encode(v).map_err(|e| EncodeError::entry(k.clone(), e))?;
            map.insert(k.clone(), encoded);
        }
        Ok(Value::Object(map))
    }

    fn decode(value: Value) -> Result<Self::Value, DecodeError> {
        match value {
            Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| match C::decode(v) {
                    Ok(decoded) => Ok((k, decoded)),
                    Err(e) => Err(DecodeError::entry(k, e)),
                })
                .collect(),
            other => Err(DecodeError::unexpected(Self::EXPECTING, &other)),
        }
    }
}
