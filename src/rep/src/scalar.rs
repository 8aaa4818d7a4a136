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

//! Scalar attribute types and their JSON forms.

use crate::error::{DecodeError, EncodeError};
use serde_json::Value;

pub(crate) mod sealed {
    pub trait Scalar {}
    impl Scalar for String {}
    impl Scalar for bool {}
    impl Scalar for i32 {}
    impl Scalar for u32 {}
    impl Scalar for i64 {}
    impl Scalar for u64 {}
    impl Scalar for f32 {}
    impl Scalar for f64 {}
}

/// A type that travels directly as a JSON primitive.
///
/// Scalar attributes map to the matching JSON type with no conversion:
/// strings to JSON strings, booleans to JSON booleans, and numbers to JSON
/// numbers. Parsing verifies the JSON type and rejects anything else. There
/// is no coercion: `"42"` does not parse into an integer field. Fields that
/// travel in a converted form, such as 64-bit integers as decimal strings,
/// declare a codec instead.
///
/// Implemented for `String`, `bool`, `i32`, `u32`, `i64`, `u64`, `f32`, and
/// `f64`. This trait is sealed and cannot be implemented outside this crate.
pub trait Scalar:
    Clone + std::fmt::Debug + Send + Sync + Sized + sealed::Scalar + 'static
{
    /// The phrase naming this type in diagnostics.
    const EXPECTING: &'static str;

    /// Converts `self` to its JSON form.
    fn to_value(&self) -> Result<Value, EncodeError>;

    /// Converts a JSON value back, verifying its type.
    fn from_value(value: Value) -> Result<Self, DecodeError>;
}

impl Scalar for String {
    const EXPECTING: &'static str = "a string";

    fn to_value(&self) -> Result<Value, EncodeError> {
        Ok(Value::String(self.clone()))
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(DecodeError::unexpected(Self::EXPECTING, &other)),
        }
    }
}

impl Scalar for bool {
    const EXPECTING: &'static str = "a boolean";

    fn to_value(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bool(*self))
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(DecodeError::unexpected(Self::EXPECTING, &other)),
        }
    }
}

macro_rules! impl_scalar_int {
    ($t:ty, $as_wide:ident, $msg:literal) => {
        impl Scalar for $t {
            const EXPECTING: &'static str = $msg;

            fn to_value(&self) -> Result<Value, EncodeError> {
                Ok(Value::from(*self))
            }

            fn from_value(value: Value) -> Result<Self, DecodeError> {
                match value.$as_wide() {
                    Some(v) => <$t>::try_from(v)
                        .map_err(|_| DecodeError::invalid($msg, format!("{v} is out of range"))),
                    None => Err(DecodeError::unexpected(Self::EXPECTING, &value)),
                }
            }
        }
    };
}

impl_scalar_int!(i32, as_i64, "a 32-bit signed integer");
impl_scalar_int!(u32, as_u64, "a 32-bit unsigned integer");
impl_scalar_int!(i64, as_i64, "a 64-bit signed integer");
impl_scalar_int!(u64, as_u64, "a 64-bit unsigned integer");

impl Scalar for f32 {
    const EXPECTING: &'static str = "a 32-bit floating point number";

    fn to_value(&self) -> Result<Value, EncodeError> {
        number_from_f64(*self as f64)
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        // Parsing through f64 loses nothing: every JSON number that fits in
        // an f32 also fits in an f64.
        match value.as_f64() {
            Some(v) => Ok(v as f32),
            None => Err(DecodeError::unexpected(Self::EXPECTING, &value)),
        }
    }
}

impl Scalar for f64 {
    const EXPECTING: &'static str = "a 64-bit floating point number";

    fn to_value(&self) -> Result<Value, EncodeError> {
        number_from_f64(*self)
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value.as_f64() {
            Some(v) => Ok(v),
            None => Err(DecodeError::unexpected(Self::EXPECTING, &value)),
        }
    }
}

// JSON has no representation for NaN or the infinities, and `Value::from`
// would silently turn them into `Value::Null`.
fn number_from_f64(value: f64) -> Result<Value, EncodeError> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or(EncodeError::NonFinite { value })
}
