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

//! Messages with a declared representation.

use crate::error::{DecodeError, EncodeError};
use crate::representation::Representation;
use serde_json::Value;

/// A message type with a declared JSON representation.
///
/// Implementations build their [Representation] once, behind a
/// [LazyLock][std::sync::LazyLock], and hand out the same table for the life
/// of the process. The table itself is immutable and `Send + Sync`, so the
/// type can be converted from any thread.
///
/// The `Default` value must leave every declared attribute unset, that is,
/// every `Option` at `None`. Parsing starts from `M::default()` and only
/// touches attributes present in the payload; an attribute defaulted to
/// `Some(..)` would make omitted fields indistinguishable from sent ones.
///
/// # Examples
/// ```
/// # use google_apis_rep::{Representable, Representation};
/// use std::sync::LazyLock;
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Color {
///     red: Option<i32>,
///     green: Option<i32>,
///     blue: Option<i32>,
/// }
///
/// impl Representable for Color {
///     fn representation() -> &'static Representation<Self> {
///         static REPRESENTATION: LazyLock<Representation<Color>> = LazyLock::new(|| {
///             Representation::builder("Color")
///                 .property("red", |m: &Color| m.red, |m, v| m.red = Some(v))
///                 .property("green", |m: &Color| m.green, |m, v| m.green = Some(v))
///                 .property("blue", |m: &Color| m.blue, |m, v| m.blue = Some(v))
///                 .build()
///         });
///         &REPRESENTATION
///     }
/// }
///
/// let color = Color {
///     red: Some(127),
///     green: None,
///     blue: Some(255),
/// };
/// let encoded = google_apis_rep::encode(&color)?;
/// assert_eq!(encoded, serde_json::json!({"red": 127, "blue": 255}));
/// assert_eq!(google_apis_rep::decode::<Color>(encoded)?, color);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Representable: Default + Sized + 'static {
    /// The representation mapping this message to and from JSON.
    fn representation() -> &'static Representation<Self>;
}

/// Serializes `message` into a JSON object using its declared representation.
///
/// Unset attributes are omitted from the result.
pub fn encode<M: Representable>(message: &M) -> Result<Value, EncodeError> {
    M::representation().encode(message)
}

/// Parses a JSON object into an `M` using its declared representation.
///
/// Keys with no declared field are ignored, and absent or `null` fields are
/// left unset.
pub fn decode<M: Representable>(value: Value) -> Result<M, DecodeError> {
    M::representation().decode(value)
}
