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

//! Declaration tables mapping messages to and from JSON objects.

use crate::codec::{Codec, MapOf, Nested, Repeated};
use crate::error::{DecodeError, EncodeError};
use crate::representable::Representable;
use crate::scalar::Scalar;
use serde_json::Value;
use std::collections::HashMap;

type Map = serde_json::Map<String, Value>;

/// One mapped attribute: its wire name and its two conversion directions.
struct Field<M> {
    wire_name: &'static str,
    encode: Box<dyn Fn(&M) -> Result<Option<Value>, EncodeError> + Send + Sync>,
    decode: Box<dyn Fn(&mut M, Value) -> Result<(), DecodeError> + Send + Sync>,
}

/// Describes how a message type maps to and from a JSON object.
///
/// A representation is an ordered table of field declarations. Each entry
/// binds a JSON object key, its wire name, to one attribute of `M`, with a
/// [Codec] naming the wire form when the attribute does not travel as a plain
/// JSON primitive. The table is built once per type, kept in a static, and
/// then drives both [encode][Representation::encode] and
/// [decode][Representation::decode] without further allocation or lookup
/// beyond the table itself.
///
/// Declarations use the builder returned by
/// [builder][Representation::builder]. Attributes are `Option` on the message
/// struct: `None` means the field is unset and is omitted from the encoded
/// object, which is distinct from a field that is present but empty.
///
/// # Examples
/// ```
/// # use google_apis_rep::Representation;
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Bucket {
///     id: Option<String>,
///     size_bytes: Option<i64>,
/// }
///
/// let representation = Representation::builder("Bucket")
///     .property("id", |m: &Bucket| m.id.clone(), |m, v| m.id = Some(v))
///     .property_as::<google_apis_rep::I64>(
///         "sizeBytes",
///         |m: &Bucket| m.size_bytes,
///         |m, v| m.size_bytes = Some(v),
///     )
///     .build();
///
/// let bucket = Bucket {
///     id: Some("pictures".to_string()),
///     size_bytes: Some(1 << 40),
/// };
/// let encoded = representation.encode(&bucket)?;
/// assert_eq!(
///     encoded,
///     serde_json::json!({"id": "pictures", "sizeBytes": "1099511627776"})
/// );
/// assert_eq!(representation.decode(encoded)?, bucket);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Representation<M> {
    name: &'static str,
    fields: Vec<Field<M>>,
    index: HashMap<&'static str, usize>,
}

impl<M: 'static> Representation<M> {
    /// Starts declaring the representation of a message named `name`.
    ///
    /// The name is the schema name of the message, such as `Operation` or
    /// `Bucket`. It appears in panics for malformed declarations.
    pub fn builder(name: &'static str) -> RepresentationBuilder<M> {
        RepresentationBuilder {
            name,
            fields: Vec::new(),
        }
    }
}

impl<M> Representation<M> {
    /// The schema name of the message this table describes.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The wire names of the declared fields, in declaration order.
    pub fn wire_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.wire_name)
    }

    /// Serializes `message` into a JSON object.
    ///
    /// Only set attributes appear in the result. An unset message encodes as
    /// `{}`, and the keys follow the declared wire names. A field whose
    /// encoded value is a bare `null`, which only [Raw][crate::Raw] can
    /// produce, is omitted too: on this wire format an explicit `null` and an
    /// absent key mean the same thing. Errors name the field, and position
    /// within it, where the value could not be converted.
    pub fn encode(&self, message: &M) -> Result<Value, EncodeError> {
        let mut map = Map::new();
        for field in &self.fields {
            let value =
                (field.encode)(message).map_err(|e| EncodeError::field(field.wire_name, e))?;
            let Some(value) = value else {
                continue;
            };
            // A bare null means unset, same as an absent key.
            if value.is_null() {
                continue;
            }
            map.insert(field.wire_name.to_string(), value);
        }
        Ok(Value::Object(map))
    }

    /// Parses a JSON object into a new message.
    ///
    /// The message starts as `M::default()` and each key with a declared
    /// field sets the matching attribute. Keys with no declared field are
    /// skipped: services add fields over time, and payloads from a newer
    /// schema must still parse. A key that is absent, or explicitly `null`,
    /// leaves the attribute unset.
    ///
    /// Parsing is all or nothing. On the first conversion failure the
    /// partially built message is discarded and the error names the offending
    /// key.
    pub fn decode(&self, value: Value) -> Result<M, DecodeError>
    where
        M: Default,
    {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(DecodeError::unexpected("an object", &other)),
        };
        let mut message = M::default();
        for (key, value) in map {
            let Some(&position) = self.index.get(key.as_str()) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            (self.fields[position].decode)(&mut message, value)
                .map_err(|e| DecodeError::field(key, e))?;
        }
        Ok(message)
    }
}

impl<M> std::fmt::Debug for Representation<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Representation")
            .field("name", &self.name)
            .field("fields", &self.wire_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Declares the fields of a [Representation].
///
/// Fields are declared with a wire name and a pair of plain accessor
/// functions: a getter returning the attribute by value and a setter storing
/// a parsed value. Accessors are plain `fn` pointers, not closures over
/// state, which keeps the finished table `Send + Sync` and usable from a
/// static.
///
/// The declaration methods mirror the field kinds found in Google's API
/// schemas:
/// - [property][RepresentationBuilder::property] for scalar attributes;
/// - [property_as][RepresentationBuilder::property_as] for attributes with a
///   converted wire form, such as [I64][crate::I64] or
///   [Base64][crate::Base64];
/// - [nested][RepresentationBuilder::nested] for a message-typed attribute;
/// - [collection][RepresentationBuilder::collection],
///   [collection_as][RepresentationBuilder::collection_as], and
///   [collection_of][RepresentationBuilder::collection_of] for repeated
///   fields;
/// - [map][RepresentationBuilder::map] and
///   [map_as][RepresentationBuilder::map_as] for string-keyed maps.
pub struct RepresentationBuilder<M> {
    name: &'static str,
    fields: Vec<Field<M>>,
}

impl<M: 'static> RepresentationBuilder<M> {
    /// Declares a field whose wire form is produced by the codec `C`.
    pub fn property_as<C: Codec>(
        mut self,
        wire_name: &'static str,
        get: fn(&M) -> Option<C::Value>,
        set: fn(&mut M, C::Value),
    ) -> Self {
        self.fields.push(Field {
            wire_name,
            encode: Box::new(move |message| get(message).as_ref().map(C::encode).transpose()),
            decode: Box::new(move |message, value| {
                set(message, C::decode(value)?);
                Ok(())
            }),
        });
        self
    }

    /// Declares a scalar field.
    pub fn property<P: Scalar>(
        self,
        wire_name: &'static str,
        get: fn(&M) -> Option<P>,
        set: fn(&mut M, P),
    ) -> Self {
        self.property_as::<P>(wire_name, get, set)
    }

    /// Declares a field holding a nested message.
    pub fn nested<N: Representable>(
        self,
        wire_name: &'static str,
        get: fn(&M) -> Option<N>,
        set: fn(&mut M, N),
    ) -> Self {
        self.property_as::<Nested<N>>(wire_name, get, set)
    }

    /// Declares a repeated scalar field.
    pub fn collection<P: Scalar>(
        self,
        wire_name: &'static str,
        get: fn(&M) -> Option<Vec<P>>,
        set: fn(&mut M, Vec<P>),
    ) -> Self {
        self.property_as::<Repeated<P>>(wire_name, get, set)
    }

    /// Declares a repeated field whose elements go through the codec `C`.
    pub fn collection_as<C: Codec>(
        self,
        wire_name: &'static str,
        get: fn(&M) -> Option<Vec<C::Value>>,
        set: fn(&mut M, Vec<C::Value>),
    ) -> Self {
        self.property_as::<Repeated<C>>(wire_name, get, set)
    }

    /// Declares a repeated field of nested messages.
    pub fn collection_of<N: Representable>(
        self,
        wire_name: &'static str,
        get: fn(&M) -> Option<Vec<N>>,
        set: fn(&mut M, Vec<N>),
    ) -> Self {
        self.property_as::<Repeated<Nested<N>>>(wire_name, get, set)
    }

    /// Declares a string-keyed map field with scalar values.
    pub fn map<P: Scalar>(
        self,
        wire_name: &'static str,
        get: fn(&M) -> Option<HashMap<String, P>>,
        set: fn(&mut M, HashMap<String, P>),
    ) -> Self {
        self.property_as::<MapOf<P>>(wire_name, get, set)
    }

    /// Declares a string-keyed map field whose values go through the codec
    /// `C`.
    pub fn map_as<C: Codec>(
        self,
        wire_name: &'static str,
        get: fn(&M) -> Option<HashMap<String, C::Value>>,
        set: fn(&mut M, HashMap<String, C::Value>),
    ) -> Self {
        self.property_as::<MapOf<C>>(wire_name, get, set)
    }

    /// Finishes the declaration.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a wire name. Representations are fixed
    /// tables declared alongside the type, so a duplicate is a bug in the
    /// declaring code, not a runtime condition.
    pub fn build(self) -> Representation<M> {
        let mut index = HashMap::with_capacity(self.fields.len());
        for (position, field) in self.fields.iter().enumerate() {
            if index.insert(field.wire_name, position).is_some() {
                panic!(
                    "duplicate wire name `{}` declared for {}",
                    field.wire_name, self.name
                );
            }
        }
        Representation {
            name: self.name,
            fields: self.fields,
            index,
        }
    }
}
