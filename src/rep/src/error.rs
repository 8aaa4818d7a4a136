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

//! Errors reported while mapping messages to and from JSON.

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Represents failures to serialize a message into JSON.
///
/// Encoding works from values that are already well typed, so most fields
/// cannot fail. The exceptions are values with no JSON form, such as
/// non-finite floating point numbers, and codecs whose wire conversion can
/// reject a value. The wrapping variants record where in the message the
/// failure happened as the error propagates out.
///
/// # Examples
/// ```
/// # use google_apis_rep::EncodeError;
/// let error = EncodeError::field("ratio", EncodeError::NonFinite { value: f64::NAN });
/// assert_eq!(error.to_string(), "in field `ratio`: NaN has no JSON number form");
/// ```
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EncodeError {
    /// A floating point value cannot be written as a JSON number.
    #[error("{value} has no JSON number form")]
    NonFinite {
        /// The offending value.
        value: f64,
    },

    /// A codec rejected the in-memory value.
    #[error("cannot encode {expecting}: {source}")]
    Invalid {
        /// The wire form the field's codec produces.
        expecting: &'static str,
        #[source]
        source: BoxedError,
    },

    /// Identifies the field where a nested error was detected.
    #[error("in field `{wire_name}`: {source}")]
    Field {
        /// The wire name of the offending field.
        wire_name: String,
        #[source]
        source: Box<EncodeError>,
    },

    /// Identifies the collection element where a nested error was detected.
    #[error("at element {index}: {source}")]
    Element {
        /// The zero-based position of the offending element.
        index: usize,
        #[source]
        source: Box<EncodeError>,
    },

    /// Identifies the map entry where a nested error was detected.
    #[error("in entry `{key}`: {source}")]
    Entry {
        /// The key of the offending entry.
        key: String,
        #[source]
        source: Box<EncodeError>,
    },
}

impl EncodeError {
    /// Creates an error for a value a codec cannot represent.
    pub fn invalid<T: Into<BoxedError>>(expecting: &'static str, source: T) -> Self {
        EncodeError::Invalid {
            expecting,
            source: source.into(),
        }
    }

    /// Adds the wire name of the field where `source` was detected.
    pub fn field<T: Into<String>>(wire_name: T, source: EncodeError) -> Self {
        EncodeError::Field {
            wire_name: wire_name.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn element(index: usize, source: EncodeError) -> Self {
        EncodeError::Element {
            index,
            source: Box::new(source),
        }
    }

    pub(crate) fn entry<T: Into<String>>(key: T, source: EncodeError) -> Self {
        EncodeError::Entry {
            key: key.into(),
            source: Box::new(source),
        }
    }
}

/// Represents failures to parse a message out of a JSON document.
///
/// Parsing fails when a JSON value does not have the type a field calls for,
/// or when the value has the right type but its content is malformed, such as
/// a string that is not valid base64 on a byte field. The wrapping variants
/// record where in the document the failure happened. These errors indicate a
/// mismatch between the declared schema and the payload; retrying the call
/// that produced the payload does not fix them.
///
/// Two conditions are deliberately *not* errors: keys with no matching field
/// are ignored, and fields absent from the document are left unset. Services
/// add fields over time and clients built from older schemas must keep
/// working.
///
/// # Examples
/// ```
/// # use google_apis_rep::DecodeError;
/// let error = DecodeError::unexpected("a string", &serde_json::json!(42));
/// assert_eq!(error.to_string(), "expected a string, found a number");
/// ```
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// The JSON value does not have the type the field calls for.
    #[error("expected {expecting}, found {found}")]
    UnexpectedType {
        /// The wire form the field's codec consumes.
        expecting: &'static str,
        /// The JSON type of the value found in the document.
        found: &'static str,
    },

    /// The JSON value has the right type but the codec rejected its content.
    #[error("cannot decode {expecting}: {source}")]
    Invalid {
        /// The wire form the field's codec consumes.
        expecting: &'static str,
        #[source]
        source: BoxedError,
    },

    /// Identifies the field where a nested error was detected.
    #[error("in field `{wire_name}`: {source}")]
    Field {
        /// The wire name of the offending field.
        wire_name: String,
        #[source]
        source: Box<DecodeError>,
    },

    /// Identifies the collection element where a nested error was detected.
    #[error("at element {index}: {source}")]
    Element {
        /// The zero-based position of the offending element.
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },

    /// Identifies the map entry where a nested error was detected.
    #[error("in entry `{key}`: {source}")]
    Entry {
        /// The key of the offending entry.
        key: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Creates an error for a JSON value of the wrong type.
    pub fn unexpected(expecting: &'static str, found: &serde_json::Value) -> Self {
        DecodeError::UnexpectedType {
            expecting,
            found: value_kind(found),
        }
    }

    /// Creates an error for a well-typed JSON value with malformed content.
    pub fn invalid<T: Into<BoxedError>>(expecting: &'static str, source: T) -> Self {
        DecodeError::Invalid {
            expecting,
            source: source.into(),
        }
    }

    /// Adds the wire name of the field where `source` was detected.
    pub fn field<T: Into<String>>(wire_name: T, source: DecodeError) -> Self {
        DecodeError::Field {
            wire_name: wire_name.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn element(index: usize, source: DecodeError) -> Self {
        DecodeError::Element {
            index,
            source: Box::new(source),
        }
    }

    pub(crate) fn entry<T: Into<String>>(key: T, source: DecodeError) -> Self {
        DecodeError::Entry {
            key: key.into(),
            source: Box::new(source),
        }
    }
}

/// The JSON type of `value`, as it appears in diagnostics.
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
