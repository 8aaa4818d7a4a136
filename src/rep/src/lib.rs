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

//! Declarative JSON representations for generated API clients.
//!
//! Generated bindings for Google's REST APIs ship two things per resource:
//! a plain data struct, and a table describing how that struct's attributes
//! travel as keys of a JSON object. This crate is the table side. A
//! [Representation] is declared once per message type from a small
//! vocabulary of field kinds, and a single engine serializes or parses any
//! declared type by walking its table. The structs stay free of conversion
//! logic and the generator emits no per-type serialization code.
//!
//! The wire conventions are those of Google's published REST APIs:
//! - unset attributes are omitted from encoded objects, never sent as
//!   `null`;
//! - unknown keys in a payload are ignored, so a client built from an older
//!   schema keeps working when the service adds fields;
//! - 64-bit integers travel as decimal strings ([I64], [U64]);
//! - byte payloads travel as base64 strings ([Base64]);
//! - timestamps travel as RFC 3339 strings ([Rfc3339]).
//!
//! Tables are immutable after construction and safe to share across
//! threads. The crate performs no I/O: callers bring their own transport
//! and hand over [serde_json::Value] payloads.
//!
//! # Declaring a representation
//!
//! ```
//! # use google_apis_rep::{Representable, Representation};
//! use std::sync::LazyLock;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Blob {
//!     name: Option<String>,
//!     generation: Option<i64>,
//!     data: Option<bytes::Bytes>,
//! }
//!
//! impl Representable for Blob {
//!     fn representation() -> &'static Representation<Self> {
//!         static REPRESENTATION: LazyLock<Representation<Blob>> = LazyLock::new(|| {
//!             Representation::builder("Blob")
//!                 .property("name", |m: &Blob| m.name.clone(), |m, v| m.name = Some(v))
//!                 .property_as::<google_apis_rep::I64>(
//!                     "generation",
//!                     |m: &Blob| m.generation,
//!                     |m, v| m.generation = Some(v),
//!                 )
//!                 .property_as::<google_apis_rep::Base64>(
//!                     "data",
//!                     |m: &Blob| m.data.clone(),
//!                     |m, v| m.data = Some(v),
//!                 )
//!                 .build()
//!         });
//!         &REPRESENTATION
//!     }
//! }
//!
//! let blob = Blob {
//!     name: Some("greeting".to_string()),
//!     generation: Some(3),
//!     data: Some(bytes::Bytes::from_static(b"hello")),
//! };
//! let encoded = google_apis_rep::encode(&blob)?;
//! assert_eq!(
//!     encoded,
//!     serde_json::json!({"name": "greeting", "generation": "3", "data": "aGVsbG8="})
//! );
//! assert_eq!(google_apis_rep::decode::<Blob>(encoded)?, blob);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod codec;
pub use crate::codec::*;
mod error;
pub use crate::error::*;
mod representable;
pub use crate::representable::*;
mod representation;
pub use crate::representation::*;
mod scalar;
pub use crate::scalar::*;
