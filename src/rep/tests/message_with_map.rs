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

#[cfg(test)]
mod test {
    use google_apis_rep::{I64, Nested, Representable, Representation};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::LazyLock;

    type Result = anyhow::Result<()>;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Quota {
        limit: Option<i64>,
        exhausted: Option<bool>,
    }

    impl Representable for Quota {
        fn representation() -> &'static Representation<Self> {
            static REPRESENTATION: LazyLock<Representation<Quota>> = LazyLock::new(|| {
                Representation::builder("Quota")
                    .property_as::<I64>("limit", |m: &Quota| m.limit, |m, v| m.limit = Some(v))
                    .property(
                        "exhausted",
                        |m: &Quota| m.exhausted,
                        |m, v| m.exhausted = Some(v),
                    )
                    .build()
            });
            &REPRESENTATION
        }
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct MessageWithMap {
        labels: Option<HashMap<String, String>>,
        usage: Option<HashMap<String, i64>>,
        quotas: Option<HashMap<String, Quota>>,
    }

    impl Representable for MessageWithMap {
        fn representation() -> &'static Representation<Self> {
            static REPRESENTATION: LazyLock<Representation<MessageWithMap>> =
                LazyLock::new(|| {
                    Representation::builder("MessageWithMap")
                        .map(
                            "labels",
                            |m: &MessageWithMap| m.labels.clone(),
                            |m, v| m.labels = Some(v),
                        )
                        .map_as::<I64>(
                            "usage",
                            |m: &MessageWithMap| m.usage.clone(),
                            |m, v| m.usage = Some(v),
                        )
                        .map_as::<Nested<Quota>>(
                            "quotas",
                            |m: &MessageWithMap| m.quotas.clone(),
                            |m, v| m.quotas = Some(v),
                        )
                        .build()
                });
            &REPRESENTATION
        }
    }

    #[test]
    fn roundtrip_string_map() -> Result {
        let message = MessageWithMap {
            labels: Some(HashMap::from([
                ("env".to_string(), "prod".to_string()),
                ("team".to_string(), "storage".to_string()),
            ])),
            ..Default::default()
        };
        let encoded = google_apis_rep::encode(&message)?;
        assert_eq!(
            encoded,
            json!({"labels": {"env": "prod", "team": "storage"}})
        );
        assert_eq!(google_apis_rep::decode::<MessageWithMap>(encoded)?, message);
        Ok(())
    }

    #[test]
    fn empty_map_is_kept() -> Result {
        let message = MessageWithMap {
            labels: Some(HashMap::new()),
            ..Default::default()
        };
        let encoded = google_apis_rep::encode(&message)?;
        assert_eq!(encoded, json!({"labels": {}}));
        let got: MessageWithMap = google_apis_rep::decode(encoded)?;
        assert_eq!(got.labels, Some(HashMap::new()));
        Ok(())
    }

    #[test]
    fn roundtrip_quoted_map_values() -> Result {
        let message = MessageWithMap {
            usage: Some(HashMap::from([("objects".to_string(), 1_i64 << 33)])),
            ..Default::default()
        };
        let encoded = google_apis_rep::encode(&message)?;
        assert_eq!(encoded, json!({"usage": {"objects": "8589934592"}}));
        assert_eq!(google_apis_rep::decode::<MessageWithMap>(encoded)?, message);
        Ok(())
    }

    #[test]
    fn roundtrip_message_map_values() -> Result {
        let message = MessageWithMap {
            quotas: Some(HashMap::from([(
                "us-west1".to_string(),
                Quota {
                    limit: Some(100),
                    exhausted: Some(false),
                },
            )])),
            ..Default::default()
        };
        let encoded = google_apis_rep::encode(&message)?;
        assert_eq!(
            encoded,
            json!({"quotas": {"us-west1": {"limit": "100", "exhausted": false}}})
        );
        assert_eq!(google_apis_rep::decode::<MessageWithMap>(encoded)?, message);
        Ok(())
    }

    #[test]
    fn entry_errors_name_key_and_field() {
        let err = google_apis_rep::decode::<MessageWithMap>(json!({
            "quotas": {"us-west1": {"limit": "lots"}},
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "in field `quotas`: in entry `us-west1`: in field `limit`: \
             cannot decode a 64-bit signed integer: invalid digit found in string"
        );
    }

    #[test]
    fn maps_must_be_objects() {
        let err = google_apis_rep::decode::<MessageWithMap>(json!({"labels": ["env", "prod"]}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "in field `labels`: expected an object, found an array"
        );
    }
}
