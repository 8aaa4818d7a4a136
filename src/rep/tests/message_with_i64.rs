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
    use google_apis_rep::{I64, Representable, Representation, U64};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::LazyLock;
    use test_case::test_case;

    type Result = anyhow::Result<()>;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct MessageWithI64 {
        singular: Option<i64>,
        unsigned: Option<u64>,
        repeated: Option<Vec<i64>>,
        map_value: Option<HashMap<String, i64>>,
    }

    impl Representable for MessageWithI64 {
        fn representation() -> &'static Representation<Self> {
            static REPRESENTATION: LazyLock<Representation<MessageWithI64>> =
                LazyLock::new(|| {
                    Representation::builder("MessageWithI64")
                        .property_as::<I64>(
                            "singular",
                            |m: &MessageWithI64| m.singular,
                            |m, v| m.singular = Some(v),
                        )
                        .property_as::<U64>(
                            "unsigned",
                            |m: &MessageWithI64| m.unsigned,
                            |m, v| m.unsigned = Some(v),
                        )
                        .collection_as::<I64>(
                            "repeated",
                            |m: &MessageWithI64| m.repeated.clone(),
                            |m, v| m.repeated = Some(v),
                        )
                        .map_as::<I64>(
                            "mapValue",
                            |m: &MessageWithI64| m.map_value.clone(),
                            |m, v| m.map_value = Some(v),
                        )
                        .build()
                });
            &REPRESENTATION
        }
    }

    // 1 << 60 does not fit in the 52-bit mantissa of a JSON number, so it
    // must travel as a string to survive a JavaScript peer.
    const TEST_VALUE: i64 = 1_i64 << 60;

    #[test_case(0, "0")]
    #[test_case(TEST_VALUE, "1152921504606846976")]
    #[test_case(i64::MAX, "9223372036854775807")]
    #[test_case(i64::MIN, "-9223372036854775808")]
    fn encode_quotes_singular(input: i64, want: &str) -> Result {
        let message = MessageWithI64 {
            singular: Some(input),
            ..Default::default()
        };
        assert_eq!(
            google_apis_rep::encode(&message)?,
            json!({"singular": want})
        );
        Ok(())
    }

    #[test_case(json!("123"), 123; "quoted")]
    #[test_case(json!(456), 456; "bare number")]
    #[test_case(json!("-789"), -789; "negative quoted")]
    #[test_case(json!(789.0), 789; "float with zero fraction")]
    #[test_case(json!("9223372036854775807"), i64::MAX; "max")]
    #[test_case(json!("-9223372036854775808"), i64::MIN; "min")]
    fn decode_accepts_either_form(input: Value, want: i64) -> Result {
        let got: MessageWithI64 = google_apis_rep::decode(json!({"singular": input}))?;
        assert_eq!(got.singular, Some(want));
        Ok(())
    }

    #[test]
    fn roundtrip_extremes() -> Result {
        let message = MessageWithI64 {
            singular: Some(i64::MIN),
            unsigned: Some(u64::MAX),
            ..Default::default()
        };
        let encoded = google_apis_rep::encode(&message)?;
        assert_eq!(
            encoded,
            json!({
                "singular": "-9223372036854775808",
                "unsigned": "18446744073709551615",
            })
        );
        assert_eq!(google_apis_rep::decode::<MessageWithI64>(encoded)?, message);
        Ok(())
    }

    #[test]
    fn roundtrip_repeated() -> Result {
        let message = MessageWithI64 {
            repeated: Some(vec![1, -2, TEST_VALUE]),
            ..Default::default()
        };
        let encoded = google_apis_rep::encode(&message)?;
        assert_eq!(
            encoded,
            json!({"repeated": ["1", "-2", "1152921504606846976"]})
        );
        assert_eq!(google_apis_rep::decode::<MessageWithI64>(encoded)?, message);
        Ok(())
    }

    #[test]
    fn roundtrip_map_values() -> Result {
        let message = MessageWithI64 {
            map_value: Some(HashMap::from([
                ("used".to_string(), 1_i64 << 40),
                ("quota".to_string(), 1_i64 << 50),
            ])),
            ..Default::default()
        };
        let encoded = google_apis_rep::encode(&message)?;
        assert_eq!(
            encoded,
            json!({
                "mapValue": {
                    "used": "1099511627776",
                    "quota": "1125899906842624",
                }
            })
        );
        assert_eq!(google_apis_rep::decode::<MessageWithI64>(encoded)?, message);
        Ok(())
    }

    #[test_case(json!({"singular": "abc"}); "not a number")]
    #[test_case(json!({"singular": "9223372036854775808"}); "overflow")]
    #[test_case(json!({"singular": "12.3"}); "fractional string")]
    #[test_case(json!({"singular": 12.3}); "fractional number")]
    #[test_case(json!({"singular": true}); "boolean")]
    #[test_case(json!({"unsigned": "-1"}); "negative unsigned")]
    #[test_case(json!({"repeated": ["1", "abc"]}); "bad element")]
    fn decode_errors(input: Value) {
        let err = google_apis_rep::decode::<MessageWithI64>(input).unwrap_err();
        assert!(
            err.to_string().contains("64-bit"),
            "unexpected {err:?}"
        );
    }

    #[test]
    fn decode_errors_name_the_field() {
        let err =
            google_apis_rep::decode::<MessageWithI64>(json!({"singular": "abc"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "in field `singular`: cannot decode a 64-bit signed integer: invalid digit found in string"
        );
    }
}
