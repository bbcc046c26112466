//! Canonical encoding and hashing of request bodies
//!
//! The wallet-auth token binds the request body through `reqHash`: the body is
//! canonicalized (object keys sorted by code point at every depth, big numbers rendered as
//! decimal strings, never-provided fields dropped), serialized as compact JSON and hashed
//! with SHA-256. The server recomputes the same digest, so the encoding must be stable.

use crate::types::{BodyValue, Field, RequestBody};
use crate::Result;
use serde::Serialize;
use serde_json::Number;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Largest integer a double represents exactly (2^53)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A body value in canonical form
///
/// Objects are `BTreeMap`s, so serialization always emits keys in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<CanonicalValue>),
    Object(BTreeMap<String, CanonicalValue>),
}

/// Canonicalize a single body value
pub fn canonicalize(value: &BodyValue) -> CanonicalValue {
    match value {
        BodyValue::Null => CanonicalValue::Null,
        BodyValue::Bool(flag) => CanonicalValue::Bool(*flag),
        BodyValue::Number(number) => CanonicalValue::Number(normalize_number(number)),
        BodyValue::String(text) => CanonicalValue::String(text.clone()),
        BodyValue::BigNumber(big) => CanonicalValue::String(big.to_string()),
        BodyValue::Array(items) => CanonicalValue::Array(items.iter().map(canonicalize).collect()),
        BodyValue::Object(body) => canonicalize_body(body),
    }
}

/// Canonicalize a body mapping, dropping [`Field::Missing`] entries
pub fn canonicalize_body(body: &RequestBody) -> CanonicalValue {
    CanonicalValue::Object(
        body.iter()
            .filter_map(|(key, field)| match field {
                Field::Missing => None,
                Field::Value(value) => Some((key.to_string(), canonicalize(value))),
            })
            .collect(),
    )
}

/// Integral floats serialize as integers (`1.0` -> `1`), matching JavaScript clients
fn normalize_number(number: &Number) -> Number {
    if number.is_f64() {
        if let Some(float) = number.as_f64() {
            if float.fract() == 0.0 && float.abs() < MAX_SAFE_INTEGER {
                return Number::from(float as i64);
            }
        }
    }
    number.clone()
}

impl From<CanonicalValue> for BodyValue {
    fn from(value: CanonicalValue) -> Self {
        match value {
            CanonicalValue::Null => BodyValue::Null,
            CanonicalValue::Bool(flag) => BodyValue::Bool(flag),
            CanonicalValue::Number(number) => BodyValue::Number(number),
            CanonicalValue::String(text) => BodyValue::String(text),
            CanonicalValue::Array(items) => {
                BodyValue::Array(items.into_iter().map(BodyValue::from).collect())
            }
            CanonicalValue::Object(map) => {
                let mut body = RequestBody::new();
                for (key, value) in map {
                    body.insert(key, Field::Value(BodyValue::from(value)));
                }
                BodyValue::Object(body)
            }
        }
    }
}

/// Compact JSON of the canonical form of `body`
pub fn canonical_json(body: &RequestBody) -> Result<String> {
    Ok(serde_json::to_string(&canonicalize_body(body))?)
}

/// SHA-256 of `input`, lowercase hex (always 64 characters)
pub fn sha256_hex(input: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(input.as_ref()))
}

/// Hash a request body for the `reqHash` claim
///
/// Returns `None` when the body has no field carrying a value (empty, or only
/// never-provided fields). Explicit `null`, `""`, `0` and `false` do produce a hash.
pub fn hash_request(body: &RequestBody) -> Result<Option<String>> {
    if !body.has_meaningful_entries() {
        return Ok(None);
    }

    let json = canonical_json(body)?;
    Ok(Some(sha256_hex(json)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BigNumber;
    use ethereum_types::U256;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            sha256_hex("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_keys_sorted_recursively() {
        let body = RequestBody::new()
            .field("zebra", 1)
            .field(
                "outer",
                RequestBody::new().field("z", true).field("a", "x"),
            )
            .field("apple", 2);

        assert_eq!(
            canonical_json(&body).unwrap(),
            r#"{"apple":2,"outer":{"a":"x","z":true},"zebra":1}"#
        );
    }

    #[test]
    fn test_keys_sorted_inside_arrays_and_order_preserved() {
        let body = RequestBody::new().field(
            "items",
            vec![
                BodyValue::from(RequestBody::new().field("z", 1).field("a", 2)),
                BodyValue::from(3),
                BodyValue::from(vec![BodyValue::from(
                    RequestBody::new().field("y", 1).field("b", 2),
                )]),
            ],
        );

        assert_eq!(
            canonical_json(&body).unwrap(),
            r#"{"items":[{"a":2,"z":1},3,[{"b":2,"y":1}]]}"#
        );
    }

    #[test]
    fn test_keys_sorted_by_code_point() {
        let body = RequestBody::new()
            .field("b", 1)
            .field("B", 2)
            .field("a", 3)
            .field("_", 4);

        assert_eq!(
            canonical_json(&body).unwrap(),
            r#"{"B":2,"_":4,"a":3,"b":1}"#
        );
    }

    #[test]
    fn test_big_numbers_become_decimal_strings() {
        let body = RequestBody::new()
            .field(
                "value",
                U256::from_dec_str("1000000000000000000000000").unwrap(),
            )
            .field("price", Decimal::from_str("123.456").unwrap())
            .field("plain", 7);

        assert_eq!(
            canonical_json(&body).unwrap(),
            r#"{"plain":7,"price":"123.456","value":"1000000000000000000000000"}"#
        );
        assert_eq!(
            canonicalize(&BodyValue::BigNumber(BigNumber::Integer(U256::zero()))),
            CanonicalValue::String("0".to_string())
        );
    }

    #[test]
    fn test_integral_floats_serialize_as_integers() {
        let body = RequestBody::new().field("a", 1.0).field("b", 1.5).field("c", -0.0);
        assert_eq!(canonical_json(&body).unwrap(), r#"{"a":1,"b":1.5,"c":0}"#);
    }

    #[test]
    fn test_missing_fields_dropped_at_every_level() {
        let body = RequestBody::new()
            .field("name", "acct")
            .missing("policy")
            .field("nested", RequestBody::new().missing("x").field("y", 1));

        assert_eq!(
            canonical_json(&body).unwrap(),
            r#"{"name":"acct","nested":{"y":1}}"#
        );
    }

    #[test]
    fn test_hash_is_order_independent() {
        let first = RequestBody::new()
            .field("a", 1)
            .field("b", RequestBody::new().field("y", 2).field("x", 1));
        let second = RequestBody::new()
            .field("b", RequestBody::new().field("x", 1).field("y", 2))
            .field("a", 1);

        assert_eq!(
            hash_request(&first).unwrap(),
            hash_request(&second).unwrap()
        );
    }

    #[test]
    fn test_absent_versus_null() {
        assert_eq!(hash_request(&RequestBody::new()).unwrap(), None);
        assert_eq!(
            hash_request(&RequestBody::new().missing("name")).unwrap(),
            None
        );

        let null_hash = hash_request(&RequestBody::new().null("name")).unwrap();
        assert_eq!(null_hash, Some(sha256_hex(r#"{"name":null}"#)));
    }

    #[test]
    fn test_falsy_values_are_meaningful() {
        for (body, json) in [
            (RequestBody::new().field("name", ""), r#"{"name":""}"#),
            (RequestBody::new().field("count", 0), r#"{"count":0}"#),
            (RequestBody::new().field("flag", false), r#"{"flag":false}"#),
        ] {
            assert_eq!(hash_request(&body).unwrap(), Some(sha256_hex(json)));
        }
    }

    #[test]
    fn test_cross_language_fixture() {
        // Shared fixture: every client must produce this exact string and digest
        let body = RequestBody::from_json(json!({
            "name": "test-account",
            "accountPolicy": null,
            "metadata": {"tier": 1, "active": true, "tags": ["b", "a"]}
        }))
        .unwrap();

        let json = canonical_json(&body).unwrap();
        assert_eq!(
            json,
            r#"{"accountPolicy":null,"metadata":{"active":true,"tags":["b","a"],"tier":1},"name":"test-account"}"#
        );

        let hash = hash_request(&body).unwrap().unwrap();
        assert_eq!(hash, sha256_hex(&json));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_unicode_is_not_escaped() {
        let body = RequestBody::new().field("label", "café <&>");
        assert_eq!(canonical_json(&body).unwrap(), r#"{"label":"café <&>"}"#);
    }

    fn arb_value() -> impl Strategy<Value = BodyValue> {
        let leaf = prop_oneof![
            Just(BodyValue::Null),
            any::<bool>().prop_map(BodyValue::from),
            any::<i64>().prop_map(BodyValue::from),
            "[a-z]{0,6}".prop_map(BodyValue::from),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(BodyValue::Array),
                prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                    .prop_map(|entries| BodyValue::Object(body_from(entries))),
            ]
        })
    }

    fn body_from(entries: Vec<(String, BodyValue)>) -> RequestBody {
        let mut body = RequestBody::new();
        for (key, value) in entries {
            body.insert(key, Field::Value(value));
        }
        body
    }

    proptest! {
        #[test]
        fn prop_hash_ignores_insertion_order(
            entries in prop::collection::vec(("[a-z]{1,4}", arb_value()), 1..6)
        ) {
            // Later duplicates overwrite earlier ones, so dedupe before reversing
            let mut unique: Vec<(String, BodyValue)> = Vec::new();
            for (key, value) in entries {
                match unique.iter_mut().find(|(existing, _)| *existing == key) {
                    Some(slot) => slot.1 = value,
                    None => unique.push((key, value)),
                }
            }
            let forward = body_from(unique.clone());
            let reversed = body_from(unique.into_iter().rev().collect());

            prop_assert_eq!(hash_request(&forward).unwrap(), hash_request(&reversed).unwrap());
        }

        #[test]
        fn prop_canonicalize_is_idempotent(value in arb_value()) {
            let once = canonicalize(&value);
            let twice = canonicalize(&BodyValue::from(once.clone()));
            prop_assert_eq!(once, twice);
        }
    }
}
