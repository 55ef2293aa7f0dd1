//! JSON value traversal.

use rand::Rng;
use serde_json::Value;

use crate::errors::{MaskError, MaskResult};
use crate::masking::MaskingEngine;

/// Transform every string value in a JSON document. Keys and non-string
/// scalars are untouched. The document is re-serialized pretty-printed.
pub(crate) fn transform_json<R: Rng>(
    content: &str,
    engine: &MaskingEngine,
    rng: &mut R,
) -> MaskResult<(String, usize)> {
    let mut value: Value =
        serde_json::from_str(content).map_err(|e| MaskError::InvalidJson(e.to_string()))?;

    let mut count = 0;
    walk(&mut value, engine, rng, &mut count);

    let out = serde_json::to_string_pretty(&value)
        .map_err(|e| MaskError::InvalidJson(e.to_string()))?;
    Ok((out, count))
}

fn walk<R: Rng>(value: &mut Value, engine: &MaskingEngine, rng: &mut R, count: &mut usize) {
    match value {
        Value::String(s) => {
            let (transformed, matched) = engine.transform_counted(s, rng);
            if matched > 0 {
                *s = transformed;
                *count += matched;
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, engine, rng, count);
            }
        }
        Value::Object(map) => {
            for (_key, item) in map.iter_mut() {
                walk(item, engine, rng, count);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaskingPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> MaskingEngine {
        MaskingEngine::new(MaskingPolicy::default()).unwrap()
    }

    #[test]
    fn test_masks_string_values() {
        let input = r#"{"name": "Ann", "phone": "415-555-2671"}"#;
        let (out, count) = transform_json(input, &engine(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(count, 1);
        assert!(out.contains("***-***-****"));
        assert!(out.contains("Ann"));
    }

    #[test]
    fn test_walks_nested_structures() {
        let input = r#"{"contacts": [{"home": "(415) 555-2671"}, {"work": "212.664.7665"}]}"#;
        let (out, count) = transform_json(input, &engine(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(count, 2);
        assert!(out.contains("(***) ***-****"));
        assert!(out.contains("***.***.****"));
    }

    #[test]
    fn test_numbers_and_keys_untouched() {
        // A JSON number is not a string value; it stays as-is even when its
        // digits look phone-like.
        let input = r#"{"415-555-2671": 4155552671, "zip": "94103"}"#;
        let (out, count) = transform_json(input, &engine(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(count, 0);
        assert!(out.contains("415-555-2671"));
        assert!(out.contains("4155552671"));
        assert!(out.contains("94103"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = transform_json("{broken", &engine(), &mut StdRng::seed_from_u64(1));
        assert!(matches!(err, Err(MaskError::InvalidJson(_))));
    }
}
