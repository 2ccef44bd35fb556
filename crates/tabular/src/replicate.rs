use serde_json::Value;

use crate::Payload;

/// Un-nests the array stored in `field`, producing one record per element.
///
/// The sibling fields of the parent are copied to every element, so
/// `[{ "a": "x", "b": [1, 2] }]` replicated on `b` becomes `[{ "a": "x", "b": 1 }, { "a": "x", "b": 2 }]`.
/// Parent order is kept, then element order within each parent.
///
/// A parent whose array is empty, null or missing produces no records. A value that is not an
/// array is treated as a single element.
pub fn replicate(items: Vec<Payload>, field: &str) -> Vec<Payload> {
    let mut output = Vec::with_capacity(items.len());

    for item in items {
        let Value::Object(mut parent) = item else {
            continue;
        };

        // taking the value in place keeps the field at its original position
        let children = match parent.get_mut(field).map(Value::take) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(children)) => children,
            Some(child) => vec![child],
        };

        for child in children {
            let mut record = parent.clone();
            record.insert(field.to_owned(), child);
            output.push(Value::Object(record));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn siblings_are_copied_to_every_element() {
        let items = vec![json!({ "a": "x", "b": [1, 2] })];

        assert_eq!(
            replicate(items, "b"),
            vec![json!({ "a": "x", "b": 1 }), json!({ "a": "x", "b": 2 })]
        );
    }

    #[test]
    fn parent_then_child_order_is_preserved() {
        let items = vec![
            json!({ "name": "Yoga", "registrations": [{ "id": 1 }, { "id": 2 }] }),
            json!({ "name": "Run", "registrations": [{ "id": 3 }] }),
        ];

        let names = replicate(items, "registrations")
            .into_iter()
            .map(|record| (record["name"].clone(), record["registrations"]["id"].clone()))
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                (json!("Yoga"), json!(1)),
                (json!("Yoga"), json!(2)),
                (json!("Run"), json!(3)),
            ]
        );
    }

    #[test]
    fn parents_without_elements_disappear() {
        let items = vec![
            json!({ "name": "Empty", "registrations": [] }),
            json!({ "name": "Null", "registrations": null }),
            json!({ "name": "Missing" }),
            json!({ "name": "Kept", "registrations": [{ "id": 1 }] }),
        ];

        let output = replicate(items, "registrations");

        assert_eq!(output.len(), 1);
        assert_eq!(output[0]["name"], json!("Kept"));
    }

    #[test]
    fn non_array_values_count_as_one_element() {
        let items = vec![json!({ "a": "x", "b": { "c": 1 } })];

        assert_eq!(replicate(items, "b"), vec![json!({ "a": "x", "b": { "c": 1 } })]);
    }

    #[test]
    fn field_position_is_kept() {
        let items = vec![json!({ "a": "x", "b": [1], "c": "z" })];

        let output = replicate(items, "b");
        let keys = output[0].as_object().unwrap().keys().collect::<Vec<_>>();

        assert_eq!(keys, ["a", "b", "c"]);
    }
}
