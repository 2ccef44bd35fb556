use serde_json::Value;

use crate::{Payload, Record, Scalar, Table};

/// Joins the segments of a flattened path.
pub const DEFAULT_DELIMITER: &str = ".";

/// Column holding a top-level element that is not an object.
pub const VALUE_COLUMN: &str = "value";

/// Flattens a list of nested payloads into a table.
///
/// E.g. `[{ "name": "Yoga", "author": { "name": "Kim" } }]` becomes a single row with the columns
/// `name` and `author.name`. Arrays that were not exploded with [`crate::replicate`] keep their
/// indices as path segments. Columns that are null in every row are dropped.
pub fn flatten(items: &[Payload], delimiter: &str) -> Table {
    let records = items.iter().map(|item| flatten_record(item, delimiter)).collect();

    Table::from_records(records).drop_empty_columns()
}

/// Flattens a single payload into a record of leaf scalars.
pub fn flatten_record(item: &Payload, delimiter: &str) -> Record {
    fn recurse(value: &Value, delimiter: &str, output: &mut Record, acc: Option<String>) {
        let join = |key: &str| match acc {
            None => key.to_owned(),
            Some(ref acc) => format!("{acc}{delimiter}{key}"),
        };

        match value {
            Value::Object(object) => {
                for (key, value) in object {
                    recurse(value, delimiter, output, Some(join(key)));
                }
            }
            Value::Array(values) => {
                for (index, value) in values.iter().enumerate() {
                    recurse(value, delimiter, output, Some(join(&index.to_string())));
                }
            }
            leaf => {
                let key = acc.unwrap_or_else(|| VALUE_COLUMN.to_owned());
                let value = Scalar::from_json(leaf.clone()).unwrap_or_default();

                output.insert(key, value);
            }
        }
    }

    let mut record = Record::new();
    recurse(item, delimiter, &mut record, None);
    record
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_objects_become_paths() {
        let items = [json!({
            "name": "Yoga",
            "author": { "name": "Kim" },
            "location": { "address": "Main street 1" }
        })];

        let table = flatten(&items, DEFAULT_DELIMITER);

        assert_eq!(table.columns(), ["name", "author.name", "location.address"]);
        assert_eq!(table.rows()[0].get("author.name"), Some(&Scalar::from("Kim")));
    }

    #[test]
    fn flat_input_is_unchanged() {
        let items = [json!({ "a": "x", "b": 1 }), json!({ "a": "y", "b": 2 })];

        let table = flatten(&items, DEFAULT_DELIMITER);

        assert_eq!(serde_json::to_value(&table).unwrap(), json!(items));
    }

    #[test]
    fn heterogeneous_shapes_fill_with_nulls() {
        let items = [
            json!({ "name": "Yoga", "option": { "price": 5 } }),
            json!({ "name": "Run" }),
        ];

        let table = flatten(&items, DEFAULT_DELIMITER);

        assert_eq!(table.columns(), ["name", "option.price"]);
        assert_eq!(table.rows()[1].get("option.price"), Some(&Scalar::Null));
    }

    #[test]
    fn dropped_columns_are_exactly_the_all_null_ones() {
        let items = [
            json!({ "name": "Yoga", "deleted": null, "description": null }),
            json!({ "name": "Run", "deleted": null, "description": "5k" }),
        ];

        let table = flatten(&items, DEFAULT_DELIMITER);

        assert_eq!(table.columns(), ["name", "description"]);
    }

    #[test]
    fn empty_input_has_no_rows_and_no_columns() {
        let table = flatten(&[], DEFAULT_DELIMITER);

        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn arrays_keep_their_indices() {
        let record = flatten_record(&json!({ "tags": ["a", "b"], "empty": [], "nothing": {} }), DEFAULT_DELIMITER);

        assert_eq!(record.keys().collect::<Vec<_>>(), ["tags.0", "tags.1"]);
    }

    #[rstest]
    #[case(".", "group.name")]
    #[case(":", "group:name")]
    #[case("__", "group__name")]
    fn delimiter_joins_segments(#[case] delimiter: &str, #[case] expected: &str) {
        let record = flatten_record(&json!({ "group": { "name": "Board" } }), delimiter);

        assert_eq!(record.get(expected), Some(&Scalar::from("Board")));
    }

    #[test]
    fn scalars_at_the_top_level_use_the_value_column() {
        let table = flatten(&[json!(true), json!(false)], DEFAULT_DELIMITER);

        assert_eq!(table.columns(), [VALUE_COLUMN]);
    }
}
