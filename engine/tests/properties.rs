//! Property-based tests for id assignment and update isolation.

use filedb_engine::{ExternalRecord, RecordStore, SchemaMap};
use proptest::prelude::*;
use serde_json::{json, Value};

fn schema() -> SchemaMap {
    SchemaMap::new()
        .with_field("id", 0)
        .with_field("name", 1)
        .with_field("email", 2)
        .with_field("age", 3)
}

fn fields(value: Value) -> ExternalRecord {
    value.as_object().cloned().expect("object literal")
}

#[derive(Debug, Clone)]
enum Step {
    Create(String),
    Delete(u64),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => "[a-z]{1,8}".prop_map(Step::Create),
        1 => (0u64..20).prop_map(Step::Delete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ids_follow_create_count(steps in prop::collection::vec(arb_step(), 1..25)) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("db.json"), schema()).unwrap();

        let mut created = 0u64;
        let mut live: Vec<u64> = Vec::new();

        for step in steps {
            match step {
                Step::Create(name) => {
                    let record = store.create(&fields(json!({"name": name}))).unwrap();
                    prop_assert_eq!(&record["0"], &json!(created));
                    live.push(created);
                    created += 1;
                }
                Step::Delete(id) => {
                    let result = store.delete(&id.to_string());
                    if let Some(pos) = live.iter().position(|&l| l == id) {
                        prop_assert!(result.is_ok());
                        live.remove(pos);
                    } else {
                        prop_assert!(result.unwrap_err().is_not_found());
                    }
                }
            }
        }

        let ids: Vec<Value> = store
            .find_many()
            .unwrap()
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        let expected: Vec<Value> = live.iter().map(|&id| json!(id)).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_update_touches_only_given_field(
        name in "[a-z]{1,8}",
        email in "[a-z]{1,8}@x\\.com",
        age in 0u32..120,
        new_email in "[a-z]{1,8}@y\\.com",
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("db.json"), schema()).unwrap();

        store
            .create(&fields(json!({"name": name, "email": email, "age": age})))
            .unwrap();
        store.update("0", &fields(json!({"email": new_email}))).unwrap();

        let found = store.find_one("0").unwrap();
        prop_assert_eq!(
            Value::Object(found),
            json!({"id": 0, "name": name, "email": new_email, "age": age})
        );
    }
}
