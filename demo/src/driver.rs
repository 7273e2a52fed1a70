//! The demonstration walk-through: seed users, read, update, delete.

use crate::error::Result;
use filedb_engine::{ExternalRecord, RecordStore, SchemaMap};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// Schema of the demo user table.
pub fn user_schema() -> SchemaMap {
    SchemaMap::new()
        .with_field("id", 0)
        .with_field("name", 1)
        .with_field("email", 2)
        .with_field("age", 3)
}

fn user(name: &str, email: &str, age: &str) -> ExternalRecord {
    let mut fields = ExternalRecord::new();
    fields.insert("name".into(), json!(name));
    fields.insert("email".into(), json!(email));
    fields.insert("age".into(), json!(age));
    fields
}

fn print<T: Serialize>(out: &mut impl Write, title: &str, value: &T) -> Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Run the walk-through against `store`, writing results to `out`.
pub fn run(store: &RecordStore, out: &mut impl Write) -> Result<()> {
    let seed = [
        user("John Doe", "email1@gmail.com", "30"),
        user("Jane Smith", "email2@gmail.com", "25"),
        user("Alice Johnson", "email3@gmail.com", "28"),
        // Duplicate email on purpose: the store has no uniqueness checks.
        user("Bob Brown", "email1@gmail.com", "35"),
    ];
    for fields in &seed {
        let created = store.create(fields)?;
        tracing::info!(record = %serde_json::Value::Object(created), "created user");
    }

    print(out, "All Users:", &store.find_many()?)?;

    let user_one = store.find_one("1")?;
    print(out, "User with ID 1:", &user_one)?;

    let mut changes = ExternalRecord::new();
    changes.insert("name".into(), json!("John Smith"));
    changes.insert("email".into(), json!("test@gmail.com"));
    let updated = store.update("1", &changes)?;
    print(out, "Updated user:", &updated)?;

    print(out, "All Users:", &store.find_many()?)?;

    store.delete("2")?;
    writeln!(out, "Deleted user with ID 2")?;
    tracing::info!(id = "2", "deleted user");

    print(out, "All Users:", &store.find_many()?)?;
    Ok(())
}
