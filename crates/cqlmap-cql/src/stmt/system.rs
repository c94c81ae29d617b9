//! Lookups against the `system_schema` keyspace.

use super::{Condition, Name, Select, Statement};

const SYSTEM_SCHEMA: &str = "system_schema";

impl Statement {
    /// Lists every keyspace name.
    pub fn list_keyspaces() -> Self {
        Select::columns(keyspaces(), ["keyspace_name"]).into()
    }

    pub fn keyspace_exists(keyspace: &str) -> Self {
        let mut select = Select::columns(keyspaces(), ["keyspace_name"]);
        select.filter.0.push(Condition::text_eq("keyspace_name", keyspace));
        select.into()
    }

    /// Lists the table names of `keyspace`.
    pub fn list_tables(keyspace: &str) -> Self {
        let mut select = Select::columns(tables(), ["table_name"]);
        select.filter.0.push(Condition::text_eq("keyspace_name", keyspace));
        select.into()
    }

    pub fn table_exists(keyspace: &str, table: &str) -> Self {
        let mut select = Select::columns(tables(), ["table_name"]);
        select.filter.0.push(Condition::text_eq("keyspace_name", keyspace));
        select.filter.0.push(Condition::text_eq("table_name", table));
        select.allow_filtering = true;
        select.into()
    }
}

fn keyspaces() -> Name {
    Name::qualified(SYSTEM_SCHEMA, "keyspaces")
}

fn tables() -> Name {
    Name::qualified(SYSTEM_SCHEMA, "tables")
}
