use cqlmap::{Db, Keyspace, Page, Table};

#[derive(Debug, Default, cqlmap::Model)]
struct Item {
    #[cql("primary_key=0")]
    id: i32,
}

fn assert_sync_send<T: Send + Sync>() {}

#[test]
fn handles_are_sync_send() {
    assert_sync_send::<Db>();
    assert_sync_send::<Keyspace>();
    assert_sync_send::<Table<Item>>();
    assert_sync_send::<Page<Item>>();
}
