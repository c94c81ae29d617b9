use cqlmap::CreateOutcome;
use pretty_assertions::assert_eq;
use tests::prelude::*;

#[derive(Debug, Default, cqlmap::Model)]
struct Account {
    #[cql("primary_key=0")]
    id: uuid::Uuid,

    #[cql("index_key=true")]
    email: String,
}

#[derive(Debug, Default, cqlmap::Model)]
struct Session {
    #[cql("primary_key=0")]
    token: String,

    #[cql("column_name=account")]
    account: uuid::Uuid,
}

async fn concurrent_registration(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;

    let tasks = (0..8).map(|i| {
        let keyspace = keyspace.clone();
        tokio::spawn(async move {
            let name = format!("accounts_{i}");
            keyspace.create_table::<Account>(&name).await.map(|(_, outcome)| outcome)
        })
    });

    for task in tasks.collect::<Vec<_>>() {
        assert_eq!(task.await.unwrap().unwrap(), CreateOutcome::Created);
    }

    let registered = keyspace.registered_tables();
    assert_eq!(registered.len(), 8);
    assert_eq!(registered[0], "accounts_0");

    let mut stored = keyspace.tables().await.unwrap();
    stored.sort();
    assert_eq!(stored, registered);
}

async fn registry_is_shared_by_handles(test: &mut DbTest<impl Setup>) {
    let db = test.setup_db().await;

    let first = db.keyspace("app").unwrap();
    first.create_table::<Account>("accounts").await.unwrap();

    // Another handle, and a clone of the Db, see the same registry
    let second = db.clone().keyspace("APP").unwrap();
    let accounts = second.table::<Account>("accounts").unwrap();
    assert_eq!(accounts.qualified_name().to_string(), "app.accounts");

    let err = assert_err!(second.table::<Account>("sessions"));
    assert!(err.is_table_not_found(), "{err}");

    // Registered under another model
    assert_err!(second.table::<Session>("accounts"));
}

async fn create_is_idempotent(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;

    let (_, outcome) = keyspace.create_table::<Session>("sessions").await.unwrap();
    assert_eq!(outcome, CreateOutcome::Created);
    assert!(test.log().any(|cql| cql.starts_with("CREATE TABLE")));

    test.log().clear();
    let (_, outcome) = keyspace.create_table::<Session>("sessions").await.unwrap();
    assert_eq!(outcome, CreateOutcome::AlreadyExists);

    // Only the existence check was sent
    assert_eq!(test.log().len(), 1);
    assert!(test.log().has_select());
}

async fn indexes_are_created_with_the_table(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    keyspace.create_table::<Account>("accounts").await.unwrap();

    let mut log = test.log();
    assert!(log.pop_cql().unwrap().starts_with("SELECT table_name FROM system_schema.tables"));
    assert_eq!(
        log.pop_cql().unwrap(),
        "CREATE TABLE IF NOT EXISTS app.accounts (id uuid, email text, PRIMARY KEY (id))"
    );
    assert_eq!(
        log.pop_cql().unwrap(),
        "CREATE INDEX IF NOT EXISTS accountsemail_index ON app.accounts (email)"
    );
    assert!(log.is_empty());
}

async fn drop_table_unregisters(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    keyspace.create_table::<Session>("sessions").await.unwrap();

    keyspace.drop_table("sessions").await.unwrap();

    assert!(keyspace.registered_tables().is_empty());
    assert!(!keyspace.table_exists("sessions").await.unwrap());
    assert_eq!(test.memory().row_count("app", "sessions"), None);

    let err = assert_err!(keyspace.table::<Session>("sessions"));
    assert!(err.is_table_not_found(), "{err}");
}

async fn keyspace_lifecycle(test: &mut DbTest<impl Setup>) {
    let db = test.setup_db().await;

    let (_, outcome) = db.create_keyspace("analytics").await.unwrap();
    assert_eq!(outcome, CreateOutcome::Created);

    let mut names = db.keyspaces().await.unwrap();
    names.sort();
    assert_eq!(names, ["analytics", "app"]);

    let (_, outcome) = db.create_keyspace("analytics").await.unwrap();
    assert_eq!(outcome, CreateOutcome::AlreadyExists);

    db.drop_keyspace("analytics").await.unwrap();
    assert!(!db.keyspace_exists("analytics").await.unwrap());

    let err = assert_err!(db.keyspace("no spaces"));
    assert!(err.is_invalid_keyspace(), "{err}");
}

tests!(
    concurrent_registration,
    registry_is_shared_by_handles,
    create_is_idempotent,
    indexes_are_created_with_the_table,
    drop_table_unregisters,
    keyspace_lifecycle,
);
