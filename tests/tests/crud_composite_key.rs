use cqlmap::stmt::{Query, WhereClause};
use pretty_assertions::assert_eq;
use tests::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, cqlmap::Model)]
struct User {
    #[cql("primary_key=0")]
    id: i32,

    #[cql("primary_key=1")]
    city: String,

    #[cql("column_name=name")]
    name: String,

    #[cql("column_name=age")]
    age: i32,
}

fn ann() -> User {
    User {
        id: 1,
        city: "London".to_string(),
        name: "Ann".to_string(),
        age: 30,
    }
}

fn key(id: i32, city: &str) -> Query {
    Query::filter([WhereClause::eq("id", id), WhereClause::eq("city", city)])
}

async fn insert_and_read(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (users, _) = keyspace.create_table::<User>("users").await.unwrap();
    test.log().clear();

    users.insert(&ann()).await.unwrap();

    let mut log = test.log();
    assert_eq!(
        log.pop_cql().unwrap(),
        "INSERT INTO app.users (id, city, name, age) VALUES (1, 'London', 'Ann', 30)"
    );

    let read = assert_some!(users.read(&key(1, "London")).await.unwrap());
    assert_eq!(read, ann());

    assert_eq!(
        log.pop_cql().unwrap(),
        "SELECT id, city, name, age FROM app.users WHERE id = 1 AND city = 'London'"
    );
    assert!(log.is_empty());

    // Same id, other partition
    assert_none!(users.read(&key(1, "Paris")).await.unwrap());
}

async fn read_and_bind_reuses_the_record(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (users, _) = keyspace.create_table::<User>("users").await.unwrap();
    users.insert(&ann()).await.unwrap();

    let mut user = User {
        age: 99,
        ..User::default()
    };

    users
        .read_and_bind(&mut user, &key(1, "London").select(["name"]))
        .await
        .unwrap();

    // Only the projected column is assigned
    assert_eq!(user.name, "Ann");
    assert_eq!(user.age, 99);

    let err = assert_err!(users.read_and_bind(&mut user, &key(2, "London")).await);
    assert!(err.is_record_not_found(), "{err}");
}

async fn update_overwrites_non_key_columns(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (users, _) = keyspace.create_table::<User>("users").await.unwrap();
    users.insert(&ann()).await.unwrap();
    test.log().clear();

    let mut older = ann();
    older.age = 31;
    users.update(&older).await.unwrap();

    assert_eq!(
        test.log().pop_cql().unwrap(),
        "UPDATE app.users SET name = 'Ann', age = 31 WHERE id = 1 AND city = 'London'"
    );
    assert_eq!(users.read(&key(1, "London")).await.unwrap(), Some(older));
}

async fn delete_record_by_key(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (users, _) = keyspace.create_table::<User>("users").await.unwrap();

    users.insert(&ann()).await.unwrap();
    users
        .insert(&User {
            city: "Paris".to_string(),
            ..ann()
        })
        .await
        .unwrap();
    assert_eq!(test.memory().row_count("app", "users"), Some(2));

    test.log().clear();
    users.delete_record(&ann()).await.unwrap();

    assert_eq!(
        test.log().pop_cql().unwrap(),
        "DELETE FROM app.users WHERE id = 1 AND city = 'London'"
    );
    assert_eq!(test.memory().row_count("app", "users"), Some(1));
    assert_none!(users.read(&key(1, "London")).await.unwrap());
}

tests!(
    insert_and_read,
    read_and_bind_reuses_the_record,
    update_overwrites_non_key_columns,
    delete_record_by_key,
);
