use cqlmap::{
    stmt::{Query, WhereClause},
    ListOptions,
};
use pretty_assertions::assert_eq;
use tests::prelude::*;

use std::collections::HashSet;

#[derive(Debug, Default, Clone, PartialEq, cqlmap::Model)]
struct Book {
    #[cql("primary_key=0")]
    id: i32,

    #[cql("index_key=true")]
    author: String,

    #[cql("column_name=year")]
    year: i32,

    #[cql("column_type=collection,column_subtype=set,column_valuetype=text")]
    genres: HashSet<String>,
}

fn book(id: i32, author: &str, year: i32, genres: &[&str]) -> Book {
    Book {
        id,
        author: author.to_string(),
        year,
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

async fn ids(table: &cqlmap::Table<Book>, query: Query) -> Vec<i32> {
    let page = table.list(&query, ListOptions::new()).await.unwrap();
    let mut ids: Vec<_> = page.into_iter().map(|b| b.id).collect();
    ids.sort();
    ids
}

async fn relations(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (books, _) = keyspace.create_table::<Book>("books").await.unwrap();

    for b in [
        book(1, "le guin", 1969, &["scifi"]),
        book(2, "le guin", 1974, &["scifi", "utopia"]),
        book(3, "tolkien", 1954, &["fantasy"]),
        book(4, "herbert", 1965, &["scifi"]),
    ] {
        books.insert(&b).await.unwrap();
    }

    // Indexed column
    assert_eq!(
        ids(&books, Query::filter([WhereClause::eq("author", "le guin")])).await,
        [1, 2]
    );

    assert_eq!(
        ids(&books, Query::filter([WhereClause::in_list("id", [1, 3])])).await,
        [1, 3]
    );

    // Regular columns need ALLOW FILTERING
    let err = assert_err!(
        books
            .list(
                &Query::filter([WhereClause::gt("year", 1965)]),
                ListOptions::new()
            )
            .await
    );
    assert!(err.is_driver(), "{err}");

    assert_eq!(
        ids(
            &books,
            Query::filter([WhereClause::gt("year", 1965)]).allow_filtering()
        )
        .await,
        [1, 2]
    );
    assert_eq!(
        ids(
            &books,
            Query::filter([WhereClause::contains("genres", "utopia")]).allow_filtering()
        )
        .await,
        [2]
    );
}

async fn filter_errors_are_caught_before_sending(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (books, _) = keyspace.create_table::<Book>("books").await.unwrap();
    test.log().clear();

    let err = assert_err!(
        books
            .read(&Query::filter([WhereClause::eq("publisher", "x")]))
            .await
    );
    assert!(err.is_unknown_where_column(), "{err}");

    let err = assert_err!(
        books
            .read(&Query::filter([WhereClause::in_list::<i32>("id", [])]))
            .await
    );
    assert!(err.is_invalid_in_operand(), "{err}");

    let err = assert_err!(
        books
            .read(&Query::filter([WhereClause::eq("year", vec![1965])]))
            .await
    );
    assert!(err.is_invalid_collection_shape(), "{err}");

    assert!(test.log().is_empty());
}

tests!(relations, filter_errors_are_caught_before_sending);
