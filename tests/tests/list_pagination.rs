use cqlmap::{
    stmt::{Direction, Query, WhereClause},
    Db, ListOptions,
};
use pretty_assertions::assert_eq;
use tests::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, cqlmap::Model)]
struct Event {
    #[cql("primary_key=0")]
    stream: String,

    #[cql("clustering_key=0,order_by=desc,order_by_num=0")]
    seq: i64,

    #[cql("column_name=kind")]
    kind: String,
}

fn event(seq: i64) -> Event {
    Event {
        stream: "orders".to_string(),
        seq,
        kind: if seq % 2 == 0 { "even" } else { "odd" }.to_string(),
    }
}

fn stream() -> Query {
    Query::filter([WhereClause::eq("stream", "orders")])
}

async fn pages_follow_clustering_order(test: &mut DbTest<impl Setup>) {
    let db = test
        .try_setup_db(Db::builder().page_size(3))
        .await
        .unwrap();
    let keyspace = db.default_keyspace().unwrap();
    let (events, _) = keyspace.create_table::<Event>("events").await.unwrap();

    for seq in 1..=7 {
        events.insert(&event(seq)).await.unwrap();
    }
    test.log().clear();

    let options = ListOptions::new();
    let mut seqs = vec![];
    let mut next = Some(options.clone());

    while let Some(options) = next {
        let page = events.list(&stream(), options.clone()).await.unwrap();
        next = page.next_options(&options);
        seqs.push(page.into_iter().map(|e| e.seq).collect::<Vec<_>>());
    }

    assert_eq!(seqs, [vec![7, 6, 5], vec![4, 3, 2], vec![1]]);

    // Every page request carries the configured page size
    let mut log = test.log();
    while let Some(op) = log.pop() {
        assert_eq!(op.page_size, Some(3));
        assert_eq!(op.cql, "SELECT stream, seq, kind FROM app.events WHERE stream = 'orders'");
    }
}

async fn explicit_page_size_and_limit(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (events, _) = keyspace.create_table::<Event>("events").await.unwrap();

    for seq in 1..=5 {
        events.insert(&event(seq)).await.unwrap();
    }

    // Without a page size everything comes back at once
    let page = events.list(&stream(), ListOptions::new()).await.unwrap();
    assert_eq!(page.items.len(), 5);
    assert!(!page.has_next());

    let page = events
        .list(&stream(), ListOptions::new().page_size(2))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.has_next());

    test.log().clear();
    let page = events
        .list(&stream(), ListOptions::new().limit(4).page_size(10))
        .await
        .unwrap();
    assert_eq!(
        page.items.iter().map(|e| e.seq).collect::<Vec<_>>(),
        [5, 4, 3, 2]
    );
    assert_eq!(
        test.log().pop_cql().unwrap(),
        "SELECT stream, seq, kind FROM app.events WHERE stream = 'orders' LIMIT 4"
    );
}

async fn order_by_and_projection(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (events, _) = keyspace.create_table::<Event>("events").await.unwrap();

    for seq in 1..=4 {
        events.insert(&event(seq)).await.unwrap();
    }

    let query = stream()
        .select(["seq"])
        .order_by("seq", Direction::Asc)
        .limit(2);
    let page = events.list(&query, ListOptions::new()).await.unwrap();

    assert_eq!(
        page.items,
        [
            Event {
                seq: 1,
                ..Event::default()
            },
            Event {
                seq: 2,
                ..Event::default()
            },
        ]
    );
}

tests!(
    pages_follow_clustering_order,
    explicit_page_size_and_limit,
    order_by_and_projection,
);
