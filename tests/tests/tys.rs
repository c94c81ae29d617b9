use cqlmap::{
    stmt::{Query, WhereClause},
    Blob,
};
use pretty_assertions::assert_eq;
use tests::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, cqlmap::Model)]
struct Sample {
    #[cql("primary_key=0")]
    id: uuid::Uuid,

    #[cql("column_name=flag")]
    flag: bool,

    #[cql("column_name=tiny")]
    tiny: i8,

    #[cql("column_name=small")]
    small: i16,

    #[cql("column_name=big")]
    big: i64,

    #[cql("column_name=ratio")]
    ratio: f32,

    #[cql("column_name=precise")]
    precise: f64,

    #[cql("column_name=payload")]
    payload: Blob,

    #[cql("column_name=seen_at")]
    seen_at: jiff::Timestamp,

    #[cql("column_name=note")]
    note: Option<String>,
}

async fn scalar_types(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (samples, _) = keyspace.create_table::<Sample>("samples").await.unwrap();

    assert_eq!(
        test.log().statements()[1],
        "CREATE TABLE IF NOT EXISTS app.samples (id uuid, flag boolean, tiny tinyint, \
         small smallint, big bigint, ratio float, precise double, payload blob, \
         seen_at timestamp, note text, PRIMARY KEY (id))"
    );

    let sample = Sample {
        id: uuid::Uuid::parse_str("a8098c1a-f86e-11da-bd1a-00112444be1e").unwrap(),
        flag: true,
        tiny: -8,
        small: 1024,
        big: -9_000_000_000,
        ratio: 0.5,
        precise: 2.25,
        payload: Blob(vec![0xca, 0xfe, 0x00]),
        seen_at: "2024-03-01T12:30:00Z".parse().unwrap(),
        note: None,
    };

    samples.insert(&sample).await.unwrap();

    let read = assert_some!(samples
        .read(&Query::filter([WhereClause::eq("id", sample.id)]))
        .await
        .unwrap());
    assert_eq!(read, sample);
}

async fn optional_values(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (samples, _) = keyspace.create_table::<Sample>("samples").await.unwrap();

    let sample = Sample {
        id: uuid::Uuid::new_v4(),
        note: Some("it works".to_string()),
        ..Sample::default()
    };
    samples.insert(&sample).await.unwrap();

    let by_id = Query::filter([WhereClause::eq("id", sample.id)]);
    assert_eq!(
        samples.read(&by_id).await.unwrap().and_then(|s| s.note),
        Some("it works".to_string())
    );

    samples.delete(&["note"], &[WhereClause::eq("id", sample.id)]).await.unwrap();
    assert_eq!(
        samples.read(&by_id).await.unwrap().map(|s| s.note),
        Some(None)
    );
}

tests!(scalar_types, optional_values);
