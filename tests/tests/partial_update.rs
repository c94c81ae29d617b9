use cqlmap::stmt::{Assignments, Query, Using, WhereClause};
use pretty_assertions::assert_eq;
use tests::prelude::*;

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default, cqlmap::Model)]
struct PageViews {
    #[cql("primary_key=0")]
    page: String,

    #[cql("column_type=counter")]
    views: i64,
}

#[derive(Debug, Default, cqlmap::Model)]
struct Profile {
    #[cql("primary_key=0")]
    id: i32,

    #[cql("column_type=collection,column_subtype=set,column_valuetype=text")]
    tags: BTreeSet<String>,

    #[cql("column_type=collection,column_subtype=list,column_valuetype=int")]
    scores: Vec<i32>,

    #[cql("column_type=collection,column_subtype=map,column_keytype=text,column_valuetype=text")]
    attrs: BTreeMap<String, String>,

    #[cql("column_name=bio")]
    bio: Option<String>,
}

fn page(name: &str) -> Vec<WhereClause> {
    vec![WhereClause::eq("page", name)]
}

fn profile(id: i32) -> Vec<WhereClause> {
    vec![WhereClause::eq("id", id)]
}

async fn counter_deltas(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (views, _) = keyspace.create_table::<PageViews>("page_views").await.unwrap();
    test.log().clear();

    views
        .update_fields(&Assignments::new().incr("views", 5), &page("home"))
        .await
        .unwrap();
    views
        .update_fields(&Assignments::new().decr("views", 2), &page("home"))
        .await
        .unwrap();

    let mut log = test.log();
    assert_eq!(
        log.pop_cql().unwrap(),
        "UPDATE app.page_views SET views = views + 5 WHERE page = 'home'"
    );
    assert_eq!(
        log.pop_cql().unwrap(),
        "UPDATE app.page_views SET views = views - 2 WHERE page = 'home'"
    );

    let read = assert_some!(views.read(&Query::filter(page("home"))).await.unwrap());
    assert_eq!(read.views, 3);

    // Counters only accept deltas, and counter tables reject inserts
    let err = assert_err!(
        views
            .update_fields(&Assignments::new().set("views", 1_i64), &page("home"))
            .await
    );
    assert!(err.is_invalid_update_value(), "{err}");
    assert!(views.insert(&PageViews::default()).await.is_err());
}

async fn collection_deltas(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (profiles, _) = keyspace.create_table::<Profile>("profiles").await.unwrap();
    profiles
        .insert(&Profile {
            id: 1,
            tags: BTreeSet::from(["a".to_string()]),
            ..Profile::default()
        })
        .await
        .unwrap();
    test.log().clear();

    let changes = Assignments::new()
        .add("tags", vec!["x", "y"])
        .add("scores", vec![7_i32, 8])
        .add("attrs", cqlmap::stmt::Value::map([("lang", "en"), ("tz", "utc")]));
    profiles.update_fields(&changes, &profile(1)).await.unwrap();

    assert_eq!(
        test.log().pop_cql().unwrap(),
        "UPDATE app.profiles SET tags = tags + {'x','y'}, scores = scores + [7,8], \
         attrs = attrs + {'lang':'en','tz':'utc'} WHERE id = 1"
    );

    let removals = Assignments::new()
        .remove("tags", vec!["a"])
        .remove("scores", vec![7_i32])
        .remove("attrs", vec!["tz"]);
    profiles.update_fields(&removals, &profile(1)).await.unwrap();

    let read = assert_some!(profiles.read(&Query::filter(profile(1))).await.unwrap());
    assert_eq!(
        read.tags,
        BTreeSet::from(["x".to_string(), "y".to_string()])
    );
    assert_eq!(read.scores, [8]);
    assert_eq!(
        read.attrs,
        BTreeMap::from([("lang".to_string(), "en".to_string())])
    );
    assert_eq!(read.bio, None);
}

async fn set_and_replace_with_ttl(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (profiles, _) = keyspace.create_table::<Profile>("profiles").await.unwrap();
    test.log().clear();

    let changes = Assignments::new()
        .using(Using::ttl(3600))
        .set("bio", "hello")
        .replace("tags", vec!["only"]);
    profiles.update_fields(&changes, &profile(2)).await.unwrap();

    assert_eq!(
        test.log().pop_cql().unwrap(),
        "UPDATE app.profiles USING TTL 3600 SET bio = 'hello', tags = {'only'} WHERE id = 2"
    );

    let read = assert_some!(profiles.read(&Query::filter(profile(2))).await.unwrap());
    assert_eq!(read.bio.as_deref(), Some("hello"));
    assert_eq!(read.tags, BTreeSet::from(["only".to_string()]));
}

async fn invalid_assignments_send_nothing(test: &mut DbTest<impl Setup>) {
    let keyspace = test.setup_keyspace().await;
    let (profiles, _) = keyspace.create_table::<Profile>("profiles").await.unwrap();
    test.log().clear();

    let err = assert_err!(profiles.update_fields(&Assignments::new(), &profile(1)).await);
    assert!(err.is_empty_update(), "{err}");

    let err = assert_err!(
        profiles
            .update_fields(&Assignments::new().set("nickname", "x"), &profile(1))
            .await
    );
    assert!(err.is_unknown_target_column(), "{err}");

    let err = assert_err!(
        profiles
            .update_fields(&Assignments::new().set("bio", "x"), &[])
            .await
    );
    assert!(err.is_empty_where_clause(), "{err}");

    let err = assert_err!(
        profiles
            .update_fields(&Assignments::new().incr("bio", 1), &profile(1))
            .await
    );
    assert!(err.is_invalid_update_value(), "{err}");

    assert!(test.log().is_empty());
}

tests!(
    counter_deltas,
    collection_deltas,
    set_and_replace_with_ttl,
    invalid_assignments_send_nothing,
);
