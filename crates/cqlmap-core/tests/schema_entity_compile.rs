use cqlmap_core::schema::{
    ClusteringOrder, CollectionType, ColumnType, Direction, Entity, FieldDef, Type,
};
use pretty_assertions::assert_eq;
use std_util::assert_err;

const USER: &[FieldDef] = &[
    FieldDef::new("id", Some("column_name=id,primary_key=0"), "i32"),
    FieldDef::new("city", Some("column_name=city,primary_key=1"), "String"),
    FieldDef::new(
        "email",
        Some("column_name=email,clustering_key=0,order_by_num=0,order_by=asc"),
        "String",
    ),
    FieldDef::new(
        "first_name",
        Some("column_name=FirstName,clustering_key=1,order_by_num=1,order_by=asc"),
        "String",
    ),
    FieldDef::new(
        "last_name",
        Some("column_name=lastname,clustering_key=2,order_by_num=2,order_by=DESC"),
        "String",
    ),
    FieldDef::new("nick_name", Some("column_name=nickname,index_key=true"), "String"),
    FieldDef::new("zip", Some("column_type=text"), "String"),
    FieldDef::new("scratch", None, "String"),
    FieldDef::new("cache", Some("-"), "String"),
    FieldDef::new(
        "friends",
        Some("column_name=friends,column_type=collection,column_subtype=set,column_valuetype=string"),
        "HashSet<String>",
    ),
    FieldDef::new(
        "sso_ids",
        Some("column_name=ssoids,column_type=collection,column_subtype=map,column_keytype=string,column_valuetype=string"),
        "HashMap<String, String>",
    ),
];

fn compile(fields: &[FieldDef]) -> cqlmap_core::Result<Entity> {
    Entity::compile("Test", fields)
}

// ===== Successful compilation =====

#[test]
fn descriptors_follow_declaration_order() {
    let entity = Entity::compile("User", USER).unwrap();

    let names: Vec<_> = entity.columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "id",
            "city",
            "email",
            "firstname",
            "lastname",
            "nickname",
            "zip",
            "friends",
            "ssoids"
        ]
    );
}

#[test]
fn untagged_and_skipped_fields_keep_ordinals() {
    let entity = Entity::compile("User", USER).unwrap();

    assert!(entity.column("scratch").is_none());
    assert!(entity.column("cache").is_none());
    assert_eq!(entity.column("friends").unwrap().field_index, 9);
    assert_eq!(entity.column("ssoids").unwrap().field_index, 10);
}

#[test]
fn column_metadata() {
    let entity = Entity::compile("User", USER).unwrap();

    let id = entity.column("id").unwrap();
    assert_eq!(id.ty, ColumnType::Scalar(Type::Int));
    assert_eq!(id.primary_key, Some(0));

    let last_name = entity.column("lastname").unwrap();
    assert_eq!(last_name.field_name, "last_name");
    assert_eq!(last_name.clustering_key, Some(2));
    assert_eq!(
        last_name.order,
        Some(ClusteringOrder {
            direction: Direction::Desc,
            ordinal: 2
        })
    );

    assert!(entity.column("nickname").unwrap().indexed);
    assert!(!entity.column("zip").unwrap().indexed);

    assert_eq!(
        entity.column("friends").unwrap().ty,
        ColumnType::Collection(CollectionType::set(Type::Text))
    );
    assert_eq!(
        entity.column("ssoids").unwrap().ty,
        ColumnType::Collection(CollectionType::map(Type::Text, Type::Text))
    );
}

#[test]
fn compile_is_deterministic() {
    let a = Entity::compile("User", USER).unwrap();
    let b = Entity::compile("User", USER).unwrap();
    assert_eq!(a, b);
}

#[test]
fn keys_sorted_by_ordinal() {
    let entity = compile(&[
        FieldDef::new("b", Some("primary_key=1"), "String"),
        FieldDef::new("a", Some("primary_key=0"), "String"),
        FieldDef::new("d", Some("clustering_key=1,order_by=desc,order_by_num=0"), "i32"),
        FieldDef::new("c", Some("clustering_key=0,order_by=asc,order_by_num=1"), "i32"),
    ])
    .unwrap();

    let pk: Vec<_> = entity.partition_keys().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(pk, ["a", "b"]);

    let ck: Vec<_> = entity.clustering_keys().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(ck, ["c", "d"]);

    let order: Vec<_> = entity
        .clustering_order()
        .into_iter()
        .map(|(c, dir)| (c.name.as_str(), dir))
        .collect();
    assert_eq!(order, [("d", Direction::Desc), ("c", Direction::Asc)]);
}

#[test]
fn index_key_false_is_not_indexed() {
    let entity = compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new("name", Some("index_key=false"), "String"),
    ])
    .unwrap();

    assert!(!entity.column("name").unwrap().indexed);
}

#[test]
fn counter_with_keys_only() {
    let entity = compile(&[
        FieldDef::new("id", Some("primary_key=0"), "String"),
        FieldDef::new("day", Some("clustering_key=0"), "String"),
        FieldDef::new("visits", Some("column_type=counter"), "i64"),
    ])
    .unwrap();

    assert!(entity.has_counters());
    assert!(entity.column("visits").unwrap().is_counter());
}

// ===== Tag errors =====

#[test]
fn malformed_pair() {
    let err = assert_err!(compile(&[FieldDef::new(
        "id",
        Some("column_name=id,primary_key"),
        "i32"
    )]));
    assert!(err.is_malformed_tag());
}

#[test]
fn repeated_key() {
    let err = assert_err!(compile(&[FieldDef::new(
        "id",
        Some("primary_key=0,primary_key=1"),
        "i32"
    )]));
    assert!(err.is_malformed_tag());
}

#[test]
fn collection_without_subtype() {
    let err = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new("tags", Some("column_type=collection,column_valuetype=text"), "Vec<String>"),
    ]));
    assert!(err.is_missing_subtype());
    assert!(err.to_string().contains("`tags`"));
}

#[test]
fn collection_with_unknown_subtype() {
    let err = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new(
            "tags",
            Some("column_type=collection,column_subtype=bag,column_valuetype=text"),
            "Vec<String>"
        ),
    ]));
    assert!(err.is_missing_subtype());
}

#[test]
fn map_without_key_type() {
    let err = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new(
            "attrs",
            Some("column_type=collection,column_subtype=map,column_valuetype=text"),
            "HashMap<String, String>"
        ),
    ]));
    assert!(err.is_missing_collection_types());
}

#[test]
fn list_without_value_type() {
    let err = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new("tags", Some("column_type=collection,column_subtype=list"), "Vec<String>"),
    ]));
    assert!(err.is_missing_collection_types());
}

#[test]
fn counter_conflict_in_either_order() {
    let counter_first = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "String"),
        FieldDef::new("visits", Some("column_type=counter"), "i64"),
        FieldDef::new("name", Some("column_type=text"), "String"),
    ]));
    assert!(counter_first.is_counter_conflict());

    let counter_last = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "String"),
        FieldDef::new("name", Some("column_type=text"), "String"),
        FieldDef::new("visits", Some("column_type=counter"), "i64"),
    ]));
    assert!(counter_last.is_counter_conflict());
    assert!(counter_last.to_string().contains("`name`"));
}

#[test]
fn key_ordinal_not_a_number() {
    let err = assert_err!(compile(&[FieldDef::new(
        "id",
        Some("primary_key=first"),
        "i32"
    )]));
    assert!(err.is_missing_key_ordinal());

    let err = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new("ts", Some("clustering_key=x"), "i32"),
    ]));
    assert!(err.is_missing_key_ordinal());
}

#[test]
fn duplicate_key_ordinal() {
    let err = assert_err!(compile(&[
        FieldDef::new("a", Some("primary_key=0"), "i32"),
        FieldDef::new("b", Some("primary_key=0"), "i32"),
    ]));
    assert!(err.is_duplicate_key_ordinal());
}

#[test]
fn order_direction_must_be_asc_or_desc() {
    let err = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new("ts", Some("clustering_key=0,order_by=up,order_by_num=0"), "i32"),
    ]));
    assert!(err.is_invalid_order_direction());
}

#[test]
fn order_by_requires_ordinal() {
    let err = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new("ts", Some("clustering_key=0,order_by=asc"), "i32"),
    ]));
    assert!(err.is_missing_order_ordinal());
}

#[test]
fn duplicate_column_name() {
    let err = assert_err!(compile(&[
        FieldDef::new("id", Some("primary_key=0"), "i32"),
        FieldDef::new("name", Some("column_name=ID"), "String"),
    ]));
    assert!(err.is_duplicate_column());
}

#[test]
fn entity_needs_a_partition_key() {
    let err = assert_err!(compile(&[FieldDef::new("name", Some("column_type=text"), "String")]));
    assert!(err.is_missing_primary_key());
    assert_eq!(
        err.to_string(),
        "invalid entity `Test`: no field is tagged with `primary_key`"
    );
}
