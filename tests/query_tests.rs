use neo4rs::{BoltList, BoltMap, BoltString, BoltType};
use neoquery::{args, map, sym, Arg, ClauseKind, Params, Query, QueryError, QueryOptions};

type TestResult = Result<(), QueryError>;

fn q() -> Query {
    Query::new()
}

fn params(pairs: &[(&str, BoltType)]) -> Params {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

// --- MATCH / OPTIONAL MATCH / USING ---

#[test]
fn test_match_forms() -> TestResult {
    assert_eq!(q().match_(sym("n"))?.to_cypher(), "MATCH (n)");
    assert_eq!(q().match_("n--o")?.to_cypher(), "MATCH n--o");
    assert_eq!(q().match_(map! { "n" => sym("Person") })?.to_cypher(), "MATCH (n:`Person`)");
    assert_eq!(q().match_(map! { "n" => ":Person" })?.to_cypher(), "MATCH (n:Person)");
    assert_eq!(q().match_(map! { "n" => Arg::Nil })?.to_cypher(), "MATCH (n)");
    assert_eq!(
        q().match_(map! { "n" => args![sym("Person"), "Animal"] })?.to_cypher(),
        "MATCH (n:`Person`:`Animal`)"
    );
    Ok(())
}

#[test]
fn test_match_nested_properties() -> TestResult {
    let query = q().match_(map! { "n" => map! { "Person" => map! { "name" => "Brian", "age" => 33 } } })?;
    assert_eq!(
        query.to_cypher(),
        "MATCH (n:`Person` {name: $n_Person_name, age: $n_Person_age})"
    );
    assert_eq!(
        query.parameters(),
        params(&[("n_Person_name", "Brian".into()), ("n_Person_age", 33_i64.into())])
    );
    Ok(())
}

#[test]
fn test_match_and_optional_match_group_separately() -> TestResult {
    let query = q().match_("m--n")?.optional_match("n--o")?.match_("o--p")?;
    assert_eq!(query.to_cypher(), "MATCH m--n, o--p OPTIONAL MATCH n--o");
    Ok(())
}

#[test]
fn test_using() -> TestResult {
    let query = q()
        .match_(sym("q"))?
        .using("INDEX q:Person(name)")?
        .using("SCAN q:Person")?;
    assert_eq!(query.to_cypher(), "MATCH (q) USING INDEX q:Person(name) USING SCAN q:Person");
    Ok(())
}

#[test]
fn test_match_nodes() -> TestResult {
    let query = q().match_nodes([("user", 1), ("post", 2)])?;
    assert_eq!(
        query.to_cypher(),
        "MATCH (user), (post) WHERE (ID(user) = $ID_user) AND (ID(post) = $ID_post)"
    );
    assert_eq!(query.parameters(), params(&[("ID_user", 1_i64.into()), ("ID_post", 2_i64.into())]));

    let query = q().optional_match_nodes([("user", "7")])?;
    assert_eq!(query.to_cypher(), "OPTIONAL MATCH (user) WHERE (ID(user) = $ID_user)");
    assert_eq!(query.parameters(), params(&[("ID_user", 7_i64.into())]));
    Ok(())
}

// --- WHERE ---

#[test]
fn test_where_question_marks_are_numbered() -> TestResult {
    let query = q()
        .where_(args!["q.age = ?", 30])?
        .where_(args!["q.name = ?", "Brian"])?;
    assert_eq!(
        query.to_cypher(),
        "WHERE (q.age = $question_mark_param) AND (q.name = $question_mark_param2)"
    );
    assert_eq!(
        query.parameters(),
        params(&[("question_mark_param", 30_i64.into()), ("question_mark_param2", "Brian".into())])
    );
    Ok(())
}

#[test]
fn test_where_question_mark_list() -> TestResult {
    let query = q().where_(args!["q.age IN ?", vec![30, 32, 34]])?;
    assert_eq!(query.to_cypher(), "WHERE (q.age IN $question_mark_param)");
    Ok(())
}

#[test]
fn test_where_and_where_not() -> TestResult {
    let query = q().where_("q.age > 30")?.where_not("q.name = 'Brian'")?;
    assert_eq!(query.to_cypher(), "WHERE (q.age > 30) AND NOT(q.name = 'Brian')");

    let query = q().where_not(map! { "q" => map! { "age" => vec![30, 32] } })?;
    assert_eq!(query.to_cypher(), "WHERE NOT(q.age IN $q_age)");
    Ok(())
}

#[test]
fn test_where_already_parenthesized() -> TestResult {
    assert_eq!(q().where_("(q.age > 30)")?.to_cypher(), "WHERE (q.age > 30)");
    Ok(())
}

#[test]
fn test_where_neo_id() -> TestResult {
    let query = q().where_(map! { "q" => map! { "neo_id" => vec![1, 2] } })?;
    assert_eq!(query.to_cypher(), "WHERE (ID(q) IN $ID_q)");
    assert_eq!(
        query.parameters()["ID_q"],
        BoltType::List(BoltList { value: vec![BoltType::from(1_i64), BoltType::from(2_i64)] })
    );
    Ok(())
}

#[test]
fn test_where_range() -> TestResult {
    let query = q().where_(map! { "q" => map! { "age" => 30..=40 } })?;
    assert_eq!(
        query.to_cypher(),
        "WHERE (q.age >= $q_age_range_min AND q.age <= $q_age_range_max)"
    );
    assert_eq!(
        query.parameters(),
        params(&[("q_age_range_min", 30_i64.into()), ("q_age_range_max", 40_i64.into())])
    );
    Ok(())
}

#[test]
fn test_where_colliding_names_are_numbered() -> TestResult {
    let query = q().where_(map! { "q.age" => 30 })?.where_(map! { "q.age" => 31 })?;
    assert_eq!(query.to_cypher(), "WHERE (q.age = $q_age) AND (q.age = $q_age2)");
    Ok(())
}

#[test]
fn test_raw_text_with_bound_params() -> TestResult {
    let query = q().where_("n.name = $name")?.params([("name", "Brian")]);
    assert_eq!(query.to_cypher(), "WHERE (n.name = $name)");
    assert_eq!(query.parameters(), params(&[("name", "Brian".into())]));
    Ok(())
}

// --- Projections and paging ---

#[test]
fn test_unwind() -> TestResult {
    assert_eq!(q().unwind(map! { "x" => vec![1, 3, 5] })?.to_cypher(), "UNWIND [1, 3, 5] AS x");
    assert_eq!(q().unwind("val AS x")?.to_cypher(), "UNWIND val AS x");
    Ok(())
}

#[test]
fn test_return() -> TestResult {
    assert_eq!(q().return_(sym("q"))?.to_cypher(), "RETURN q");
    assert_eq!(
        q().return_(map! { "q" => args![sym("name"), sym("age")], "r" => sym("grade") })?.to_cypher(),
        "RETURN q.name, q.age, r.grade"
    );
    assert_eq!(q().return_(map! { "q" => sym("neo_id") })?.to_cypher(), "RETURN ID(q)");
    Ok(())
}

#[test]
fn test_order() -> TestResult {
    assert_eq!(q().order("q.name")?.to_cypher(), "ORDER BY q.name");
    assert_eq!(q().order_by(map! { "q" => sym("age") })?.to_cypher(), "ORDER BY q.age");
    assert_eq!(
        q().order(map! { "q" => map! { "age" => sym("desc") } })?.order("q.name")?.to_cypher(),
        "ORDER BY q.age DESC, q.name"
    );
    Ok(())
}

#[test]
fn test_reorder_replaces_previous_order() -> TestResult {
    let query = q()
        .match_(sym("n"))?
        .order(map! { "n" => sym("name") })?
        .reorder(map! { "n" => sym("age") })?;
    assert_eq!(query.to_cypher(), "MATCH (n) ORDER BY n.age");
    Ok(())
}

#[test]
fn test_limit_and_skip() -> TestResult {
    let query = q().limit(3)?;
    assert_eq!(query.to_cypher(), "LIMIT $limit_3");
    assert_eq!(query.parameters(), params(&[("limit_3", 3_i64.into())]));

    assert_eq!(q().limit("3")?.to_cypher(), "LIMIT $limit_3");
    assert_eq!(q().offset(6)?.to_cypher(), "SKIP $skip_6");
    Ok(())
}

#[test]
fn test_last_limit_wins() -> TestResult {
    let query = q().limit(3)?.limit(5)?;
    assert_eq!(query.to_cypher(), "LIMIT $limit_5");
    assert_eq!(query.parameters(), params(&[("limit_5", 5_i64.into())]));
    assert!(query.parameter_table().contains("limit_3"));

    let query = q().skip(5)?.skip(10)?;
    assert_eq!(query.to_cypher(), "SKIP $skip_10");
    assert_eq!(query.parameters(), params(&[("skip_10", 10_i64.into())]));
    Ok(())
}

#[test]
fn test_nil_limit_clears_earlier_limit() -> TestResult {
    let query = q().limit(3)?.limit(Arg::Nil)?;
    assert_eq!(query.to_cypher(), "");
    assert!(query.parameters().is_empty());

    let query = q().match_(sym("n"))?.limit(3)?.limit(Arg::Nil)?;
    assert_eq!(query.to_cypher(), "MATCH (n)");
    assert!(query.parameters().is_empty());

    let query = q().skip(5)?.skip(Arg::Nil)?;
    assert_eq!(query.to_cypher(), "");
    assert!(query.parameters().is_empty());

    assert_eq!(q().match_(sym("n"))?.limit(Arg::Nil)?.to_cypher(), "MATCH (n)");
    Ok(())
}

#[test]
fn test_with_forms() -> TestResult {
    assert_eq!(q().match_(sym("q"))?.with(sym("q"))?.return_(sym("q"))?.to_cypher(), "MATCH (q) WITH q RETURN q");
    assert_eq!(q().with(map! { "count" => "count(q)" })?.to_cypher(), "WITH count(q) AS count");
    assert_eq!(q().with_distinct(sym("q"))?.to_cypher(), "WITH DISTINCT q");
    assert_eq!(
        q().with_distinct(map! { "names" => "collect(q.name)" })?.to_cypher(),
        "WITH DISTINCT collect(q.name) AS names"
    );
    Ok(())
}

// --- Writes ---

#[test]
fn test_create() -> TestResult {
    assert_eq!(q().create("(:Person)")?.to_cypher(), "CREATE (:Person)");
    assert_eq!(q().create(sym("Person"))?.to_cypher(), "CREATE (:Person)");
    assert_eq!(
        q().create(map! { "age" => 41, "height" => 70 })?.to_cypher(),
        "CREATE ( {age: $age, height: $height})"
    );
    assert_eq!(
        q().create(map! { "q" => map! { "Person" => map! { "age" => 41 } } })?.to_cypher(),
        "CREATE (q:`Person` {age: $q_Person_age})"
    );
    assert_eq!(
        q().create(map! { "q" => map! { "Child:Person" => map! { "age" => 41 } } })?.to_cypher(),
        "CREATE (q:`Child:Person` {age: $q_Child_Person_age})"
    );
    Ok(())
}

#[test]
fn test_create_unique_and_merge() -> TestResult {
    assert_eq!(q().create_unique("(:Person)")?.to_cypher(), "MERGE (:Person)");
    assert_eq!(
        q().merge(sym("Person"))?.merge(sym("Thing"))?.to_cypher(),
        "MERGE (:Person) MERGE (:Thing)"
    );
    assert_eq!(
        q().merge(map! { "Person" => map! { "age" => 41 } })?.to_cypher(),
        "MERGE (:`Person` {age: $Person_age})"
    );
    Ok(())
}

#[test]
fn test_delete() -> TestResult {
    assert_eq!(q().delete(args!["n", sym("o")])?.to_cypher(), "DELETE n, o");
    assert_eq!(q().delete(sym("n"))?.delete(sym("o"))?.to_cypher(), "DELETE n, o");
    assert_eq!(q().detach_delete(args!["n", sym("o")])?.to_cypher(), "DETACH DELETE n, o");
    Ok(())
}

#[test]
fn test_set() -> TestResult {
    let query = q().set(map! { "n" => map! { "name" => "Brian", "age" => 30 } })?;
    assert_eq!(query.to_cypher(), "SET n.`name` = $setter_n_name, n.`age` = $setter_n_age");
    assert_eq!(
        query.parameters(),
        params(&[("setter_n_name", "Brian".into()), ("setter_n_age", 30_i64.into())])
    );

    assert_eq!(q().set("n = {name: 'Brian'}")?.to_cypher(), "SET n = {name: 'Brian'}");
    assert_eq!(q().set(map! { "n" => sym("Label") })?.to_cypher(), "SET n:`Label`");
    assert_eq!(q().set(map! { "n" => args![sym("Label"), "Foo"] })?.to_cypher(), "SET n:`Label`, n:`Foo`");
    assert_eq!(q().set(map! { "n" => Arg::Nil })?.to_cypher(), "");
    Ok(())
}

#[test]
fn test_set_props() -> TestResult {
    let query = q().match_(map! { "q" => map! { "age" => 30 } })?.set_props(map! { "q" => map! { "age" => 31 } })?;
    assert_eq!(query.to_cypher(), "MATCH (q {age: $q_age}) SET q = $q_set_props");

    let mut props = BoltMap::new();
    props.put(BoltString::from("age"), BoltType::from(31_i64));
    assert_eq!(
        query.parameters(),
        params(&[("q_age", 30_i64.into()), ("q_set_props", BoltType::Map(props))])
    );
    Ok(())
}

#[test]
fn test_on_create_and_on_match_set() -> TestResult {
    let query = q()
        .merge("(n:Person)")?
        .on_create_set(map! { "n" => map! { "created" => 1 } })?
        .on_match_set(map! { "n" => map! { "seen" => 2 } })?;
    assert_eq!(
        query.to_cypher(),
        "MERGE (n:Person) ON CREATE SET n.`created` = $setter_n_created ON MATCH SET n.`seen` = $setter_n_seen"
    );
    assert_eq!(q().on_create_set(map! {})?.to_cypher(), "");
    assert_eq!(q().on_match_set(map! {})?.to_cypher(), "");
    Ok(())
}

#[test]
fn test_remove() -> TestResult {
    assert_eq!(q().remove("n.prop")?.to_cypher(), "REMOVE n.prop");
    assert_eq!(q().remove(map! { "n" => "prop" })?.to_cypher(), "REMOVE n.prop");
    assert_eq!(q().remove(map! { "n" => ":prop" })?.to_cypher(), "REMOVE n:`prop`");
    assert_eq!(q().remove(map! { "n" => sym("American") })?.to_cypher(), "REMOVE n:`American`");
    assert_eq!(
        q().remove(map! { "n" => args![sym("American"), "prop"] })?.to_cypher(),
        "REMOVE n:`American`, n.prop"
    );
    Ok(())
}

// --- Whole queries ---

#[test]
fn test_start() -> TestResult {
    assert_eq!(
        q().start(map! { "r" => "node:nodes(name = \"Brian\")" })?.to_cypher(),
        "START r = node:nodes(name = \"Brian\")"
    );
    assert_eq!(
        q().start("r=node:nodes(name = \"Brian\")")?.match_("r--m")?.to_cypher(),
        "START r=node:nodes(name = \"Brian\") MATCH r--m"
    );
    Ok(())
}

#[test]
fn test_clauses_render_in_canonical_order() -> TestResult {
    let query = q()
        .where_("q.age > 30")?
        .start("n")?
        .match_(map! { "q" => sym("Person") })?;
    assert_eq!(query.to_cypher(), "START n MATCH (q:`Person`) WHERE (q.age > 30)");

    let query = q()
        .return_(sym("q"))?
        .limit(3)?
        .order("q.name")?
        .skip(2)?
        .match_(sym("q"))?;
    assert_eq!(query.to_cypher(), "MATCH (q) RETURN q ORDER BY q.name SKIP $skip_2 LIMIT $limit_3");
    Ok(())
}

#[test]
fn test_break_separates_statements() -> TestResult {
    let query = q()
        .match_(map! { "q" => sym("Person") })?
        .match_("r:Car")?
        .break_()
        .break_()
        .match_("(p:Person)-->q")?;
    assert_eq!(query.to_cypher(), "MATCH (q:`Person`), r:Car MATCH (p:Person)-->q");
    Ok(())
}

#[test]
fn test_with_segments() -> TestResult {
    let query = q()
        .match_(map! { "q" => sym("Person") })?
        .with(map! { "count" => "count(q)" })?
        .where_("count > 2")?
        .with(map! { "new_count" => "count + 5" })?;
    assert_eq!(
        query.to_cypher(),
        "MATCH (q:`Person`) WITH count(q) AS count WHERE (count > 2) WITH count + 5 AS new_count"
    );
    Ok(())
}

#[test]
fn test_order_after_with_stays_with_projection() -> TestResult {
    let query = q()
        .match_(map! { "a" => sym("Person") })?
        .with(sym("a"))?
        .order(map! { "a" => map! { "name" => sym("desc") } })?
        .where_(map! { "a" => map! { "name" => "Foo" } })?;
    assert_eq!(
        query.to_cypher(),
        "MATCH (a:`Person`) WITH a ORDER BY a.name DESC WHERE (a.name = $a_name)"
    );
    Ok(())
}

#[test]
fn test_limit_after_with_order() -> TestResult {
    let query = q()
        .with(sym("a"))?
        .order(map! { "a" => map! { "name" => sym("desc") } })?
        .limit(2)?
        .where_(map! { "a" => map! { "name" => "Foo" } })?;
    assert_eq!(
        query.to_cypher(),
        "WITH a ORDER BY a.name DESC LIMIT $limit_2 WHERE (a.name = $a_name)"
    );
    Ok(())
}

#[test]
fn test_with_after_paging_moves_ahead() -> TestResult {
    let query = q()
        .order(map! { "a" => map! { "name" => sym("desc") } })?
        .with(sym("a"))?
        .where_(map! { "a" => map! { "name" => "Foo" } })?;
    assert_eq!(query.to_cypher(), "WITH a ORDER BY a.name DESC WHERE (a.name = $a_name)");

    let query = q()
        .limit(2)?
        .with(sym("a"))?
        .where_(map! { "a" => map! { "name" => "Foo" } })?;
    assert_eq!(query.to_cypher(), "WITH a LIMIT $limit_2 WHERE (a.name = $a_name)");
    Ok(())
}

#[test]
fn test_limit_after_where_following_with() -> TestResult {
    let query = q().with("1 AS a")?.where_(map! { "a" => 1 })?.limit(2)?;
    assert_eq!(query.to_cypher(), "WITH 1 AS a WHERE (a = $a) LIMIT $limit_2");
    Ok(())
}

#[test]
fn test_call_opens_statement() -> TestResult {
    let query = q()
        .match_(sym("n"))?
        .call("db.labels() YIELD label")?
        .return_("label")?;
    assert_eq!(query.to_cypher(), "MATCH (n) CALL db.labels() YIELD label RETURN label");
    Ok(())
}

#[test]
fn test_union() -> TestResult {
    let left = q().match_(map! { "o" => sym("Person") })?.where_(map! { "o" => map! { "age" => 10 } })?;
    let right = q().match_(sym("n"))?.where_(map! { "n" => map! { "name" => "Joe" } })?;
    assert_eq!(
        left.union_cypher(&right, false),
        "MATCH (o:`Person`) WHERE (o.age = $o_age) UNION MATCH (n) WHERE (n.name = $n_name)"
    );
    assert_eq!(
        left.union_cypher(&right, true),
        "MATCH (o:`Person`) WHERE (o.age = $o_age) UNION ALL MATCH (n) WHERE (n.name = $n_name)"
    );
    Ok(())
}

// --- Combining ---

#[test]
fn test_and_merges_clauses() -> TestResult {
    let merged = q().match_(map! { "p" => sym("Person") })? & q().match_(map! { "c" => sym("Car") })?;
    assert_eq!(merged.to_cypher(), "MATCH (p:`Person`), (c:`Car`)");
    Ok(())
}

#[test]
fn test_and_renames_colliding_params() -> TestResult {
    let left = q().where_(map! { "n" => map! { "age" => 1 } })?;
    let right = q().where_(map! { "n" => map! { "age" => 2 } })?;
    let merged = &left & &right;

    assert_eq!(merged.to_cypher(), "WHERE (n.age = $n_age) AND (n.age = $n_age2)");
    assert_eq!(merged.parameters(), params(&[("n_age", 1_i64.into()), ("n_age2", 2_i64.into())]));
    assert_eq!(right.to_cypher(), "WHERE (n.age = $n_age)");
    Ok(())
}

#[test]
fn test_and_keeps_parser_option() -> TestResult {
    let left = Query::with_options(QueryOptions { parser: Some("2.3".into()) }).match_(sym("n"))?;
    let merged = q().match_(sym("m"))?.and(&left);
    assert_eq!(merged.to_cypher(), "CYPHER 2.3 MATCH (m), (n)");
    Ok(())
}

// --- Query behavior ---

#[test]
fn test_builder_is_immutable() -> TestResult {
    let base = q().match_(map! { "n" => sym("Person") })?;
    let young = base.where_(map! { "n.age" => 20 })?;
    let old = base.where_(map! { "n.age" => 80 })?;

    assert_eq!(base.to_cypher(), "MATCH (n:`Person`)");
    assert!(base.parameters().is_empty());
    assert_eq!(young.parameters()["n_age"], BoltType::from(20_i64));
    assert_eq!(old.parameters()["n_age"], BoltType::from(80_i64));
    Ok(())
}

#[test]
fn test_parser_option() -> TestResult {
    let query = Query::with_options(QueryOptions { parser: Some("2.0".into()) });
    assert_eq!(query.to_cypher(), "CYPHER 2.0");
    assert_eq!(query.match_(sym("n"))?.to_cypher(), "CYPHER 2.0 MATCH (n)");
    assert_eq!(query.options().parser.as_deref(), Some("2.0"));
    Ok(())
}

#[test]
fn test_empty_query() {
    assert_eq!(q().to_cypher(), "");
    assert!(q().parameters().is_empty());
}

#[test]
fn test_pretty() -> TestResult {
    let query = q().match_(sym("n"))?.set(map! { "n" => sym("Seen") })?.return_(sym("n"))?;
    assert_eq!(
        query.to_cypher_pretty(),
        "\x1b[36mMATCH\x1b[0m (n)\n\x1b[33mSET\x1b[0m n:`Seen`\n\x1b[36mRETURN\x1b[0m n"
    );

    let query = q().match_(args![sym("n"), sym("m")])?;
    assert_eq!(query.to_cypher_pretty(), "\x1b[36mMATCH\x1b[0m \n  (n), \n  (m)");

    let query = q().where_("n.age > 1")?.where_("n.age < 9")?;
    assert_eq!(query.to_cypher_pretty(), "\x1b[36mWHERE\x1b[0m \n  (n.age > 1) AND \n  (n.age < 9)");
    Ok(())
}

#[test]
fn test_has_clause_and_without() -> TestResult {
    let query = q().match_(sym("n"))?.limit(1)?;
    assert!(query.has_clause(ClauseKind::Match));
    assert!(query.has_clause(ClauseKind::Limit));
    assert!(!query.has_clause(ClauseKind::Return));

    let trimmed = query.without(ClauseKind::Limit);
    assert!(!trimmed.has_clause(ClauseKind::Limit));
    assert_eq!(trimmed.to_cypher(), "MATCH (n)");
    Ok(())
}

#[test]
fn test_display_and_debug() -> TestResult {
    let query = q().match_(sym("n"))?.where_(map! { "n.age" => 1 })?;
    assert_eq!(query.to_string(), "MATCH (n) WHERE (n.age = $n_age)");
    let debug = format!("{query:?}");
    assert!(debug.starts_with("Query"));
    assert!(debug.contains("MATCH (n)"));
    Ok(())
}

// --- Errors ---

#[test]
fn test_invalid_arguments_are_rejected() {
    let err = q().where_(true).unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument for WHERE.  Full arguments: true");

    assert!(matches!(q().limit("many"), Err(QueryError::InvalidArgument { keyword: "LIMIT", .. })));
    assert!(matches!(q().match_(3), Err(QueryError::InvalidArgument { keyword: "MATCH", .. })));
    assert!(matches!(
        q().set(map! { "n" => map! { "age" => 1..3 } }),
        Err(QueryError::InvalidArgument { keyword: "SET", .. })
    ));
}

#[test]
fn test_failed_call_leaves_query_usable() -> TestResult {
    let base = q().match_(sym("n"))?;
    assert!(base.where_(true).is_err());
    assert_eq!(base.return_(sym("n"))?.to_cypher(), "MATCH (n) RETURN n");
    Ok(())
}

#[test]
fn test_compilation_is_repeatable() -> TestResult {
    let query = q()
        .match_(map! { "n" => sym("Person") })?
        .where_(args!["n.age IN ?", vec![30, 32, 34]])?
        .where_(args!["n.age != ?", 60])?
        .limit(3)?
        .limit(5)?;
    let text = query.to_cypher();
    assert_eq!(
        text,
        "MATCH (n:`Person`) WHERE (n.age IN $question_mark_param) AND (n.age != $question_mark_param2) LIMIT $limit_5"
    );
    assert_eq!(query.to_cypher(), text);
    assert_eq!(query.parameters(), query.parameters());
    assert_eq!(query.parameters().len(), 3);
    Ok(())
}
