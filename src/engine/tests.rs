use super::metrics::DispatchMetrics;
use super::selector::collect;
use super::{Rejection, RequestDescriptor, RouteTable};
use crate::{ActionSpec, Arity, Dispatch, MethodSet, constraints};

fn dispatch<'t>(table: &'t RouteTable, method: &str, path: &str) -> Option<&'t str> {
    table.dispatch(&RequestDescriptor::parse(method, path)).action_name()
}

fn get<'t>(table: &'t RouteTable, path: &str) -> Option<&'t str> {
    dispatch(table, "GET", path)
}

#[test]
fn longest_path_wins() {
    let table = RouteTable::new([
        ActionSpec::new("/docs/page").path("docs/page").args(1),
        ActionSpec::new("/docs").path("docs").args([constraints::alpha(), constraints::alpha()]),
        ActionSpec::new("/any").args(Arity::Any),
        ActionSpec::new("/a/b").path("a/b"),
        ActionSpec::new("/a").path("a").args(1),
    ])
    .unwrap();

    // (request path, expected action)
    let cases: Vec<(&str, &str)> = vec![
        ("/docs/page/intro", "/docs/page"),
        ("/docs/other/intro", "/docs"),
        ("/docs/page", "/any"),
        // An unbounded action on the longer path still beats an exact one.
        ("/a/b", "/a/b"),
        ("/a/c", "/a"),
        ("/", "/any"),
    ];
    for (path, expected) in cases {
        assert_eq!(get(&table, path), Some(expected), "{path}");
    }
}

#[test]
fn longer_chain_beats_shorter_flat_action() {
    let table = RouteTable::new([
        ActionSpec::new("/user/base").path("user").chained("/").capture([constraints::int()]),
        ActionSpec::new("/user/edit").path("edit").chained("/user/base").args(0),
        ActionSpec::new("/user/flat").path("user").args(2),
    ])
    .unwrap();
    assert_eq!(get(&table, "/user/5/edit"), Some("/user/edit"));
    // The chain's Int capture fails and the flat action takes over.
    assert_eq!(get(&table, "/user/bob/edit"), Some("/user/flat"));
}

#[test]
fn last_defined_of_three_siblings_wins() {
    let table = RouteTable::new([
        ActionSpec::new("/first").path("x").args(1),
        ActionSpec::new("/second").path("x").args(1),
        ActionSpec::new("/third").path("x").args(1),
    ])
    .unwrap();
    assert_eq!(get(&table, "/x/1"), Some("/third"));

    let table = RouteTable::new([
        ActionSpec::new("/base").path("x").capture(0),
        ActionSpec::new("/first").chained("/base").args(1),
        ActionSpec::new("/second").chained("/base").args(1),
        ActionSpec::new("/third").chained("/base").args(1),
    ])
    .unwrap();
    assert_eq!(get(&table, "/x/1"), Some("/third"));
}

#[test]
fn explicit_registration_order_overrides_insertion_order() {
    let mut builder = RouteTable::builder();
    builder
        .insert(ActionSpec::new("/late").path("x").args(1).order(9))
        .insert(ActionSpec::new("/early").path("x").args(1).order(1));
    let table = builder.build().unwrap();
    assert_eq!(get(&table, "/x/1"), Some("/late"));
}

#[test]
fn typed_declared_after_untyped_wins_for_numbers() {
    let table = RouteTable::new([
        ActionSpec::new("/user/view").path("user").args(1),
        ActionSpec::new("/user/view_by_id").path("user").args([constraints::int()]),
    ])
    .unwrap();
    assert_eq!(get(&table, "/user/42"), Some("/user/view_by_id"));
    assert_eq!(get(&table, "/user/bob"), Some("/user/view"));
}

#[test]
fn untyped_declared_after_typed_shadows_it() {
    let table = RouteTable::new([
        ActionSpec::new("/user/view_by_id").path("user").args([constraints::int()]),
        ActionSpec::new("/user/view").path("user").args(1),
    ])
    .unwrap();
    assert_eq!(get(&table, "/user/42"), Some("/user/view"));
    assert_eq!(get(&table, "/user/bob"), Some("/user/view"));
}

#[test]
fn unbounded_args_lose_to_bounded_args_of_equal_length() {
    let table = RouteTable::new([
        ActionSpec::new("/user/exact").path("user").args(1),
        ActionSpec::new("/user/any").path("user"),
    ])
    .unwrap();
    assert_eq!(get(&table, "/user/42"), Some("/user/exact"));
    assert_eq!(get(&table, "/user/42/43"), Some("/user/any"));
}

#[test]
fn chain_ties_are_decided_where_the_chains_diverge() {
    let mut builder = RouteTable::builder();
    builder
        .insert(ActionSpec::new("/base").path("x").capture(1).order(0))
        .insert(ActionSpec::new("/mid_old").path("y").chained("/base").capture(1).order(1))
        .insert(ActionSpec::new("/mid_new").path("y").chained("/base").capture(1).order(4))
        .insert(ActionSpec::new("/end_newest").path("z").chained("/mid_old").args(0).order(5))
        .insert(ActionSpec::new("/end_old").path("z").chained("/mid_new").args(0).order(2));
    let table = builder.build().unwrap();

    let hit = table.dispatch(&RequestDescriptor::parse("GET", "/x/1/y/2/z"));
    let matched = hit.matched().unwrap();
    assert_eq!(matched.action_names(), vec!["/base", "/mid_new", "/end_old"]);
    assert_eq!(matched.captures(), vec!["1", "2"]);
}

#[test]
fn chain_ties_fall_through_to_the_older_branch() {
    let table = RouteTable::new([
        ActionSpec::new("/base").path("x").capture(1),
        ActionSpec::new("/mid_old").path("y").chained("/base").capture(1),
        ActionSpec::new("/mid_new").path("y").chained("/base").capture([constraints::int()]),
        ActionSpec::new("/end_a").path("z").chained("/mid_old").args(0),
        ActionSpec::new("/end_b").path("z").chained("/mid_new").args(0),
    ])
    .unwrap();
    assert_eq!(get(&table, "/x/1/y/2/z"), Some("/end_b"));
    assert_eq!(get(&table, "/x/1/y/two/z"), Some("/end_a"));
}

#[test]
fn tuple_capture_is_rejected_only_while_validating() {
    let int3 = || [constraints::int(), constraints::int(), constraints::int()];
    let date_chain = || {
        [
            ActionSpec::new("/date/base").path("date").chained("/").capture(int3()),
            ActionSpec::new("/date/show").chained("/date/base").args(0),
        ]
    };

    let with_fallback =
        RouteTable::new(std::iter::once(ActionSpec::new("/date/raw").path("date")).chain(date_chain())).unwrap();
    let request = RequestDescriptor::parse("GET", "/date/2024/x/01");

    // Collecting keeps the chain: only counts and literals are checked.
    let mut metrics = DispatchMetrics::default();
    let candidates = collect(&with_fallback, &request.segment_refs(), &mut metrics);
    let base = with_fallback.id_of("/date/base").unwrap();
    assert_eq!(candidates[0].links[0].action, base);
    assert_eq!(metrics.chain_candidates, 1);

    let trace = with_fallback.dispatch_verbose(&request);
    assert_eq!(trace.outcome.action_name(), Some("/date/raw"));
    assert_eq!(trace.attempts[0].rejection, Some(Rejection::Capture(base)));
    assert_eq!(trace.attempts[1].rejection, None);

    let valid = with_fallback.dispatch(&RequestDescriptor::parse("GET", "/date/2024/2/1"));
    assert_eq!(valid.action_name(), Some("/date/show"));

    let alone = RouteTable::new(date_chain()).unwrap();
    let trace = alone.dispatch_verbose(&request);
    assert!(matches!(trace.outcome, Dispatch::NoMatch));
    assert_eq!(trace.attempts.len(), 1);
}

#[test]
fn exact_paths_round_trip_in_any_registration_order() {
    let paths = ["/", "/about", "/about/team", "/blog", "/blog/archive", "/contact", "/a/b/c/d"];
    let specs = || paths.iter().map(|p| ActionSpec::new(format!("{p}#action")).path(p).args(0));

    for table in [RouteTable::new(specs()).unwrap(), RouteTable::new(specs().rev()).unwrap()] {
        for path in paths {
            let expected = format!("{path}#action");
            assert_eq!(get(&table, path), Some(expected.as_str()), "{path}");
        }
    }
}

#[test]
fn method_mismatch_falls_through() {
    let table = RouteTable::new([
        ActionSpec::new("/form").path("form").args(0),
        ActionSpec::new("/form/submit").path("form").args(0).methods(MethodSet::POST | MethodSet::PUT),
    ])
    .unwrap();

    let cases: Vec<(&str, &str)> =
        vec![("POST", "/form/submit"), ("put", "/form/submit"), ("GET", "/form"), ("BREW", "/form")];
    for (method, expected) in cases {
        assert_eq!(dispatch(&table, method, "/form"), Some(expected), "{method}");
    }
}

#[test]
fn methods_are_checked_on_every_link() {
    let table = RouteTable::new([
        ActionSpec::new("/admin").path("admin").capture(0).methods(MethodSet::POST),
        ActionSpec::new("/admin/run").path("run").chained("/admin").args(0),
        ActionSpec::new("/fallback").path("admin").args(1),
    ])
    .unwrap();
    assert_eq!(dispatch(&table, "POST", "/admin/run"), Some("/admin/run"));
    assert_eq!(dispatch(&table, "GET", "/admin/run"), Some("/fallback"));
}

#[test]
fn unmatched_requests_are_no_match() {
    let table = RouteTable::new([ActionSpec::new("/about").path("about").args(0)]).unwrap();
    for path in ["/", "/about/us", "/contact"] {
        assert!(matches!(table.dispatch(&RequestDescriptor::parse("GET", path)), Dispatch::NoMatch), "{path}");
    }
}

#[test]
fn table_is_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RouteTable>();

    let table = RouteTable::new([
        ActionSpec::new("/user/view").path("user").args(1),
        ActionSpec::new("/user/view_by_id").path("user").args([constraints::int()]),
    ])
    .unwrap();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let table = &table;
            scope.spawn(move || {
                for i in 0..200 {
                    let id = format!("/user/{}", worker * 1000 + i);
                    assert_eq!(get(table, &id), Some("/user/view_by_id"));
                    assert_eq!(get(table, "/user/bob"), Some("/user/view"));
                }
            });
        }
    });
}

#[test]
fn odd_segments_never_match_literal_parts() {
    let table = RouteTable::new([
        ActionSpec::new("/index").args(0),
        ActionSpec::new("/about").path("about").args(0),
        ActionSpec::new("/a/b").path("a/b").args(0),
    ])
    .unwrap();

    let cases: Vec<&[&str]> = vec![&[""], &["a/b"], &["", "about"], &["a", "b/"]];
    for segments in cases {
        assert!(!crate::match_request("GET", segments, &table).is_match(), "{segments:?}");
    }
    assert_eq!(crate::match_request("GET", &["a", "b"], &table).action_name(), Some("/a/b"));
}
