use super::predicates;
use crate::Constraint;

#[test]
fn single_segment_predicates() {
    // (constraint name, segment, expected)
    let cases: Vec<(&str, &str, bool)> = vec![
        ("Int", "42", true),
        ("Int", "-7", true),
        ("Int", "+7", true),
        ("Int", "0042", true),
        ("Int", "4.2", false),
        ("Int", "-", false),
        ("Int", "", false),
        ("Int", "bob", false),
        ("UInt", "42", true),
        ("UInt", "-7", false),
        ("UInt", "", false),
        ("Alpha", "bob", true),
        ("Alpha", "Zoë", true),
        ("Alpha", "bob2", false),
        ("Alpha", "", false),
        ("Slug", "hello-world", true),
        ("Slug", "v2", true),
        ("Slug", "hello--world", false),
        ("Slug", "-hello", false),
        ("Slug", "Hello", false),
        ("Uuid", "67e55044-10b1-426f-9247-bb680e5fe0c8", true),
        ("Uuid", "67E55044-10B1-426F-9247-BB680E5FE0C8", true),
        ("Uuid", "67e5504410b1426f9247bb680e5fe0c8", false),
        ("Uuid", "67e55044-10b1-426f-9247-bb680e5fe0c", false),
        ("Date", "2024-02-29", true),
        ("Date", "2023-02-29", false),
        ("Date", "2024-2-29", false),
        ("Date", "yesterday", false),
    ];

    for (name, segment, expected) in cases {
        let constraint = super::builtin(name).unwrap();
        assert_eq!(constraint.check(&[segment]), expected, "{name} on {segment:?}");
    }
}

#[test]
fn ymd_spans_three_segments() {
    let ymd = super::ymd();
    assert_eq!(ymd.width(), 3);

    let cases: Vec<([&str; 3], bool)> = vec![
        (["2024", "02", "29"], true),
        (["2024", "2", "9"], true),
        (["2023", "02", "29"], false),
        (["2024", "13", "01"], false),
        (["2024", "-1", "01"], false),
        (["year", "02", "01"], false),
    ];
    for (values, expected) in cases {
        assert_eq!(ymd.check(&values), expected, "{values:?}");
    }

    assert!(!ymd.check(&["2024", "02"]));
    assert!(!predicates::is_ymd(&["2024", "02", "29", "1"]));
}

#[test]
fn registry_resolves_every_builtin_by_exact_name() {
    let names = super::builtin_names();
    assert_eq!(names, vec!["Alpha", "Date", "Int", "Slug", "UInt", "Uuid", "Ymd"]);
    for name in names {
        assert_eq!(super::builtin(name).map(|c| c.name().to_string()), Some(name.to_string()));
    }
    assert!(super::builtin("int").is_none());
    assert!(super::builtin("Str").is_none());
}

#[test]
fn pattern_constraints_are_anchored() {
    let hex = Constraint::pattern("Hex", "[0-9a-f]+").unwrap();
    assert!(hex.check(&["beef"]));
    assert!(!hex.check(&["xbeef"]));
    assert!(!hex.check(&["beefx"]));
    assert!(Constraint::pattern("Broken", "(").is_err());
}
