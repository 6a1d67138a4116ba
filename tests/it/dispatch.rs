use expect_test::expect;

use subopts::{ErrorKind, SubcommandParser};

use crate::{args, check};

#[test]
fn implicit_key_binding() {
    let mut p = SubcommandParser::new();
    p.on("-o VAL", "an option", "opt").unwrap();
    check(
        &mut p,
        "-o val",
        expect![[r#"
            ParseResult {
                command: None,
                positionals: [],
                config: {
                    "opt": "val",
                },
            }
        "#]],
    );
}

#[test]
fn explicit_callback() {
    let mut p = SubcommandParser::new();
    p.on_with("-n NAME", "a name", |config, value| config.set("name", value.to_uppercase()))
        .unwrap();
    check(
        &mut p,
        "-n alex",
        expect![[r#"
            ParseResult {
                command: None,
                positionals: [],
                config: {
                    "name": "ALEX",
                },
            }
        "#]],
    );
}

#[test]
fn subcommand_dispatch() {
    let mut p = SubcommandParser::new();
    p.on("-o VAL", "a global option", "opt").unwrap();
    p.subcommand_with("subc", "sub description", |cmd| {
        cmd.on("-s VAL", "a sub option", "subopt")
    });
    check(
        &mut p,
        "-o val subc -s subval positional",
        expect![[r#"
            ParseResult {
                command: Some(
                    "subc",
                ),
                positionals: [
                    "positional",
                ],
                config: {
                    "opt": "val",
                    "subc": {
                        "subopt": "subval",
                    },
                },
            }
        "#]],
    );
}

#[test]
fn alias_resolution() {
    let mut p = SubcommandParser::new();
    p.subcommand("subc,s", "sub description");
    check(
        &mut p,
        "s",
        expect![[r#"
            ParseResult {
                command: Some(
                    "subc",
                ),
                positionals: [],
                config: {
                    "subc": {},
                },
            }
        "#]],
    );
}

#[test]
fn no_subcommand() {
    let mut p = SubcommandParser::new();
    p.subcommand("subc", "sub description");
    check(
        &mut p,
        "",
        expect![[r#"
            ParseResult {
                command: None,
                positionals: [],
                config: {},
            }
        "#]],
    );
}

#[test]
fn invalid_subcommand() {
    let mut p = SubcommandParser::new();
    p.subcommand("subc", "sub description");
    check(&mut p, "bogus", expect!["invalid subcommand: `bogus`"]);

    let err = p.parse(&args("bogus")).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidSubcommand("bogus".to_string()));
}

#[test]
fn resolve() {
    let mut p = SubcommandParser::new();
    p.subcommand("subc,s", "sub description");
    assert_eq!(p.resolve("subc"), Some("subc"));
    assert_eq!(p.resolve("s"), Some("subc"));
    assert_eq!(p.resolve("nope"), None);
}

#[test]
fn last_registration_wins() {
    let mut p = SubcommandParser::new();
    p.subcommand("subc", "first");
    p.subcommand("subc x", "second");
    check(
        &mut p,
        "subc a",
        expect![[r#"
            ParseResult {
                command: Some(
                    "subc",
                ),
                positionals: [],
                config: {
                    "subc": {
                        "x": "a",
                    },
                },
            }
        "#]],
    );
}

#[test]
fn for_all_applies_to_every_scope() {
    let mut p = SubcommandParser::new();
    p.for_all(|cmd| cmd.on("-v, --verbose", "verbose output", "verbose"));
    p.subcommand("subc", "sub description");
    check(
        &mut p,
        "-v subc",
        expect![[r#"
            ParseResult {
                command: Some(
                    "subc",
                ),
                positionals: [],
                config: {
                    "subc": {},
                    "verbose": "true",
                },
            }
        "#]],
    );
    check(
        &mut p,
        "subc -v",
        expect![[r#"
            ParseResult {
                command: Some(
                    "subc",
                ),
                positionals: [],
                config: {
                    "subc": {
                        "verbose": "true",
                    },
                },
            }
        "#]],
    );
}

#[test]
fn subcommand_hook_overrides_for_all() {
    let mut p = SubcommandParser::new();
    p.for_all(|cmd| cmd.on("-v, --verbose", "verbose output", "verbose"));
    p.subcommand_with("subc", "sub description", |cmd| {
        cmd.on("-v LEVEL", "verbosity level", "level")
    });
    check(
        &mut p,
        "subc -v 3",
        expect![[r#"
            ParseResult {
                command: Some(
                    "subc",
                ),
                positionals: [],
                config: {
                    "subc": {
                        "level": "3",
                    },
                },
            }
        "#]],
    );
}

#[test]
fn parse_leaves_the_token_list_alone() {
    let mut p = SubcommandParser::new();
    p.on("-o VAL", "an option", "opt").unwrap();
    p.subcommand("subc [*rest]", "sub description");

    let original = args("-o val subc a b");
    p.parse(&original).unwrap();
    assert_eq!(original, args("-o val subc a b"));
}

#[test]
fn parse_in_place_consumes_matched_tokens() {
    let mut p = SubcommandParser::new();
    p.on("-o VAL", "an option", "opt").unwrap();
    p.subcommand("subc [*rest]", "sub description");
    p.subcommand("plain", "sub without annotations");

    let mut tokens = args("-o val subc a b");
    let res = p.parse_in_place(&mut tokens).unwrap();
    assert!(tokens.is_empty());
    assert!(res.positionals.is_empty());

    let mut tokens = args("plain a b");
    let res = p.parse_in_place(&mut tokens).unwrap();
    assert_eq!(tokens, args("a b"));
    assert_eq!(res.positionals, args("a b"));
}
