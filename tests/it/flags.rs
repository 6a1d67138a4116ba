use expect_test::expect;

use subopts::{ErrorKind, SubcommandParser};

use crate::check;

#[test]
fn attached_values() {
    let mut p = SubcommandParser::new();
    p.on("-o, --opt VAL", "an option", "opt").unwrap();
    check(
        &mut p,
        "--opt=val",
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
    check(
        &mut p,
        "-oval",
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
fn double_dash_stops_flag_parsing() {
    let mut p = SubcommandParser::new();
    p.subcommand_with("subc", "sub description", |cmd| cmd.on("-s VAL", "a sub option", "subopt"));
    check(
        &mut p,
        "subc -- -s",
        expect![[r#"
            ParseResult {
                command: Some(
                    "subc",
                ),
                positionals: [
                    "-s",
                ],
                config: {
                    "subc": {},
                },
            }
        "#]],
    );
}

#[test]
fn engine_errors_pass_through() {
    let mut p = SubcommandParser::new();
    p.on("-o VAL", "an option", "opt").unwrap();
    check(&mut p, "-x", expect!["unexpected flag: `-x`"]);
    check(&mut p, "-o", expect!["expected a value for `-o`"]);
    check(&mut p, "-o -x", expect!["expected a value for `-o`"]);
}

#[test]
fn switch_rejects_attached_value() {
    let mut p = SubcommandParser::new();
    p.on("-e, --emoji", "a switch", "emoji").unwrap();
    check(&mut p, "--emoji=yes", expect!["unexpected value for `--emoji`"]);
}

#[test]
fn malformed_descriptor() {
    let mut p = SubcommandParser::new();
    let err = p.on("opt", "no dashes at all", "opt").unwrap_err();
    assert_eq!(err.to_string(), "malformed flag descriptor: `opt`");
    assert_eq!(err.kind(), &ErrorKind::Flag);

    let err = p.on("-long VAL", "short with a long name", "opt").unwrap_err();
    assert_eq!(err.to_string(), "malformed flag descriptor: `-long VAL`");
}
