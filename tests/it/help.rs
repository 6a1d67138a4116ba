use expect_test::expect;

use subopts::SubcommandParser;

#[test]
fn help_is_column_aligned() {
    let mut p = SubcommandParser::new();
    p.set_banner("blah");
    p.on("-o, --opt VAL", "global opt", "opt").unwrap();
    p.subcommand("subc", "subc description");
    p.subcommand("copy,cp src *dst", "copy src to dst");
    expect![[r#"
        blah
            -o, --opt VAL    global opt

        commands:
            subc             subc description
            copy src *dst    copy src to dst
    "#]]
    .assert_eq(&p.help());
}

#[test]
fn help_without_subcommands() {
    let p = SubcommandParser::new();
    expect![[r#"
        usage: [options]

        commands:
    "#]]
    .assert_eq(&p.help());
}

#[test]
fn display_matches_help() {
    let mut p = SubcommandParser::new();
    p.set_banner("blah");
    p.subcommand("subc", "subc description");
    assert_eq!(p.to_string(), p.help());
}
