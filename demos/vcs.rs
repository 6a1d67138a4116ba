//! A miniature version-control front end, registering a shared flag, a few
//! subcommands with positional annotations, and an alias.
//!
//! Try `cargo run --example vcs -- clone -v --depth=1 some-url some-dir`.

use subopts::SubcommandParser;

fn main() {
    let mut p = SubcommandParser::new();
    p.set_banner("usage: vcs [options] <command>");
    p.for_all(|cmd| cmd.on("-v, --verbose", "print what is going on", "verbose"));
    p.subcommand_with("clone,cl url [dir]", "clone a repository", |cmd| {
        cmd.on("--depth N", "create a shallow clone", "depth")
    });
    p.subcommand("add *paths", "track files");
    p.subcommand("status", "show the working tree status");

    match p.parse_env() {
        Ok(res) => match &res.command {
            Some(cmd) => {
                println!("{cmd}: {:?}", res.config.get_table(cmd).unwrap());
                if !res.positionals.is_empty() {
                    println!("unbound: {:?}", res.positionals);
                }
            }
            None => print!("{p}"),
        },
        Err(err) => err.exit(),
    }
}
