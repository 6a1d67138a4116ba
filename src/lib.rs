//! Moderately simple subcommand-aware command line arguments parser.
//!
//! `subopts` layers three things on top of a plain single-flag engine:
//! subcommand dispatch (one level, with aliases), implicit config binding
//! (a flag registered with a key instead of a callback writes its matched
//! value straight into a [`ConfigStore`]), and positional destructuring
//! driven by a small annotation grammar (`src`, `[dst]`, `*items`,
//! `[*items]`).
//!
//! Everything is raw strings: there is no value coercion, no completion
//! generation, and no nesting of subcommands below one level.
//!
//! ```
//! # fn main() -> subopts::Result<()> {
//! let mut p = subopts::SubcommandParser::new();
//! p.on("-v, --verbose", "verbose output", "verbose")?;
//! p.subcommand_with("copy,cp src *dst", "copy src to one or more dsts", |cmd| {
//!     cmd.on("-f, --force", "overwrite existing files", "force")
//! });
//!
//! let args = ["cp", "-f", "a.txt", "b.txt", "c.txt"].map(String::from);
//! let res = p.parse(&args)?;
//! assert_eq!(res.command.as_deref(), Some("copy"));
//!
//! let copy = res.config.get_table("copy").unwrap();
//! assert_eq!(copy.get_str("force"), Some("true"));
//! assert_eq!(copy.get_str("src"), Some("a.txt"));
//! assert_eq!(copy.get_list("dst"), Some(&["b.txt".to_string(), "c.txt".to_string()][..]));
//! # Ok(())
//! # }
//! ```

use std::fmt;

mod cmd;
mod config;
mod pos;

pub mod rt;

pub use crate::{
    cmd::{FlagBinder, SubcommandParser},
    config::{ConfigStore, Value},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
}

/// What went wrong, separated from the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The first positional token did not resolve to a registered
    /// subcommand; carries the token after alias resolution.
    InvalidSubcommand(String),
    /// A required positional parameter had no token to bind; carries the
    /// parameter name.
    MissingPositional(String),
    /// Anything the flag engine itself raises: unknown flag, missing value,
    /// malformed descriptor.
    Flag,
}

impl Error {
    pub(crate) fn flag(msg: String) -> Error {
        Error { kind: ErrorKind::Flag, msg }
    }

    pub(crate) fn invalid_subcommand(token: &str) -> Error {
        Error {
            kind: ErrorKind::InvalidSubcommand(token.to_string()),
            msg: format!("invalid subcommand: `{token}`"),
        }
    }

    pub(crate) fn missing_positional(cmd: &str, name: &str, rest: bool) -> Error {
        let msg = if rest {
            format!("subcommand `{cmd}` requires at least one `{name}` parameter")
        } else {
            format!("subcommand `{cmd}` requires a `{name}` parameter")
        };
        Error { kind: ErrorKind::MissingPositional(name.to_string()), msg }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Prints the error and terminates the process.
    pub fn exit(self) -> ! {
        eprintln!("{self}");
        std::process::exit(2)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.msg, f)
    }
}

impl std::error::Error for Error {}

/// The sole output of a parse: which subcommand ran (if any), the tokens no
/// positional annotation claimed, and everything the flag callbacks and
/// positional bindings wrote.
#[derive(Debug)]
pub struct ParseResult {
    pub command: Option<String>,
    pub positionals: Vec<String>,
    pub config: ConfigStore,
}
