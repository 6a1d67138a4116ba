//! The single-flag engine: register a flag with an action, run an ordered
//! parse over a token list, and get the unconsumed positionals back.
//!
//! The subcommand layer sits entirely on top of this module; nothing here
//! knows about subcommands, aliases, or positional annotations.

use std::fmt::Write;
use std::mem;

use crate::{ConfigStore, Error, Result};

macro_rules! format_err {
    ($($tt:tt)*) => {
        Error::flag(format!($($tt)*))
    };
}

macro_rules! bail {
    ($($tt:tt)*) => {
        return Err(format_err!($($tt)*))
    };
}

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

/// What runs when a flag matches. The store being written is passed in
/// explicitly; actions capture nothing about where their value ends up.
/// Switches are invoked with the literal value `"true"`.
pub type Action = Box<dyn FnMut(&mut ConfigStore, &str)>;

/// An ordered set of flag definitions with a usage banner.
pub struct FlagSet {
    banner: String,
    defs: Vec<FlagDef>,
}

struct FlagDef {
    shorts: Vec<String>,
    longs: Vec<String>,
    value: Option<String>,
    doc: String,
    action: Action,
}

impl FlagSet {
    pub fn new() -> FlagSet {
        FlagSet { banner: "usage: [options]".to_string(), defs: Vec::new() }
    }

    pub fn set_banner(&mut self, banner: &str) {
        self.banner = banner.to_string();
    }

    /// Registers a flag. The descriptor is a comma-separated list of forms,
    /// each `-s` or `--long`, optionally followed by a value placeholder:
    /// `"-o VAL"`, `"-f, --file FILE"`, `"--verbose"`. A placeholder on any
    /// form makes the flag take one mandatory value.
    ///
    /// A flag registered later shadows an earlier one with the same name.
    pub fn define(&mut self, spec: &str, doc: &str, action: Action) -> Result<()> {
        let mut def =
            FlagDef { shorts: Vec::new(), longs: Vec::new(), value: None, doc: doc.to_string(), action };
        for form in spec.split(',') {
            let mut words = form.split_whitespace();
            let name = words.next().unwrap_or("");
            if let Some(long) = name.strip_prefix("--") {
                if long.is_empty() {
                    bail!("malformed flag descriptor: `{spec}`");
                }
                def.longs.push(long.to_string());
            } else if let Some(short) = name.strip_prefix('-') {
                if short.chars().count() != 1 {
                    bail!("malformed flag descriptor: `{spec}`");
                }
                def.shorts.push(short.to_string());
            } else {
                bail!("malformed flag descriptor: `{spec}`");
            }
            if let Some(value) = words.next() {
                def.value = Some(value.to_string());
            }
        }
        self.defs.push(def);
        Ok(())
    }

    /// Ordered ("POSIX-ly correct") parse: consumes flag tokens from the
    /// front of `args`, invoking the matching actions against `config`, and
    /// stops at the first token that is not a flag. `--` stops flag parsing
    /// and is itself consumed. `args` is left holding the positional
    /// remainder.
    pub fn order(&mut self, args: &mut Vec<String>, config: &mut ConfigStore) -> Result<()> {
        let mut p = Parser::new(mem::take(args));
        let res = self.order_(&mut p, config);
        *args = p.into_remainder();
        res
    }

    fn order_(&mut self, p: &mut Parser, config: &mut ConfigStore) -> Result<()> {
        while let Some(token) = p.pop_if_flag() {
            if token == "--" {
                break;
            }
            let (idx, inline, name) = match self.find(&token) {
                Some(it) => it,
                None => bail!("unexpected flag: `{token}`"),
            };
            let def = &mut self.defs[idx];
            let value = match (&def.value, inline) {
                (Some(_), Some(inline)) => inline,
                (Some(_), None) => p.next_value(&name)?,
                (None, Some(_)) => bail!("unexpected value for `{name}`"),
                (None, None) => "true".to_string(),
            };
            (def.action)(config, &value);
        }
        Ok(())
    }

    /// Looks a flag token up, splitting off an attached value (`--opt=val`,
    /// `-oval`). The last matching definition wins.
    fn find(&self, token: &str) -> Option<(usize, Option<String>, String)> {
        if let Some(rest) = token.strip_prefix("--") {
            let (name, inline) = match rest.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (rest, None),
            };
            let idx = self.defs.iter().rposition(|def| def.longs.iter().any(|it| it == name))?;
            Some((idx, inline, format!("--{name}")))
        } else {
            let rest = token.strip_prefix('-')?;
            let mut chars = rest.chars();
            let name = chars.next()?.to_string();
            let tail = chars.as_str();
            let inline = if tail.is_empty() { None } else { Some(tail.to_string()) };
            let idx = self.defs.iter().rposition(|def| def.shorts.iter().any(|it| *it == name))?;
            Some((idx, inline, format!("-{name}")))
        }
    }

    /// The banner plus one column-aligned line per registered flag.
    pub fn usage(&self) -> String {
        let mut buf = String::new();
        w!(buf, "{}\n", self.banner);
        let displays = self.defs.iter().map(FlagDef::display).collect::<Vec<_>>();
        let width = displays.iter().map(String::len).max().unwrap_or(0) + 2;
        for (def, display) in self.defs.iter().zip(&displays) {
            w!(buf, "    {display:<width$}  {}\n", def.doc);
        }
        buf
    }
}

impl Default for FlagSet {
    fn default() -> FlagSet {
        FlagSet::new()
    }
}

impl FlagDef {
    fn display(&self) -> String {
        let mut forms = Vec::new();
        for short in &self.shorts {
            forms.push(format!("-{short}"));
        }
        for long in &self.longs {
            forms.push(format!("--{long}"));
        }
        let mut res = forms.join(", ");
        if let Some(value) = &self.value {
            w!(res, " {value}");
        }
        res
    }
}

/// A cursor over the token list, consumed back to front.
pub struct Parser {
    rargs: Vec<String>,
}

impl Parser {
    pub fn new(mut args: Vec<String>) -> Parser {
        args.reverse();
        Parser { rargs: args }
    }

    fn peek_flag(&self) -> Option<&str> {
        self.rargs.last().map(String::as_str).filter(|it| it.len() > 1 && it.starts_with('-'))
    }

    /// Pops the next token only if it looks like a flag. A lone `-` is a
    /// positional.
    pub fn pop_if_flag(&mut self) -> Option<String> {
        self.peek_flag()?;
        self.rargs.pop()
    }

    pub fn next(&mut self) -> Option<String> {
        self.rargs.pop()
    }

    pub fn next_value(&mut self, flag: &str) -> Result<String> {
        if self.peek_flag().is_some() {
            bail!("expected a value for `{flag}`");
        }
        self.next().ok_or_else(|| format_err!("expected a value for `{flag}`"))
    }

    /// The tokens not yet consumed, in their original order.
    pub fn into_remainder(mut self) -> Vec<String> {
        self.rargs.reverse();
        self.rargs
    }
}
