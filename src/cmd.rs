//! Subcommand registration, alias resolution, dispatch, and help rendering.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use crate::{
    pos::{self, Positional},
    rt::FlagSet,
    ConfigStore, Error, ParseResult, Result,
};

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

type Hook = Box<dyn Fn(&mut FlagBinder<'_>) -> Result<()>>;

/// The registration surface handed to configuration hooks: a thin wrapper
/// over a [`FlagSet`] that can bind a flag either to an explicit action or
/// straight to a [`ConfigStore`] key.
pub struct FlagBinder<'a> {
    flags: &'a mut FlagSet,
}

impl FlagBinder<'_> {
    /// Registers a flag whose matched value is stored at `key` in the store
    /// the surrounding parse is writing to. Switches store `"true"`.
    pub fn on(&mut self, spec: &str, doc: &str, key: &str) -> Result<()> {
        let key = key.to_string();
        self.flags.define(spec, doc, Box::new(move |config, value| config.set(&key, value)))
    }

    /// Registers a flag with an explicit action. The action receives the
    /// store the surrounding parse is writing to, plus the matched value.
    pub fn on_with(
        &mut self,
        spec: &str,
        doc: &str,
        action: impl FnMut(&mut ConfigStore, &str) + 'static,
    ) -> Result<()> {
        self.flags.define(spec, doc, Box::new(action))
    }

    pub fn set_banner(&mut self, banner: &str) {
        self.flags.set_banner(banner)
    }
}

struct SubcommandSpec {
    name: String,
    banner: String,
    positionals: Vec<Positional>,
    configure: Option<Hook>,
}

impl SubcommandSpec {
    /// The display prefix in help output: canonical name plus the raw
    /// positional annotations, brackets and stars included.
    fn prefix(&self) -> String {
        let mut res = self.name.clone();
        for pos in &self.positionals {
            res.push(' ');
            res.push_str(&pos.raw);
        }
        res
    }
}

/// A flag parser with one level of subcommands.
///
/// Global flags are registered with [`on`](SubcommandParser::on) /
/// [`on_with`](SubcommandParser::on_with), subcommands with
/// [`subcommand`](SubcommandParser::subcommand) /
/// [`subcommand_with`](SubcommandParser::subcommand_with), and flags shared
/// by every scope with [`for_all`](SubcommandParser::for_all). A parse runs
/// global flags first, resolves the next token to a subcommand (through the
/// alias table), runs that subcommand's flags over the rest, and finally
/// destructures the leftover tokens per the subcommand's positional
/// annotations.
pub struct SubcommandParser {
    flags: FlagSet,
    for_all: Vec<Hook>,
    subcommands: Vec<SubcommandSpec>,
    aliases: BTreeMap<String, String>,
}

impl SubcommandParser {
    pub fn new() -> SubcommandParser {
        SubcommandParser {
            flags: FlagSet::new(),
            for_all: Vec::new(),
            subcommands: Vec::new(),
            aliases: BTreeMap::new(),
        }
    }

    pub fn set_banner(&mut self, banner: &str) {
        self.flags.set_banner(banner)
    }

    /// Registers a global flag bound to `key` in the root store.
    pub fn on(&mut self, spec: &str, doc: &str, key: &str) -> Result<()> {
        FlagBinder { flags: &mut self.flags }.on(spec, doc, key)
    }

    /// Registers a global flag with an explicit action.
    pub fn on_with(
        &mut self,
        spec: &str,
        doc: &str,
        action: impl FnMut(&mut ConfigStore, &str) + 'static,
    ) -> Result<()> {
        FlagBinder { flags: &mut self.flags }.on_with(spec, doc, action)
    }

    /// Registers a subcommand. `name_spec` is the canonical name, optionally
    /// followed by comma-separated aliases and space-separated positional
    /// annotations: `"copy,cp src *dst"`.
    ///
    /// Registering a name twice silently replaces the earlier spec.
    pub fn subcommand(&mut self, name_spec: &str, banner: &str) {
        self.insert(name_spec, banner, None)
    }

    /// Like [`subcommand`](SubcommandParser::subcommand), with a hook that
    /// registers the subcommand's own flags. The hook runs on every parse
    /// that dispatches to this subcommand, after the
    /// [`for_all`](SubcommandParser::for_all) hooks.
    pub fn subcommand_with(
        &mut self,
        name_spec: &str,
        banner: &str,
        configure: impl Fn(&mut FlagBinder<'_>) -> Result<()> + 'static,
    ) {
        self.insert(name_spec, banner, Some(Box::new(configure)))
    }

    fn insert(&mut self, name_spec: &str, banner: &str, configure: Option<Hook>) {
        let mut words = name_spec.split_whitespace();
        let names = words.next().unwrap_or("");
        let positionals = words.map(Positional::parse).collect();
        let mut names = names.split(',');
        let name = names.next().unwrap_or("").to_string();
        let spec = SubcommandSpec {
            name: name.clone(),
            banner: banner.to_string(),
            positionals,
            configure,
        };
        match self.subcommands.iter_mut().find(|it| it.name == name) {
            Some(slot) => *slot = spec,
            None => self.subcommands.push(spec),
        }
        for alias in names {
            self.aliases.insert(alias.to_string(), name.clone());
        }
    }

    /// Registers a hook applied to the global binder and to every
    /// subcommand's binder, in registration order, on each parse.
    pub fn for_all(&mut self, configure: impl Fn(&mut FlagBinder<'_>) -> Result<()> + 'static) {
        self.for_all.push(Box::new(configure));
    }

    /// The canonical name for a subcommand name or alias, if registered.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        let name = self.aliases.get(token).map(String::as_str).unwrap_or(token);
        self.subcommands.iter().find(|it| it.name == name).map(|it| it.name.as_str())
    }

    /// Parses `args`, consuming matched tokens in place; what remains
    /// afterwards is the unbound positional remainder. Flag actions run
    /// eagerly, so an error partway through does not undo earlier writes.
    pub fn parse_in_place(&mut self, args: &mut Vec<String>) -> Result<ParseResult> {
        let mut config = ConfigStore::new();

        let mut binder = FlagBinder { flags: &mut self.flags };
        for hook in &self.for_all {
            hook(&mut binder)?;
        }
        self.flags.order(args, &mut config)?;

        if args.is_empty() {
            return Ok(ParseResult { command: None, positionals: Vec::new(), config });
        }

        let token = args[0].clone();
        let name = self.aliases.get(&token).cloned().unwrap_or(token);
        let spec = match self.subcommands.iter().find(|it| it.name == name) {
            Some(it) => it,
            None => return Err(Error::invalid_subcommand(&name)),
        };
        args.remove(0);

        let mut sub_flags = FlagSet::new();
        sub_flags.set_banner(&spec.banner);
        let mut binder = FlagBinder { flags: &mut sub_flags };
        for hook in &self.for_all {
            hook(&mut binder)?;
        }
        if let Some(configure) = &spec.configure {
            configure(&mut binder)?;
        }

        let mut sub_config = ConfigStore::new();
        sub_flags.order(args, &mut sub_config)?;
        pos::bind(&name, &spec.positionals, args, &mut sub_config)?;
        config.set(&name, sub_config);

        Ok(ParseResult { command: Some(name), positionals: args.clone(), config })
    }

    /// Non-consuming variant of
    /// [`parse_in_place`](SubcommandParser::parse_in_place): works on a copy
    /// of the token list.
    pub fn parse(&mut self, args: &[String]) -> Result<ParseResult> {
        let mut args = args.to_vec();
        self.parse_in_place(&mut args)
    }

    /// Parses the process arguments, skipping the program name.
    pub fn parse_env(&mut self) -> Result<ParseResult> {
        let mut args = std::env::args().skip(1).collect::<Vec<_>>();
        self.parse_in_place(&mut args)
    }

    /// Renders usage: the banner, the global flags registered so far, and a
    /// `commands:` listing with each subcommand's display prefix padded to
    /// the longest prefix plus two, then a two-space gutter, then its
    /// banner.
    pub fn help(&self) -> String {
        let mut buf = self.flags.usage();
        w!(buf, "\ncommands:\n");
        let prefixes = self.subcommands.iter().map(SubcommandSpec::prefix).collect::<Vec<_>>();
        let width = prefixes.iter().map(String::len).max().unwrap_or(0) + 2;
        for (spec, prefix) in self.subcommands.iter().zip(&prefixes) {
            w!(buf, "    {prefix:<width$}  {}\n", spec.banner);
        }
        buf
    }
}

impl Default for SubcommandParser {
    fn default() -> SubcommandParser {
        SubcommandParser::new()
    }
}

impl fmt::Display for SubcommandParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.help())
    }
}
