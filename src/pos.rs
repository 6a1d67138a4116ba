//! Positional-parameter annotations and their binding against the tokens
//! left over after flag parsing.

use std::mem;

use crate::{ConfigStore, Error, Result};

/// One positional parameter, parsed from its raw annotation at registration
/// time. The grammar is tiny: wrapping `[...]` marks the parameter optional,
/// a leading `*` marks it rest-capturing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Positional {
    /// The annotation as written, kept verbatim for help output.
    pub(crate) raw: String,
    pub(crate) name: String,
    pub(crate) arity: Arity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Required,
    Optional,
    RequiredRest,
    OptionalRest,
}

impl Positional {
    pub(crate) fn parse(raw: &str) -> Positional {
        let mut spec = raw;
        let optional = spec.len() > 2 && spec.starts_with('[') && spec.ends_with(']');
        if optional {
            spec = &spec[1..spec.len() - 1];
        }
        let rest = spec.starts_with('*');
        if rest {
            spec = &spec[1..];
        }
        let arity = match (optional, rest) {
            (false, false) => Arity::Required,
            (true, false) => Arity::Optional,
            (false, true) => Arity::RequiredRest,
            (true, true) => Arity::OptionalRest,
        };
        Positional { raw: raw.to_string(), name: spec.to_string(), arity }
    }
}

/// Binds annotations left to right against `args`, writing into `config` and
/// leaving whatever no annotation claimed in `args`.
///
/// Consumption is greedy: a rest-capturing annotation takes everything that
/// remains, so any annotation after it finds nothing. That starvation is not
/// guarded against here; declaring a rest parameter anywhere but last is on
/// the caller.
pub(crate) fn bind(
    cmd: &str,
    positionals: &[Positional],
    args: &mut Vec<String>,
    config: &mut ConfigStore,
) -> Result<()> {
    for pos in positionals {
        match pos.arity {
            Arity::RequiredRest | Arity::OptionalRest => {
                if args.is_empty() {
                    if pos.arity == Arity::OptionalRest {
                        config.set(&pos.name, Vec::<String>::new());
                        continue;
                    }
                    return Err(Error::missing_positional(cmd, &pos.name, true));
                }
                config.set(&pos.name, mem::take(args));
            }
            Arity::Required | Arity::Optional => {
                if args.is_empty() {
                    if pos.arity == Arity::Optional {
                        continue;
                    }
                    return Err(Error::missing_positional(cmd, &pos.name, false));
                }
                config.set(&pos.name, args.remove(0));
            }
        }
    }
    Ok(())
}
