//! Command-line configuration
//!
//! Arguments are parsed by hand into [`Options`]; there is no config file and
//! no environment lookup. Debug switches mirror the interpreter stages: dumps
//! print an intermediate form once, trace modules turn on `tracing` events for
//! one stage each.

use crate::interpreter::constants::DEFAULT_SNAPSHOT_LIMIT;
use std::path::PathBuf;
use thiserror::Error;

/// Intermediate forms to print to stderr before running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpFlags {
    pub text: bool,
    pub tokens: bool,
    pub ast: bool,
}

/// Stages whose `tracing` events are enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceModules {
    pub token: bool,
    pub lexer: bool,
    pub parser: bool,
    pub ast: bool,
    pub interpreter: bool,
}

impl TraceModules {
    pub fn all() -> Self {
        TraceModules {
            token: true,
            lexer: true,
            parser: true,
            ast: true,
            interpreter: true,
        }
    }

    pub fn any(&self) -> bool {
        self.token || self.lexer || self.parser || self.ast || self.interpreter
    }

    /// Enable the module called `name`
    fn enable(&mut self, name: &str) -> Result<(), OptionsError> {
        match name {
            "token" => self.token = true,
            "lexer" => self.lexer = true,
            "parser" => self.parser = true,
            "ast" => self.ast = true,
            "interpreter" => self.interpreter = true,
            "all" => *self = TraceModules::all(),
            other => return Err(OptionsError::UnknownTraceModule(other.to_string())),
        }
        Ok(())
    }

    /// `tracing` targets for the enabled modules
    pub fn targets(&self) -> Vec<&'static str> {
        [
            (self.token, "spi::token"),
            (self.lexer, "spi::lexer"),
            (self.parser, "spi::parser"),
            (self.ast, "spi::ast"),
            (self.interpreter, "spi::interpreter"),
        ]
        .into_iter()
        .filter_map(|(enabled, target)| enabled.then_some(target))
        .collect()
    }
}

/// Everything the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub path: PathBuf,
    pub tui: bool,
    pub dump: DumpFlags,
    pub trace: TraceModules,
    pub snapshot_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("no input file provided")]
    MissingFile,
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
    #[error("option '{0}' needs a value")]
    MissingValue(&'static str),
    #[error("unknown trace module '{0}' (expected token, lexer, parser, ast, interpreter or all)")]
    UnknownTraceModule(String),
    #[error("invalid value '{value}' for '{flag}'")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("unexpected extra argument '{0}'")]
    UnexpectedArgument(String),
    #[error("help requested")]
    HelpRequested,
}

impl Options {
    /// Parse arguments, not including the program name
    pub fn parse<I>(args: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut tui = false;
        let mut dump = DumpFlags::default();
        let mut trace = TraceModules::default();
        let mut snapshot_limit = DEFAULT_SNAPSHOT_LIMIT;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Err(OptionsError::HelpRequested),
                "--tui" => tui = true,
                "--dump-text" => dump.text = true,
                "--dump-tokens" => dump.tokens = true,
                "--dump-ast" => dump.ast = true,
                "--trace" => {
                    let modules = args.next().ok_or(OptionsError::MissingValue("--trace"))?;
                    for name in modules.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        trace.enable(name)?;
                    }
                }
                "--snapshot-limit" => {
                    let value = args
                        .next()
                        .ok_or(OptionsError::MissingValue("--snapshot-limit"))?;
                    snapshot_limit = value.parse().map_err(|_| OptionsError::InvalidNumber {
                        flag: "--snapshot-limit",
                        value: value.clone(),
                    })?;
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(OptionsError::UnknownFlag(flag.to_string()));
                }
                _ => {
                    if path.is_some() {
                        return Err(OptionsError::UnexpectedArgument(arg));
                    }
                    path = Some(PathBuf::from(arg));
                }
            }
        }

        Ok(Options {
            path: path.ok_or(OptionsError::MissingFile)?,
            tui,
            dump,
            trace,
            snapshot_limit,
        })
    }
}

/// Usage text shown for `--help` and argument errors
pub fn usage(program_name: &str) -> String {
    format!(
        "Usage: {program_name} [OPTIONS] <file.pas>

Options:
  --tui                 step through the recorded run in a terminal UI
  --dump-text           print the source text to stderr before lexing
  --dump-tokens         print the token stream to stderr before parsing
  --dump-ast            print the syntax tree to stderr before evaluating
  --trace <modules>     comma-separated: token, lexer, parser, ast, interpreter, all
  --snapshot-limit <N>  byte budget for the recorded history (default {DEFAULT_SNAPSHOT_LIMIT})
  -h, --help            show this message"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, OptionsError> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let options = parse(&["prog.pas"]).unwrap();
        assert_eq!(options.path, PathBuf::from("prog.pas"));
        assert!(!options.tui);
        assert_eq!(options.dump, DumpFlags::default());
        assert!(!options.trace.any());
        assert_eq!(options.snapshot_limit, DEFAULT_SNAPSHOT_LIMIT);
    }

    #[test]
    fn test_flags() {
        let options = parse(&[
            "--dump-ast",
            "--trace",
            "lexer, interpreter",
            "prog.pas",
            "--tui",
            "--snapshot-limit",
            "4096",
        ])
        .unwrap();
        assert!(options.tui);
        assert!(options.dump.ast && !options.dump.tokens);
        assert_eq!(options.trace.targets(), vec!["spi::lexer", "spi::interpreter"]);
        assert_eq!(options.snapshot_limit, 4096);
    }

    #[test]
    fn test_trace_all() {
        let options = parse(&["--trace", "all", "p.pas"]).unwrap();
        assert_eq!(options.trace, TraceModules::all());
        assert_eq!(options.trace.targets().len(), 5);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(&[]), Err(OptionsError::MissingFile));
        assert_eq!(
            parse(&["--fast", "p.pas"]),
            Err(OptionsError::UnknownFlag("--fast".to_string()))
        );
        assert_eq!(
            parse(&["p.pas", "--trace", "codegen"]),
            Err(OptionsError::UnknownTraceModule("codegen".to_string()))
        );
        assert_eq!(
            parse(&["p.pas", "--trace"]),
            Err(OptionsError::MissingValue("--trace"))
        );
        assert!(matches!(
            parse(&["p.pas", "--snapshot-limit", "lots"]),
            Err(OptionsError::InvalidNumber { .. })
        ));
        assert_eq!(
            parse(&["a.pas", "b.pas"]),
            Err(OptionsError::UnexpectedArgument("b.pas".to_string()))
        );
        assert_eq!(parse(&["-h"]), Err(OptionsError::HelpRequested));
    }
}
