use std::ffi::OsString;
use clap::Parser;

pub const USAGE: &str = "Tool for running 'bingo' managed tools.

Usage:

    bingorun <tool-name> [args...]

It runs the specified tool, and (re)installs the tool if missing.

Example:

    bingorun go-enum --marshal --nocase -f=<file.go>


It could be used in go generate directives, for example:

    //go:generate bingorun go-enum --marshal --nocase -f=$GOFILE

Instead of the tool name, you can use the following commands:

    -b, --bin       print the path of the tool binary
    -v, --version   print the version
    -h, --help      print this help message
";

/// Flags accepted in place of a tool name. Only the first argument is ever
/// parsed as a flag; everything after the tool name belongs to the tool.
#[derive(Debug, Parser, Clone)]
#[command(name = "bingorun", disable_help_flag = true, disable_version_flag = true)]
pub struct CLI {
    /// Print the path of the tool binary
    #[arg(short = 'b', long = "bin")]
    pub bin: bool,
    /// Print the version
    #[arg(short = 'v', short_alias = 'V', long = "version")]
    pub version: bool,
    /// Print this help message
    #[arg(short = 'h', short_alias = 'H', long = "help")]
    pub help: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    PrintBinPath { tool: String },
    Run { tool: String, args: Vec<OsString> },
}

impl Invocation {
    /// Classifies the process arguments (including the program name).
    ///
    /// The first argument is either one of the `CLI` flags or the tool name.
    /// Unknown flags, `--`, combined short flags and a missing tool name all
    /// show the usage text.
    pub fn parse<I, T>(args: I) -> Invocation
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into).skip(1);
        let Some(first) = args.next() else {
            return Invocation::Help;
        };
        let first = first.to_string_lossy().into_owned();
        if !first.starts_with('-') {
            return Invocation::Run { tool: first, args: args.collect() };
        }
        match parse_flag(&first) {
            Some(CLI { help: true, .. }) | None => Invocation::Help,
            Some(CLI { version: true, .. }) => Invocation::Version,
            Some(CLI { bin: true, .. }) => match args.next() {
                Some(tool) => Invocation::PrintBinPath { tool: tool.to_string_lossy().into_owned() },
                None => Invocation::Help,
            },
            Some(_) => Invocation::Help,
        }
    }
}

/// Parses a single flag token. Combined short flags (`-bv`) and `--` are not
/// flags here.
fn parse_flag(token: &str) -> Option<CLI> {
    let is_short = token.len() == 2 && !token.starts_with("--");
    let is_long = token.len() > 2 && token.starts_with("--") && !token.contains('=');
    if !is_short && !is_long {
        return None;
    }
    CLI::try_parse_from(["bingorun", token]).ok()
}
