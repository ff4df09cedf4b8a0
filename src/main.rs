use std::ffi::{OsStr, OsString};
use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use log::{LevelFilter, debug};

const DEFAULT_TARGET: &str = "World!";

/// Usage: hello [NAME]
#[derive(Parser, Debug)]
#[command(name = "hello", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Only the first one is greeted; the rest are ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

impl Cli {
    /// Parses `argv` with every argument after the program name taken
    /// verbatim. A leading `--` escape is inserted so that a user's own
    /// `--` stays a value.
    fn parse_verbatim<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_else(|| OsString::from("hello"));
        Cli::parse_from([program, OsString::from("--")].into_iter().chain(argv))
    }
}

/// The name to greet, always ending in `!`.
fn greeting_target(args: &[OsString]) -> OsString {
    match args.first() {
        Some(name) => {
            let mut target = name.clone();
            target.push("!");
            target
        }
        None => OsString::from(DEFAULT_TARGET),
    }
}

fn greeting(args: &[OsString]) -> OsString {
    let mut line = OsString::from("Hello ");
    line.push(greeting_target(args));
    line
}

#[cfg(unix)]
fn write_os_line(out: &mut impl Write, line: &OsStr) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;

    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")
}

#[cfg(not(unix))]
fn write_os_line(out: &mut impl Write, line: &OsStr) -> io::Result<()> {
    writeln!(out, "{}", line.to_string_lossy())
}

fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let line = greeting(&cli.args);
    debug!(
        "greeting {:?}, ignoring {} extra argument(s)",
        line,
        cli.args.len().saturating_sub(1)
    );

    write_os_line(out, &line).context("failed to write greeting")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse_verbatim(std::env::args_os());
    run(&cli, &mut io::stdout().lock())
}
