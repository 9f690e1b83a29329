//! Command-line parsing.
//!
//! Flags follow Go's `flag` package conventions: one or two leading dashes,
//! values given as `-flag=value` or `-flag value`, booleans as `-flag` or
//! `-flag=false`. `--` ends flag parsing. List flags repeat and also split
//! on commas.

use realign_diagnostic::emitter::ColorMode;

use crate::config::{Config, ConfigError, OutputFormat};

/// What the command line asks for.
#[derive(Debug)]
pub enum Command {
    Run { config: Config, paths: Vec<String> },
    Version,
    Help,
}

/// Parse the arguments following the program name.
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    // A version request wins over anything else on the line.
    if args
        .iter()
        .take_while(|a| *a != "--")
        .any(|a| a == "-V" || a == "--version" || a == "-version")
    {
        return Ok(Command::Version);
    }

    let mut config = Config::default();
    let mut paths = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            paths.extend(iter.by_ref());
            break;
        }
        let Some(flag) = flag_body(&arg) else {
            paths.push(arg);
            continue;
        };
        let (name, inline) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (flag, None),
        };

        match name {
            "h" | "help" => return Ok(Command::Help),
            "apply" | "fix" => config.apply = parse_bool(name, inline.as_deref())?,
            "opt_in" => config.opt_in = parse_bool(name, inline.as_deref())?,
            "test_files" => config.test_files = parse_bool(name, inline.as_deref())?,
            "generated_files" => config.generated_files = parse_bool(name, inline.as_deref())?,
            "exclude_files" => {
                let value = take_value(name, inline, &mut iter)?;
                for pattern in split_list(&value) {
                    config.add_exclude_file(pattern)?;
                }
            }
            "exclude_dirs" => {
                let value = take_value(name, inline, &mut iter)?;
                config.exclude_dirs.extend(split_list(&value).map(Into::into));
            }
            "target" => {
                let value = take_value(name, inline, &mut iter)?;
                config.set_target(&value)?;
            }
            "format" => {
                let value = take_value(name, inline, &mut iter)?;
                config.format = OutputFormat::from_name(&value).ok_or_else(|| invalid(name, &value))?;
            }
            "color" => {
                let value = take_value(name, inline, &mut iter)?;
                config.color = ColorMode::from_name(&value).ok_or_else(|| invalid(name, &value))?;
            }
            _ => return Err(ConfigError::UnknownFlag(name.to_string())),
        }
    }

    if paths.is_empty() {
        paths.push(".".to_string());
    }
    Ok(Command::Run { config, paths })
}

/// `Some(name[=value])` when `arg` is a flag.
fn flag_body(arg: &str) -> Option<&str> {
    let body = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    (!body.is_empty() && !body.starts_with('-')).then_some(body)
}

fn parse_bool(name: &str, value: Option<&str>) -> Result<bool, ConfigError> {
    match value {
        None | Some("true" | "1" | "t" | "T" | "TRUE" | "True") => Ok(true),
        Some("false" | "0" | "f" | "F" | "FALSE" | "False") => Ok(false),
        Some(other) => Err(invalid(name, other)),
    }
}

fn take_value(
    name: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, ConfigError> {
    match inline {
        Some(value) => Ok(value),
        None => rest
            .next()
            .ok_or_else(|| ConfigError::MissingValue(name.to_string())),
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn invalid(flag: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

/// Usage text for `-help`.
pub fn usage() -> &'static str {
    "realign: find structs whose fields could be ordered to use less memory

Usage: realign [flags] [packages]

Packages are directories; `dir/...` also walks every subdirectory.
Defaults to the current directory.

Flags:
  -apply, -fix             rewrite files with the suggested field order
  -opt_in                  only check structs marked with `realign:check`
  -test_files              also analyze _test.go files
  -generated_files         also analyze generated files
  -exclude_files <globs>   skip files matching these patterns (comma separated, repeatable)
  -exclude_dirs <dirs>     skip files under these directories (comma separated, repeatable)
  -target <arch>           GOARCH whose layout rules apply (default: amd64)
  -format <text|json>      diagnostic output format (default: text)
  -color <auto|always|never>
  -V, --version            print version information and exit
  -h, -help                show this help

Environment:
  RUST_LOG                 enable tracing output (e.g. RUST_LOG=realignc=debug)"
}
