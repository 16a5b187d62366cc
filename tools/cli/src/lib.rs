//! Command-line surface of `nav2json`.
//!
//! Options use single-dash long names (`-json`, `-map-url`). They are
//! rewritten to clap's `--` form before parsing, lowercased on the way.

use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use navjson_core::{
    ConversionRequest, DirectionChoice, MetadataOverrides, OutputTarget, OverwritePolicy,
};

pub const HELP: &str = "\
nav2json [parameters] [input file]
Available parameters:
-json\tConvert from nav to a json file.
-nav\tConvert from json to a nav file.
NOTE: If neither of the above are specified, automatic detection will be applied based on input file extension.

-upgrade\tKeep map details of the existing json, replacing only the navigation data.
-s\tSilent.
-ow\tOverwrite without asking.
-out [file]\tOutput path + filename.
-outstdout\tOutput to STDOUT instead of a file.

-map-filename [filename]\tSpecifies the map filename for the json.
-map-author [author]\tSpecifies the map author for the json.
-map-name [name]\tSpecifies the map name for the json.
-map-url [url]\tAdds a map url for the json. Can add multiple.
-json-comment [comment]\tSpecifies a comment for the json.
-json-contributor [contributor]\tAdds a contributor to the json. Can add multiple.
";

const VALUE_OPTIONS: &[&str] = &[
    "out",
    "map-filename",
    "map-author",
    "map-name",
    "map-url",
    "json-comment",
    "json-contributor",
];

#[derive(Debug, Parser)]
#[command(
    name = "nav2json",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Cli {
    #[arg(long = "json", conflicts_with = "nav")]
    json: bool,
    #[arg(long = "nav")]
    nav: bool,
    #[arg(long = "upgrade")]
    upgrade: bool,
    #[arg(short = 's')]
    silent: bool,
    #[arg(long = "ow")]
    overwrite: bool,
    #[arg(long = "out", allow_hyphen_values = true)]
    out: Option<PathBuf>,
    #[arg(long = "outstdout")]
    out_stdout: bool,
    #[arg(long = "map-filename", allow_hyphen_values = true)]
    map_filename: Option<String>,
    #[arg(long = "map-author", allow_hyphen_values = true)]
    map_author: Option<String>,
    #[arg(long = "map-name", allow_hyphen_values = true)]
    map_name: Option<String>,
    #[arg(long = "map-url", allow_hyphen_values = true)]
    map_url: Vec<String>,
    #[arg(long = "json-comment", allow_hyphen_values = true)]
    json_comment: Option<String>,
    #[arg(long = "json-contributor", allow_hyphen_values = true)]
    json_contributor: Vec<String>,
    #[arg(short = 'h', long = "help")]
    help: bool,
    input: Option<PathBuf>,
}

/// What the process should do for a given command line.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Convert(ConversionRequest),
    /// Parsing failed; the message is printed followed by the help text.
    Rejected { message: String },
}

/// Parses a full argument vector, program name first.
///
/// `interactive` tells whether an overwrite prompt can be answered; when it
/// cannot, existing files are left alone unless `-ow` is given.
pub fn parse_invocation(args: Vec<String>, interactive: bool) -> Invocation {
    if args.len() <= 1 {
        return Invocation::Help;
    }
    let normalized = normalize_args(&args);
    let cli = match Cli::try_parse_from(&normalized) {
        Ok(cli) => cli,
        Err(err) => {
            return Invocation::Rejected {
                message: rejection_message(&err, &args, &normalized),
            }
        }
    };
    if cli.help {
        return Invocation::Help;
    }
    match cli.input.clone() {
        Some(input) => Invocation::Convert(cli.into_request(input, interactive)),
        None => Invocation::Help,
    }
}

impl Cli {
    fn into_request(self, input: PathBuf, interactive: bool) -> ConversionRequest {
        let direction = if self.json {
            DirectionChoice::ToJson
        } else if self.nav {
            DirectionChoice::ToNav
        } else {
            DirectionChoice::Auto
        };
        let output = match (self.out_stdout, self.out) {
            (true, path) => OutputTarget::Stdout { path },
            (false, Some(path)) => OutputTarget::Path(path),
            (false, None) => OutputTarget::Derived,
        };
        let overwrite = if self.overwrite {
            OverwritePolicy::Always
        } else if interactive {
            OverwritePolicy::Ask
        } else {
            OverwritePolicy::Never
        };
        ConversionRequest::new(input)
            .with_direction(direction)
            .with_upgrade(self.upgrade)
            .with_output(output)
            .with_overwrite(overwrite)
            .with_silent(self.silent)
            .with_metadata(MetadataOverrides {
                map_filename: self.map_filename,
                map_author: self.map_author,
                map_name: self.map_name,
                map_urls: self.map_url,
                comment: self.json_comment,
                contributors: self.json_contributor,
            })
    }
}

/// Rewrites `-name` options to `--name` and lowercases option names. Values,
/// whether following an option or attached with `=`, are passed through
/// untouched. The last argument is always the input path, unless it asks for
/// help.
pub fn normalize_args(args: &[String]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(args.len() + 1);
    let Some((program, rest)) = args.split_first() else {
        return normalized;
    };
    normalized.push(program.clone());
    let mut expects_value = false;
    for (index, arg) in rest.iter().enumerate() {
        if expects_value {
            normalized.push(arg.clone());
            expects_value = false;
            continue;
        }
        let option = option_parts(arg);
        let is_last = index + 1 == rest.len();
        if is_last && !option.is_some_and(|(name, value)| is_help(name, value)) {
            if arg.starts_with('-') {
                normalized.push("--".to_string());
            }
            normalized.push(arg.clone());
            continue;
        }
        match option {
            Some((name, value)) => {
                let name = name.to_ascii_lowercase();
                let dashes = if name.chars().count() == 1 { "-" } else { "--" };
                match value {
                    Some(value) => normalized.push(format!("{dashes}{name}={value}")),
                    None => {
                        expects_value = VALUE_OPTIONS.contains(&name.as_str());
                        normalized.push(format!("{dashes}{name}"));
                    }
                }
            }
            None => normalized.push(arg.clone()),
        }
    }
    normalized
}

/// Splits `-name` or `-name=value` into its name and attached value.
fn option_parts(arg: &str) -> Option<(&str, Option<&str>)> {
    let body = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .filter(|body| !body.is_empty())?;
    match body.split_once('=') {
        Some((name, value)) => Some((name, Some(value))),
        None => Some((body, None)),
    }
}

fn is_help(name: &str, value: Option<&str>) -> bool {
    value.is_none() && (name.eq_ignore_ascii_case("h") || name.eq_ignore_ascii_case("help"))
}

fn rejection_message(err: &clap::Error, original: &[String], normalized: &[String]) -> String {
    let offending = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(original_spelling(arg, original, normalized)),
        _ => None,
    };
    match (err.kind(), offending) {
        (ErrorKind::UnknownArgument, Some(option)) => format!("Unknown option '{option}'"),
        (ErrorKind::ArgumentConflict, _) => {
            "Options -json and -nav cannot be used together".to_string()
        }
        (_, Some(option)) => format!("Invalid use of option '{option}'"),
        (_, None) => "Invalid arguments".to_string(),
    }
}

/// Maps an argument as clap reported it back to what was typed, lowercased.
fn original_spelling(reported: &str, original: &[String], normalized: &[String]) -> String {
    let flag = reported.split('=').next().unwrap_or(reported);
    normalized
        .iter()
        .position(|arg| arg == reported || arg.split('=').next() == Some(flag))
        .and_then(|index| original.get(index))
        .map(|arg| arg.split('=').next().unwrap_or(arg).to_ascii_lowercase())
        .unwrap_or_else(|| reported.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        std::iter::once("nav2json")
            .chain(items.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn single_dash_long_options_are_rewritten() {
        let normalized = normalize_args(&args(&["-JSON", "-s", "-map-author", "-dash", "a.nav"]));
        assert_eq!(
            normalized,
            vec!["nav2json", "--json", "-s", "--map-author", "-dash", "a.nav"]
        );
    }

    #[test]
    fn attached_values_keep_their_case() {
        let normalized = normalize_args(&args(&["-Map-Author=Jane Doe", "-OUT=Maps/A.json", "a.nav"]));
        assert_eq!(
            normalized,
            vec!["nav2json", "--map-author=Jane Doe", "--out=Maps/A.json", "a.nav"]
        );
    }

    #[test]
    fn last_argument_is_always_the_input() {
        let normalized = normalize_args(&args(&["-s", "-weird.nav"]));
        assert_eq!(normalized, vec!["nav2json", "-s", "--", "-weird.nav"]);

        let normalized = normalize_args(&args(&["-s", "-HELP"]));
        assert_eq!(normalized, vec!["nav2json", "-s", "--help"]);
    }

    #[test]
    fn lone_double_dash_passes_through() {
        let normalized = normalize_args(&args(&["--", "a.nav"]));
        assert_eq!(normalized, vec!["nav2json", "--", "a.nav"]);
    }

    #[test]
    fn original_spelling_is_recovered() {
        let original = args(&["-Bogus", "a.nav"]);
        let normalized = normalize_args(&original);
        assert_eq!(original_spelling("--bogus", &original, &normalized), "-bogus");
    }
}
