// crates/fill_template/src/config.rs

use anyhow::{anyhow, bail, Result};
use clap::ArgMatches;
use document_model::DocumentFormat;
use std::env;
use std::path::{Path, PathBuf};

/// Default output location when neither `--output` nor this is given.
pub const OUTPUT_ENV: &str = "FILL_TEMPLATE_OUTPUT";
/// Forces the document format (`json` or `text`).
pub const FORMAT_ENV: &str = "FILL_TEMPLATE_FORMAT";

/// Centralized runtime configuration composed from CLI + environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub command: CommandConfig,
    pub verbose: bool,
}

/// A document on disk and the format it is read and written in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentTarget {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

#[derive(Clone, Debug)]
pub enum CommandConfig {
    Formats {
        json: bool,
    },
    Markers {
        document: DocumentTarget,
        json: bool,
    },
    Fill {
        document: DocumentTarget,
        output: PathBuf,
        values_file: Option<PathBuf>,
        assignments: Vec<(String, String)>,
        json: bool,
    },
    Replace {
        document: DocumentTarget,
        output: PathBuf,
        search: String,
        replacement: String,
        json: bool,
    },
}

impl AppConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        Self::from_matches_with_env(matches, |key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_matches`] with the environment supplied by
    /// the caller.
    pub fn from_matches_with_env<F>(matches: &ArgMatches, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (name, sub) = matches
            .subcommand()
            .ok_or_else(|| anyhow!("No command given"))?;
        let verbose = sub.get_flag("verbose") || matches.get_flag("verbose");
        let forced_format = sub
            .get_one::<String>("format")
            .cloned()
            .or_else(|| env(FORMAT_ENV));

        let command = match name {
            "formats" => CommandConfig::Formats {
                json: sub.get_flag("json"),
            },
            "markers" => CommandConfig::Markers {
                document: document_target(sub, forced_format.as_deref())?,
                json: sub.get_flag("json"),
            },
            "fill" => {
                let document = document_target(sub, forced_format.as_deref())?;
                let assignments = sub
                    .get_many::<String>("set")
                    .unwrap_or_default()
                    .map(|raw| parse_assignment(raw))
                    .collect::<Result<Vec<_>>>()?;
                let values_file = sub.get_one::<String>("values").map(PathBuf::from);
                if values_file.is_none() && assignments.is_empty() {
                    bail!("Nothing to fill: pass --values <FILE> and/or --set NAME=VALUE");
                }
                CommandConfig::Fill {
                    output: output_path(sub, &document.path, &env),
                    document,
                    values_file,
                    assignments,
                    json: sub.get_flag("json"),
                }
            }
            "replace" => {
                let document = document_target(sub, forced_format.as_deref())?;
                CommandConfig::Replace {
                    output: output_path(sub, &document.path, &env),
                    document,
                    search: required(sub, "search")?,
                    replacement: required(sub, "with")?,
                    json: sub.get_flag("json"),
                }
            }
            other => bail!("Unknown command '{}'", other),
        };

        Ok(AppConfig { command, verbose })
    }
}

fn required(sub: &ArgMatches, id: &str) -> Result<String> {
    sub.get_one::<String>(id)
        .cloned()
        .ok_or_else(|| anyhow!("Missing --{}", id))
}

fn document_target(sub: &ArgMatches, forced_format: Option<&str>) -> Result<DocumentTarget> {
    let path = PathBuf::from(required(sub, "document")?);
    let format = match forced_format {
        Some(raw) => raw.parse::<DocumentFormat>().map_err(|err| anyhow!(err))?,
        None => DocumentFormat::from_path(&path),
    };
    Ok(DocumentTarget { path, format })
}

/// `--output`, then the environment, then `<stem>_filled.<ext>` beside the
/// input.
fn output_path<F>(sub: &ArgMatches, input: &Path, env: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    sub.get_one::<String>("output")
        .cloned()
        .or_else(|| env(OUTPUT_ENV))
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(input))
}

pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let file_name = match input.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{}_filled.{}", stem, ext),
        None => format!("{}_filled", stem),
    };
    input.with_file_name(file_name)
}

/// Splits `NAME=VALUE` at the first `=`. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid --set '{}': expected NAME=VALUE", raw))?;
    if name.trim().is_empty() {
        bail!("Invalid --set '{}': marker name is empty", raw);
    }
    Ok((name.trim().to_string(), value.to_string()))
}
