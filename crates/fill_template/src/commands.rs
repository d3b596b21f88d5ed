// crates/fill_template/src/commands.rs

use anyhow::{Context, Result};
use document_model::MemoryDocument;
use marker_syntax::MarkerSyntax;
use scan_markers::{scan, scan_report};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use substitute_markers::{raw_replace, substitute_with_report, Substitutions};
use tracing::{info, warn};

use crate::config::{AppConfig, CommandConfig, DocumentTarget};

const RULE: &str = "--------------------------------------------------";

/// Runs the configured command, writing its report to stdout.
pub fn run(config: &AppConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

pub fn run_with_output<W: Write>(config: &AppConfig, out: &mut W) -> Result<()> {
    match &config.command {
        CommandConfig::Formats { json } => list_formats(*json, out),
        CommandConfig::Markers { document, json } => list_markers(document, *json, out),
        CommandConfig::Fill {
            document,
            output,
            values_file,
            assignments,
            json,
        } => {
            let substitutions = load_substitutions(values_file.as_deref(), assignments)?;
            fill(document, output, &substitutions, *json, out)
        }
        CommandConfig::Replace {
            document,
            output,
            search,
            replacement,
            json,
        } => replace(document, output, search, replacement, *json, out),
    }
}

// ---------------------------------------------------------------------------
//  Document I/O
// ---------------------------------------------------------------------------

fn load_document(target: &DocumentTarget) -> Result<MemoryDocument> {
    let bytes = fs::read(&target.path)
        .with_context(|| format!("Failed to read document {}", target.path.display()))?;
    target
        .format
        .load(&bytes)
        .with_context(|| format!("Failed to load document {}", target.path.display()))
}

fn save_document(target: &DocumentTarget, document: &MemoryDocument, output: &Path) -> Result<()> {
    let bytes = target
        .format
        .save(document)
        .context("Failed to encode document")?;
    fs::write(output, bytes).with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), "document saved");
    Ok(())
}

/// The values file first, then each `--set` on top of it.
fn load_substitutions(values_file: Option<&Path>, assignments: &[(String, String)]) -> Result<Substitutions> {
    let mut substitutions = match values_file {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read values file {}", path.display()))?;
            Substitutions::from_json(&json)
                .with_context(|| format!("Failed to parse values file {}", path.display()))?
        }
        None => Substitutions::new(),
    };
    substitutions.merge(Substitutions::try_from(assignments.to_vec())?);
    Ok(substitutions)
}

// ---------------------------------------------------------------------------
//  Commands
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FormatEntry {
    example: String,
    description: &'static str,
    recommended: bool,
}

fn list_formats<W: Write>(json: bool, out: &mut W) -> Result<()> {
    if json {
        let entries: Vec<FormatEntry> = MarkerSyntax::ALL
            .iter()
            .map(|syntax| FormatEntry {
                example: syntax.to_string(),
                description: syntax.description(),
                recommended: syntax.is_recommended(),
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    for syntax in MarkerSyntax::ALL {
        writeln!(out, "{:<10} {}", syntax.to_string(), syntax.description())?;
    }
    Ok(())
}

fn list_markers<W: Write>(target: &DocumentTarget, json: bool, out: &mut W) -> Result<()> {
    let document = load_document(target)?;
    let report = scan_report(&document).context("Failed to scan document")?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    for marker in &report.markers {
        writeln!(out, "{}", marker)?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Total markers: {}", report.total)?;
    Ok(())
}

#[derive(Serialize)]
struct FillOutcome<'a> {
    replacements: usize,
    processed_markers: &'a [String],
    unmapped_markers: &'a [String],
    output: String,
}

fn fill<W: Write>(
    target: &DocumentTarget,
    output: &Path,
    substitutions: &Substitutions,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let mut document = load_document(target)?;

    let found = scan(&document).context("Failed to scan document")?;
    info!(markers = ?found, "markers found before substitution");
    let unmapped: Vec<String> = found
        .into_iter()
        .filter(|name| substitutions.get(name).is_none())
        .collect();
    if !unmapped.is_empty() {
        warn!(markers = ?unmapped, "markers left without a value");
    }

    let report = substitute_with_report(&mut document, substitutions)
        .context("Failed to substitute markers")?;
    save_document(target, &document, output)?;

    if json {
        let outcome = FillOutcome {
            replacements: report.replacements,
            processed_markers: &report.processed_markers,
            unmapped_markers: &unmapped,
            output: output.display().to_string(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
        return Ok(());
    }

    writeln!(out, "{}", RULE)?;
    writeln!(out, "Replacements: {}", report.replacements)?;
    writeln!(out, "Processed markers: {}", report.processed_markers.join(", "))?;
    if !unmapped.is_empty() {
        writeln!(out, "Unmapped markers: {}", unmapped.join(", "))?;
    }
    writeln!(out, "Saved to: {}", output.display())?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

#[derive(Serialize)]
struct ReplaceOutcome {
    regions: usize,
    output: String,
}

fn replace<W: Write>(
    target: &DocumentTarget,
    output: &Path,
    search: &str,
    replacement: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let mut document = load_document(target)?;
    let regions = raw_replace(&mut document, search, replacement)
        .with_context(|| format!("Failed to replace '{}'", search))?;
    save_document(target, &document, output)?;

    if json {
        let outcome = ReplaceOutcome {
            regions,
            output: output.display().to_string(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
        return Ok(());
    }

    writeln!(out, "{}", RULE)?;
    writeln!(out, "Regions changed: {}", regions)?;
    writeln!(out, "Saved to: {}", output.display())?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_model::DocumentFormat;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn run_to_string(command: CommandConfig) -> Result<String> {
        let config = AppConfig {
            command,
            verbose: false,
        };
        let mut out = Vec::new();
        run_with_output(&config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_formats_lists_recommended_first() {
        let printed = run_to_string(CommandConfig::Formats { json: false }).unwrap();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("{{NAME}}"));
        assert!(lines[0].contains("recommended"));
        assert!(lines[3].starts_with("{NAME}"));
    }

    #[test]
    fn test_fill_writes_output_and_keeps_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("carta.txt");
        let output = dir.path().join("carta_filled.txt");
        fs::write(&input, "Olá {{NOME}}\nData: <<DATA>>\n").unwrap();

        let printed = run_to_string(CommandConfig::Fill {
            document: DocumentTarget {
                path: input.clone(),
                format: DocumentFormat::Text,
            },
            output: output.clone(),
            values_file: None,
            assignments: vec![("NOME".to_string(), "João".to_string())],
            json: false,
        })
        .unwrap();

        assert!(printed.contains("Replacements: 1"));
        assert!(printed.contains("Unmapped markers: DATA"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "Olá João\nData: <<DATA>>\n");
        assert_eq!(fs::read_to_string(&input).unwrap(), "Olá {{NOME}}\nData: <<DATA>>\n");
    }

    #[test]
    fn test_set_overrides_values_file() {
        let dir = tempdir().unwrap();
        let values = dir.path().join("valores.json");
        fs::write(&values, r#"{"NOME": "Maria", "DATA": "hoje"}"#).unwrap();

        let subs = load_substitutions(
            Some(values.as_path()),
            &[("NOME".to_string(), "João".to_string())],
        )
        .unwrap();
        assert_eq!(subs.get("NOME"), Some("João"));
        assert_eq!(subs.get("DATA"), Some("hoje"));
    }

    #[test]
    fn test_missing_document_is_reported() {
        let err = run_to_string(CommandConfig::Markers {
            document: DocumentTarget {
                path: PathBuf::from("/definitely/not/here.txt"),
                format: DocumentFormat::Text,
            },
            json: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read document"));
    }

    #[test]
    fn test_failed_substitution_does_not_save() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("carta.txt");
        let output = dir.path().join("saida.txt");
        fs::write(&input, "abc").unwrap();

        let result = run_to_string(CommandConfig::Replace {
            document: DocumentTarget {
                path: input,
                format: DocumentFormat::Text,
            },
            output: output.clone(),
            search: String::new(),
            replacement: "x".to_string(),
            json: false,
        });
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
