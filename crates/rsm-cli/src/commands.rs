use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use colored::Colorize;
use rsm_merge::{merge_documents_with_report, MergeReport};
use rsm_types::VersionedTypeId;
use serde_json::{json, Value};

use crate::cli::*;
use crate::config::CliConfig;

/// Exit status when `--strict` and the merge degraded a type.
const EXIT_DEGRADED: u8 = 2;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args, &cli.format),
        Command::Compare(args) => cmd_compare(args, &cli.format),
        Command::Inspect(args) => cmd_inspect(args, &cli.format),
    }
}

fn cmd_merge(args: MergeArgs, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let config = CliConfig::load(args.config.as_deref())?;
    let pretty = config.output.pretty && !args.compact;
    let strict = config.merge.fail_on_conflict || args.strict;

    let documents = load_documents(&args.inputs)?;
    let outcome = merge_documents_with_report(&documents);
    let rendered = render_document(&outcome.document, pretty)?;

    match &args.output {
        Some(path) => std::fs::write(path, rendered + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }

    print_report(&outcome.report, format)?;

    if strict && outcome.report.is_degraded() {
        tracing::error!(
            conflicts = outcome.report.type_conflicts.len(),
            "merge degraded @odata.type values"
        );
        return Ok(ExitCode::from(EXIT_DEGRADED));
    }
    Ok(ExitCode::SUCCESS)
}

/// Read each file as JSON, keeping argument order.
fn load_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<Value>> {
    paths.iter().map(|path| load_document(path)).collect()
}

fn load_document(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn render_document(document: &Value, pretty: bool) -> anyhow::Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(rendered)
}

fn print_report(report: &MergeReport, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => eprintln!("{}", serde_json::to_string(report)?),
        OutputFormat::Text => {
            eprintln!(
                "{} Merged {} documents",
                "✓".green().bold(),
                report.documents.to_string().bold()
            );
            if report.ignored_documents > 0 {
                eprintln!("  Ignored: {} non-object documents", report.ignored_documents.to_string().yellow());
            }
            if report.collections_normalized > 0 {
                eprintln!(
                    "  Collections: {} normalized, {} duplicate members removed",
                    report.collections_normalized, report.duplicate_members_removed
                );
            }
            for conflict in &report.type_conflicts {
                eprintln!(
                    "  {} {} {} vs {}",
                    "conflict:".red().bold(),
                    conflict.pointer.cyan(),
                    conflict.current.yellow(),
                    conflict.incoming.yellow()
                );
            }
        }
    }
    Ok(())
}

fn parse_identifier(raw: &str) -> anyhow::Result<VersionedTypeId> {
    match VersionedTypeId::parse(raw) {
        Some(id) => Ok(id),
        None => bail!("not a versioned type identifier: {raw}"),
    }
}

/// Compare two identifiers, failing if either is opaque or they are incomparable.
fn compare_identifiers(left: &str, right: &str) -> anyhow::Result<(Ordering, VersionedTypeId)> {
    let left = parse_identifier(left)?;
    let right = parse_identifier(right)?;
    let ordering = left.compare(&right)?;
    Ok((ordering, left.higher_of(right)?))
}

fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let (ordering, higher) = compare_identifiers(&args.left, &args.right)?;
    let symbol = match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "left": args.left,
                "right": args.right,
                "ordering": format!("{ordering:?}").to_lowercase(),
                "higher": higher,
            })
        ),
        OutputFormat::Text => {
            println!("{} {} {}", args.left, symbol.bold(), args.right);
            println!("  Higher: {}", higher.as_str().green());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn describe_identifier(raw: &str) -> Value {
    match VersionedTypeId::parse(raw) {
        Some(id) => json!({
            "namespace": id.namespace(),
            "version": id.version(),
            "type_name": id.type_name(),
        }),
        None => json!({ "opaque": raw }),
    }
}

fn cmd_inspect(args: InspectArgs, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    match format {
        OutputFormat::Json => println!("{}", describe_identifier(&args.identifier)),
        OutputFormat::Text => match VersionedTypeId::parse(&args.identifier) {
            Some(id) => {
                let version: Vec<String> = id.version().iter().map(u64::to_string).collect();
                println!("Namespace: {}", id.namespace().cyan());
                println!("Version:   {}", version.join(".").yellow());
                println!("Type:      {}", id.type_name().cyan());
            }
            None => println!("{} is opaque (not a versioned type identifier)", args.identifier.yellow()),
        },
    }
    Ok(ExitCode::SUCCESS)
}
