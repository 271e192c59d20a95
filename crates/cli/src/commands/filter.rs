use std::collections::BTreeSet;

use sdkscope_filter::{AudienceSelection, FilterReport, FindingSeverity, KindCount};

use super::{run_filter, FilterOptions};
use crate::OutputFormat;

pub(crate) fn cmd_filter(opts: &FilterOptions<'_>) {
    let (ir, settings, filtered) = run_filter(opts);
    let report = FilterReport::new(&ir, settings.selection, settings.generator, filtered);

    if opts.quiet {
        return;
    }
    match opts.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
                serde_json::json!({ "error": format!("serialization: {}", e) }).to_string()
            });
            println!("{}", json);
        }
        OutputFormat::Text => print_text(&report),
    }
}

fn print_text(report: &FilterReport) {
    println!("Audience Filter Report");
    println!("======================");
    println!();
    println!("  API: {}", report.api_name);
    match &report.selection {
        AudienceSelection::All => println!("  Audiences: (all)"),
        AudienceSelection::Only(audiences) => {
            let names: Vec<&str> = audiences.iter().map(|a| a.as_str()).collect();
            println!("  Audiences: {}", names.join(", "));
        }
    }
    if let Some(generator) = report.generator {
        println!("  Generator: {}", generator);
    }
    println!();

    let counts = &report.counts;
    let retained = &report.retained;
    let rows: [(&str, KindCount, Vec<&str>); 4] = [
        ("Types", counts.types, ids(retained.types())),
        ("Errors", counts.errors, ids(retained.errors())),
        ("Services", counts.services, ids(retained.services())),
        ("Endpoints", counts.endpoints, ids(retained.endpoints())),
    ];
    for (label, count, ids) in rows {
        println!("  {}: {} of {} retained", label, count.retained, count.total);
        for id in ids {
            println!("    {}", id);
        }
    }

    if !report.findings.is_empty() {
        println!();
        for finding in &report.findings {
            let tag = match finding.severity {
                FindingSeverity::Info => "info",
                FindingSeverity::Warning => "WARNING",
            };
            println!("  {}: {}", tag, finding.message);
        }
    }

    println!();
    println!("  etag: {}", report.etag);
}

fn ids<T: AsRef<str>>(set: &BTreeSet<T>) -> Vec<&str> {
    set.iter().map(AsRef::as_ref).collect()
}
