use std::path::Path;
use std::process;

use super::{run_filter, FilterOptions};
use crate::report_error;

/// Write the IR restricted to the retained declarations, to `out` or stdout.
pub(crate) fn cmd_prune(opts: &FilterOptions<'_>, out: Option<&Path>) {
    let (ir, _settings, filtered) = run_filter(opts);
    let pruned = filtered.apply(&ir);

    let json = match serde_json::to_string_pretty(&pruned) {
        Ok(j) => j,
        Err(e) => {
            let msg = format!("serialization error: {}", e);
            report_error(&msg, opts.output, opts.quiet);
            process::exit(1);
        }
    };

    match out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", json)) {
                let msg = format!("error writing '{}': {}", path.display(), e);
                report_error(&msg, opts.output, opts.quiet);
                process::exit(1);
            }
            tracing::info!(path = %path.display(), "wrote pruned IR");
            if !opts.quiet {
                eprintln!("wrote {}", path.display());
            }
        }
        None => println!("{}", json),
    }
}
