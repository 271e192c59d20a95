pub(crate) mod filter;
pub(crate) mod generators;
pub(crate) mod prune;

use std::path::Path;
use std::process;

use sdkscope_filter::FilteredIr;
use sdkscope_ir::{GeneratorName, IntermediateRepresentation};

use crate::config::{ConfigFile, Settings};
use crate::{report_error, OutputFormat};

/// Inputs shared by the subcommands that filter an IR.
pub(crate) struct FilterOptions<'a> {
    pub ir: &'a Path,
    pub audiences: &'a [String],
    pub generator: Option<GeneratorName>,
    pub config: Option<&'a Path>,
    pub output: OutputFormat,
    pub quiet: bool,
}

/// Load the IR and config, then run the audience filter. Exits the process
/// with status 1 on any failure.
pub(crate) fn run_filter(
    opts: &FilterOptions<'_>,
) -> (IntermediateRepresentation, Settings, FilteredIr) {
    let config = match ConfigFile::discover(opts.config) {
        Ok(c) => c,
        Err(e) => {
            report_error(&e.to_string(), opts.output, opts.quiet);
            process::exit(1);
        }
    };

    let settings = match Settings::resolve(opts.audiences, opts.generator, config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e.to_string(), opts.output, opts.quiet);
            process::exit(1);
        }
    };

    let ir = match sdkscope_ir::load(opts.ir) {
        Ok(ir) => ir,
        Err(e) => {
            report_error(&e.to_string(), opts.output, opts.quiet);
            process::exit(1);
        }
    };

    let filtered = match sdkscope_filter::filter_ir(&ir, &settings.selection) {
        Ok(f) => f,
        Err(e) => {
            let msg = format!("filter error: {}", e);
            report_error(&msg, opts.output, opts.quiet);
            process::exit(1);
        }
    };

    (ir, settings, filtered)
}
