use sdkscope_ir::GeneratorName;

use crate::OutputFormat;

pub(crate) fn cmd_generators(output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let names: Vec<&str> = GeneratorName::ALL.iter().map(|g| g.as_str()).collect();
            println!("{}", serde_json::json!(names));
        }
        OutputFormat::Text => {
            for generator in GeneratorName::ALL {
                println!("{}", generator);
            }
        }
    }
}
