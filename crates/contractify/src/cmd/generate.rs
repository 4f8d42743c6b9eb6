use contractify_codegen::generate;
use tracing::debug;

use crate::cmd::GenerateArgs;
use crate::exit::{codegen_error, io_error, CliResult, SUCCESS};
use crate::output::{print_generated, OutputFormat};

pub fn run(args: GenerateArgs, format: OutputFormat) -> CliResult<i32> {
    let project_root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()
            .map_err(|err| io_error("failed to resolve working directory", err))?,
    };

    debug!(root = %project_root.display(), "resolved project root");
    let generated = generate(&project_root).map_err(codegen_error)?;
    print_generated(&generated, format);
    Ok(SUCCESS)
}
