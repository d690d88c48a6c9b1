use clap::Parser;
use portable_report::cli::commands::{cmd_generate, cmd_patch_index, cmd_send};
use portable_report::cli::config::{
    Cli, Commands, load_config, resolve_generate, resolve_report_dir, resolve_send,
};
use portable_report::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > env > config > defaults
    match cli.command {
        Commands::Generate {
            results,
            out,
            patch_index,
        } => {
            let settings = resolve_generate(results.as_deref(), out.as_deref(), patch_index, &config);
            cmd_generate(&settings)?;
        }
        Commands::PatchIndex { dir } => {
            let dir = resolve_report_dir(dir.as_deref(), &config);
            cmd_patch_index(&dir)?;
        }
        Commands::Send(args) => {
            let settings = resolve_send(&args, &config)?;
            cmd_send(&settings)?;
        }
    }

    Ok(())
}
