use crate::cli::PrepareArgs;
use crate::config::PartialPrepConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::info;
use trajprep::invocation::{self, SystemRunner};
use trajprep::progress::ProgressReporter;
use trajprep::workflows;

pub fn run(args: PrepareArgs) -> Result<()> {
    let partial_config = PartialPrepConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    if args.show_commands {
        println!(
            "step 1 (atom index list): writes 0..={} to {}",
            config.last_atom_index,
            config.paths.atom_index_file.display()
        );
        for (offset, invocation) in invocation::planned(&config).iter().enumerate() {
            println!("step {}: {}", offset + 2, invocation.command_line());
        }
        return Ok(());
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting run-input preparation...");
    info!("Invoking the core preparation workflow...");

    workflows::prepare::run(&config, &SystemRunner, &reporter)?;

    println!(
        "✓ Run input written to: {}",
        config.paths.run_input_file.display()
    );
    Ok(())
}
