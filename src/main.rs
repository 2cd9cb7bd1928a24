use clap::Parser;
use htcheck::utils::{logger, validation::Validate};
use htcheck::{BatchEngine, CliConfig, HtcheckPipeline, LocalStorage, RunConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting htcheck");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // Merge the optional run file before validating.
    if let Some(run_file) = config.config.clone() {
        match RunConfig::from_file(&run_file) {
            Ok(run) => run.apply(&mut config),
            Err(e) => {
                tracing::error!("❌ Could not load run file: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = match HtcheckPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ Could not initialize the HTTP client: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let engine = BatchEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Batch completed successfully!");
            println!("✅ Batch completed successfully!");
            println!("📁 Results saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                htcheck::utils::error::ErrorSeverity::Low => 0,
                htcheck::utils::error::ErrorSeverity::Medium => 2,
                htcheck::utils::error::ErrorSeverity::High => 1,
                htcheck::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
