use anyhow::Context;
use clap::Parser;
use salary_stats::core::report::{export_reports, render_table};
use salary_stats::utils::error::{ErrorSeverity, SalaryError};
use salary_stats::utils::{logger, validation::Validate};
use salary_stats::{CliConfig, LocalStorage, StatsEngine};

fn exit_code(e: &SalaryError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: SalaryError) -> ! {
    tracing::error!("❌ Run failed: {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    match &cli.log_file {
        Some(path) => logger::init_file_logger(cli.verbose, path)
            .with_context(|| format!("cannot open log file {}", path.display()))?,
        None => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting salary-stats");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = cli.load_settings().unwrap_or_else(|e| fail(e));
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(e);
    }

    let engine = StatsEngine::from_settings(&settings).unwrap_or_else(|e| fail(e));
    let reports = engine.run().await.unwrap_or_else(|e| fail(e));

    for report in &reports {
        println!("{}", render_table(report));
    }

    if let Some(output_path) = &cli.output_path {
        let storage = LocalStorage::new(output_path.clone());
        match export_reports(&storage, &reports, &cli.formats).await {
            Ok(files) => println!(
                "📁 {} report files saved to {}",
                files.len(),
                storage.base_path().display()
            ),
            Err(e) => fail(e),
        }
    }

    Ok(())
}
