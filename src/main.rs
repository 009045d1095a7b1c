use borderplex_rfi::core::export::read_response_file;
use borderplex_rfi::utils::error::ErrorSeverity;
use borderplex_rfi::utils::{format, logger, validation::Validate};
use borderplex_rfi::{
    AcceleratorConfig, CliConfig, Command, LocalStorage, RequestOverrides, ResponseExporter,
    RfiAccelerator, RfiError, RfiResponse,
};
use clap::Parser;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

type Exporter = ResponseExporter<LocalStorage, AcceleratorConfig>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting borderplex-rfi");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ RFI generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), RfiError> {
    let config = cli.resolve()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let accelerator = RfiAccelerator::from_config(&config)?;
    let export_enabled = !cli.output_args().no_export;
    let storage = LocalStorage::new(config.output.output_path.clone());
    let exporter = ResponseExporter::new(storage, config);

    match &cli.command {
        Command::Generate {
            prompt, overrides, ..
        } => {
            let prompt = prompt.join(" ");
            let response = accelerator.process(&prompt, &RequestOverrides::from(overrides))?;
            report(&response, &exporter, export_enabled).await?;
        }
        Command::Update {
            from, overrides, ..
        } => {
            let previous = match from {
                Some(path) => read_response_file(path).await?,
                None => exporter.load_current().await?,
            };
            let response = accelerator.recompute(&previous, &RequestOverrides::from(overrides))?;
            report(&response, &exporter, export_enabled).await?;
        }
        Command::Interactive { .. } => interactive(&accelerator, &exporter, export_enabled).await?,
    }

    Ok(())
}

async fn report(response: &RfiResponse, exporter: &Exporter, export_enabled: bool) -> Result<(), RfiError> {
    println!("\nExtracted parameters:");
    println!("{}", format::parameters_summary(&response.parameters()));
    println!("\nSite snapshot ({}):", response.project_summary.location);
    println!("{}", format::site_summary(response));
    println!("\nEconomic Impact Summary:");
    println!("{}", format::impact_summary(response));

    if export_enabled {
        for path in exporter.export(response).await? {
            tracing::info!("📁 Output saved to: {}", path);
            println!("📁 Output saved to: {}", path);
        }
    }
    Ok(())
}

async fn interactive(
    accelerator: &RfiAccelerator,
    exporter: &Exporter,
    export_enabled: bool,
) -> Result<(), RfiError> {
    println!("Welcome to the Borderplex RFI Accelerator");
    println!("----------------------------------------");
    println!("Enter your RFI request in natural language:");
    println!("Example: Generate an RFI for a 200-employee automotive supplier in El Paso");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\nRFI Request (or 'exit' to quit): ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let prompt = line.trim();
        if prompt.eq_ignore_ascii_case("exit") {
            break;
        }

        let started = Instant::now();
        match accelerator.process(prompt, &RequestOverrides::default()) {
            Ok(response) => {
                println!(
                    "\nRFI response generated in {:.2} seconds!",
                    started.elapsed().as_secs_f64()
                );
                report(&response, exporter, export_enabled).await?;
            }
            // 單筆請求失敗不中斷互動模式
            Err(e) => eprintln!("❌ {}", e.user_friendly_message()),
        }
    }

    Ok(())
}
