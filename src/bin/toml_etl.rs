use clap::Parser;
use customer_etl::core::ConfigProvider;
use customer_etl::utils::{logger, validation::Validate};
use customer_etl::{
    CustomerPipeline, EtlEngine, EtlError, LocalStorage, OutputFormat, ParseOptions, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Run a customer parsing job described in a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "customer-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output format from config
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Dry run - check the job without reading or writing any file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(format) = args.format {
        config.output.format = Some(format);
        tracing::info!("🔧 Output format overridden to: {}", format);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(e);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        perform_dry_run(&config);
        return;
    }

    let print_output = config.print_output();
    let pipeline = match CustomerPipeline::new(LocalStorage::default(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(e),
    };

    match EtlEngine::new(pipeline).run().await {
        Ok(outcome) => {
            tracing::info!(
                "✅ Parsed {} customers, output saved to: {}",
                outcome.record_count,
                outcome.output_path
            );
            if print_output {
                println!("{}", outcome.document);
            }
        }
        Err(e) => fail(e),
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    eprintln!("📋 Configuration Summary:");
    eprintln!("  Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        eprintln!("  Description: {}", description);
    }
    eprintln!("  Input: {}", config.input_path());
    eprintln!("  Delimiter: '{}'", config.delimiter());
    eprintln!("  Sort by: {}", config.sort_by());
    eprintln!("  Output: {} ({})", config.output_path(), config.output_format());

    if args.dry_run {
        eprintln!("  🔍 DRY RUN MODE ENABLED");
    }

    eprintln!();
}

fn perform_dry_run(config: &TomlConfig) {
    match ParseOptions::new(config.delimiter(), config.sort_by()) {
        Ok(options) => {
            eprintln!("🔍 Dry Run Analysis:");
            eprintln!("  Would read {}", config.input_path());
            eprintln!(
                "  Would split on '{}' and sort by {} (case-insensitive)",
                options.delimiter, options.sort_key
            );
            eprintln!(
                "  Would write {} to {}",
                config.output_format(),
                config.output_path()
            );
            eprintln!("✅ Dry run analysis complete.");
        }
        Err(e) => fail(e),
    }
}

fn fail(e: EtlError) -> ! {
    tracing::error!(
        "❌ Customer ETL failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code().max(1));
}
