use clap::Parser;
use customer_etl::config::cli::USAGE_EXAMPLES;
use customer_etl::utils::{logger, validation::Validate};
use customer_etl::{CliConfig, CustomerPipeline, EtlEngine, EtlError, LocalStorage};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 只檢查參數是否齊全，合法與否交給解析器
    if let Err(e) = config.validate() {
        if let EtlError::MissingArgumentError { .. } = e {
            print_usage();
            std::process::exit(1);
        }
        fail(e);
    }

    let quiet = config.quiet;
    let storage = LocalStorage::default();
    let pipeline = match CustomerPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(e),
    };

    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            tracing::info!(
                "✅ Parsed {} customers, output saved to: {}",
                outcome.record_count,
                outcome.output_path
            );
            if !quiet {
                println!("{}", outcome.document);
            }
        }
        Err(e) => fail(e),
    }
}

fn print_usage() {
    eprintln!("Invalid input arguments");
    eprintln!();
    eprintln!("Examples:");
    for example in USAGE_EXAMPLES {
        eprintln!("  $ {}", example);
    }
    eprintln!();
}

fn fail(e: EtlError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Customer ETL failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code().max(1));
}
