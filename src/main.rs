use clap::Parser;
use colored::Colorize;

use travel_catalog::cli::Cli;
use travel_catalog::config::{get_config, init_config_from};
use travel_catalog::runtime::modes::{self, Mode};
use travel_catalog::system::init_logging;

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();

    // .env 先于配置加载，TC__* 变量可以写在里面
    dotenvy::dotenv().ok();
    init_config_from(cli.config.as_deref());
    let config = get_config();

    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {:#}", "Failed to initialize logging:".red().bold(), e);
            std::process::exit(1);
        }
    };

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            if let Err(e) = modes::run_server().await {
                eprintln!("{} {:#}", "Server error:".red().bold(), e);
                std::process::exit(1);
            }
        }
        Mode::Cli => {
            let Some(command) = cli.command else {
                return;
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
    }
}
