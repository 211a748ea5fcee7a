use std::fs::{self, File};
use std::process::ExitCode;
use std::sync::Arc;

use domtree::Viewport;
use log::info;
use simplelog::{Config, WriteLogger};
use storefront_admin::{AppConfig, AppError, PageContext, Router, paths};
use storefront_api::RestClient;

const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

fn init_logging(config: &AppConfig) {
    paths::rotate_logs();

    let Some(log_file) = paths::log_file() else {
        eprintln!("Warning: no cache directory, logging disabled");
        return;
    };
    if let Some(dir) = log_file.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let result = File::create(&log_file)
        .map_err(|e| e.to_string())
        .and_then(|file| {
            WriteLogger::init(config.log_level, Config::default(), file).map_err(|e| e.to_string())
        });
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {e}");
    }
}

async fn run(path: &str) -> Result<String, AppError> {
    let config = AppConfig::from_env()?;
    init_logging(&config);

    let client = RestClient::builder()
        .base_url(config.backend_url.as_str())
        .build()?;
    info!("backend at {}", client.base_url());

    let ctx = PageContext::new(&config, Arc::new(client));
    let mut router = Router::new(ctx, VIEWPORT);
    router.render_page(path).await?;
    Ok(router.html())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let path = std::env::args().nth(1).unwrap_or_default();
    match run(&path).await {
        Ok(html) => {
            println!("{html}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
