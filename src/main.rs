use anyhow::Result;
use chrono::Utc;
use log::{error, info};
use oncall_clock::app::{is_config_missing, Application};
use oncall_clock::{env_manager, Config};
use std::io;
use std::process::ExitCode;

/// Exit status when PagerDuty credentials are not configured.
const CONFIG_MISSING_EXIT_CODE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    oncall_clock::init_logger();
    env_manager::load_env_file();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_config_missing(&err) => {
            error!("{}; set it in the environment or a .env file", err);
            ExitCode::from(CONFIG_MISSING_EXIT_CODE)
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = Config::load()?;
    info!("Starting oncall-clock with {} regions", config.regions.len());

    let app = Application::new(config)?;
    let stdout = io::stdout();
    app.run(Utc::now(), &mut stdout.lock()).await
}
