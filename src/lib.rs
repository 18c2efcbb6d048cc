pub mod app;
pub mod config;
pub mod credentials;
pub mod env_manager;
pub mod pager_duty;
pub mod region;

/// Log filter variable; defaults to `warn` so stdout stays the report.
pub const LOG_LEVEL_ENV_VAR: &str = "ONCALL_CLOCK_LOG_LEVEL";

pub fn init_logger() {
    use env_logger::Env;

    env_logger::Builder::from_env(Env::default().filter_or(LOG_LEVEL_ENV_VAR, "warn"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use app::Application;
pub use config::Config;
pub use credentials::{ConfigMissing, CredentialSource, Credentials, EnvCredentials};
pub use pager_duty::{LookupError, OnCallClient, TimeWindow};
pub use region::Region;
