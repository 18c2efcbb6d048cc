use log::{debug, info};

/// Load a `.env` file from the working directory (or a parent) if one exists.
/// Variables already set in the process take precedence.
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => info!("Failed to load .env file: {}", e),
    }
}
