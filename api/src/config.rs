use bt_shared::AppConfig;

/// Loads the application configuration
///
/// A `.env` file in the working directory is applied first when present;
/// variables already set in the process environment take precedence.
pub fn load() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}
