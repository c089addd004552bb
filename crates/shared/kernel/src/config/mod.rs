use config::{Config, Environment, File};
use rally_domain::config::RallyConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Name of the configuration file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "rally";

/// Prefix of environment overrides (`RALLY__ROSTER__TEAM_SIZE` maps to `roster.team_size`).
pub const ENV_PREFIX: &str = "RALLY";

/// Custom error type for config loading.
#[rally_derive::rally_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from `path` (any format supported by the `config` crate,
///    resolved by extension). The file is required.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with
///    `RALLY__`. Nested structures are accessed using double underscores
///    (e.g., `RALLY__STORAGE__ROSTER` maps to `storage.roster`).
///
/// # Errors
/// This function will return an error if:
/// * The configuration file cannot be found or parsed.
/// * The merged content does not match the structure of type `T`.
///
/// # Example
/// ```rust,no_run
/// use rally_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config("config/local.toml").unwrap_or_default();
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    info!("Loading config from {}", path.display());

    build(File::from(path).required(true))
}

/// Loads the workspace [`RallyConfig`].
///
/// With an explicit `path` the file is required. Without one, `rally.{toml,json,yaml,..}` in
/// the working directory is used when present and built-in defaults otherwise; environment
/// overrides apply in both cases.
///
/// # Errors
/// Returns [`ConfigError::Config`] if a file exists but cannot be parsed, or if an override has
/// the wrong type.
pub fn load_rally_config(path: Option<impl AsRef<Path>>) -> Result<RallyConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    debug!("No config path given, looking for optional '{DEFAULT_CONFIG_NAME}' file");
    build(File::with_name(DEFAULT_CONFIG_NAME).required(false))
}

fn build<T>(file: impl config::Source + Send + Sync + 'static) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake), // Env var overrides (e.g., RALLY__ROSTER__TEAM_SIZE)
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
