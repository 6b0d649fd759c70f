use anyhow::Context;
pub(crate) use protocol::config::DashboardConfig;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";

fn validate_dashboard_config(config: &DashboardConfig) -> anyhow::Result<()> {
    let server = &config.server;
    let url = reqwest::Url::parse(server.base_url.trim())
        .with_context(|| format!("server base_url {} is not a URL", server.base_url))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("server base_url must use http or https");
    }
    for (name, path) in [
        ("predict_path", &server.predict_path),
        ("stats_path", &server.stats_path),
    ] {
        if !path.starts_with('/') {
            anyhow::bail!("server {} must start with '/'", name);
        }
    }
    if config.ui.tick_ms == 0 {
        anyhow::bail!("ui tick_ms must be positive");
    }
    Ok(())
}

fn read_dashboard_config(path: &Path) -> anyhow::Result<DashboardConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}

/// An explicit path must exist. Without one the default path is used when
/// present, otherwise built-in defaults apply.
pub(crate) fn load_dashboard_config(
    path: Option<&PathBuf>,
    server_override: Option<&str>,
) -> anyhow::Result<DashboardConfig> {
    let mut config = match path {
        Some(path) => read_dashboard_config(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                read_dashboard_config(default_path)?
            } else {
                DashboardConfig::default()
            }
        }
    };
    if let Some(server) = server_override {
        config.server.base_url = server.trim().to_string();
    }
    validate_dashboard_config(&config)?;
    Ok(config)
}
