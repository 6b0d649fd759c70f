use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_predict_path")]
    pub predict_path: String,
    #[serde(default = "default_stats_path")]
    pub stats_path: String,
    pub session_cookie: Option<String>,
    pub connect_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default = "default_true")]
    pub bar_chart: bool,
    #[serde(default = "default_true")]
    pub pie_chart: bool,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            predict_path: default_predict_path(),
            stats_path: default_stats_path(),
            session_cookie: None,
            connect_timeout_ms: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            brands: Vec::new(),
            bar_chart: true,
            pie_chart: true,
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_predict_path() -> String {
    "/predict".to_string()
}

fn default_stats_path() -> String {
    "/brand_stats".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    100
}
