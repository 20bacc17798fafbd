use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Recipe catalog API base URL
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Document store base URL
    #[serde(default = "default_store_api_url")]
    pub store_api_url: String,

    /// Document store API key, if the deployment requires one
    #[serde(default)]
    pub store_api_key: Option<String>,
}

fn default_catalog_api_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_store_api_url() -> String {
    "http://localhost:8080".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
