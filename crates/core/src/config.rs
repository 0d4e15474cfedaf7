use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_INSIGHTS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_dataset_key")]
    pub dataset_key: String,
    #[serde(default = "default_prefs_key")]
    pub prefs_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_group_by")]
    pub default_group_by: String,
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,
    #[serde(default = "default_sort_direction")]
    pub default_sort_direction: String,
}

// Default functions
fn default_data_dir() -> String {
    ".campaign-insights".to_string()
}
fn default_dataset_key() -> String {
    "campaign_dataset".to_string()
}
fn default_prefs_key() -> String {
    "campaign_prefs".to_string()
}
fn default_group_by() -> String {
    "campaign".to_string()
}
fn default_sort_field() -> String {
    "spent".to_string()
}
fn default_sort_direction() -> String {
    "desc".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset_key: default_dataset_key(),
            prefs_key: default_prefs_key(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_group_by: default_group_by(),
            default_sort_field: default_sort_field(),
            default_sort_direction: default_sort_direction(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CAMPAIGN_INSIGHTS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
