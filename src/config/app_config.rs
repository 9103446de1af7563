use std::time::Duration;

use serde::Deserialize;

use crate::domain::planner::{ConfidenceCurve, CreditScaling, PlannerSettings};
use crate::domain::DomainError;
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::session::InMemoryScheduleStoreConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub planner: PlannerConfig,
    pub sessions: SessionConfig,
    pub cors: CorsConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Allocation engine tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Factor per confidence level 1..=5
    pub confidence_factors: Vec<f64>,
    pub credit_scaling: CreditScalingKind,
    /// Only used with `tapered` scaling
    pub credit_taper_rate: f64,
    pub max_courses: usize,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CreditScalingKind {
    #[default]
    Linear,
    Tapered,
}

/// Per-session schedule retention
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub max_capacity: u64,
    /// Zero disables idle expiry
    pub time_to_idle_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `*` allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let defaults = PlannerSettings::default();
        Self {
            confidence_factors: defaults.confidence.factors().to_vec(),
            credit_scaling: CreditScalingKind::default(),
            credit_taper_rate: 0.3,
            max_courses: defaults.max_courses,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_idle_secs: 24 * 3600,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl PlannerConfig {
    /// Validate and convert into engine settings
    pub fn to_settings(&self) -> Result<PlannerSettings, DomainError> {
        let credit = match self.credit_scaling {
            CreditScalingKind::Linear => CreditScaling::Linear,
            CreditScalingKind::Tapered => CreditScaling::tapered(self.credit_taper_rate)?,
        };

        PlannerSettings::new(
            ConfidenceCurve::new(&self.confidence_factors)?,
            credit,
            self.max_courses,
        )
    }
}

impl SessionConfig {
    pub fn store_config(&self) -> InMemoryScheduleStoreConfig {
        let config = InMemoryScheduleStoreConfig::default().with_max_capacity(self.max_capacity);

        if self.time_to_idle_secs == 0 {
            config.without_time_to_idle()
        } else {
            config.with_time_to_idle(Duration::from_secs(self.time_to_idle_secs))
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("planner.confidence_factors")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        config.try_deserialize()
    }
}
