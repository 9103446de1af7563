//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, CorsConfig, CreditScalingKind, LogFormat, LoggingConfig, PlannerConfig,
    ServerConfig, SessionConfig,
};
