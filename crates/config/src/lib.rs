//! LP AUM Configuration
//!
//! Configuration management and startup logging for the LP AUM aggregator.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	ChainConfig, ConfigValidationError, LogFormat, PriceFeedKind, ReportFormat, Settings,
	StaticPrice,
};
pub use startup_logger::{log_configuration, log_run_complete, log_service_info};
