// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod ranges;
pub mod notify;
pub mod translate;
pub mod sensor;
pub mod evaluator;
pub mod report;
pub mod slack;

// Re-export commonly used items
pub use types::*;
pub use error::VitalsError;
pub use config::{
    default_vitals, load_config, load_config_with_env, load_vitals, load_vitals_file,
    parse_vitals_json, EnvironmentProvider, MockEnvironment, SystemEnvironment, VitalsConfig,
};
pub use ranges::{classify, is_in_range, spec_in_range, validate_spec};
pub use notify::{CollectingNotifier, CollectingSink, ConsoleNotifier, Notifier, StatusSink, TracingSink};
pub use translate::{translate, Language, TranslatingNotifier};
pub use sensor::{FixedSensor, SensorSource, SimulatedSensor};
pub use evaluator::{evaluate, report, Monitor};
pub use report::{MonitorReport, ReportSummary, VitalTally};
pub use slack::{build_slack_payload, send_to_slack};
