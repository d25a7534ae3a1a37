use anyhow::{anyhow, Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::VitalsError;
use crate::ranges::validate_spec;
use crate::translate::Language;
use crate::types::{Config, VitalSpec};

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let vitals_config_path = non_empty(env.get_var("VITALS_CONFIG")).map(PathBuf::from);

    let language: Language = match non_empty(env.get_var("VITALS_LANGUAGE")) {
        Some(v) => v.parse().context("Invalid VITALS_LANGUAGE")?,
        None => Language::default(),
    };

    let cycles: u32 = env.get_var("VITALS_CYCLES")
        .unwrap_or_else(|| "1".to_string())
        .trim()
        .parse()
        .context("Invalid VITALS_CYCLES")?;
    if cycles == 0 {
        return Err(anyhow!("VITALS_CYCLES must be at least 1"));
    }

    let seed = non_empty(env.get_var("VITALS_SEED"))
        .map(|v| v.parse::<u64>())
        .transpose()
        .context("Invalid VITALS_SEED")?;

    let slack_webhook_url = non_empty(env.get_var("SLACK_WEBHOOK_URL"));
    let monitor_name = non_empty(env.get_var("MONITOR_NAME"));

    let exit_on_alert = env.get_var("EXIT_ON_ALERT")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false);

    Ok(Config {
        vitals_config_path,
        language,
        cycles,
        seed,
        slack_webhook_url,
        monitor_name,
        exit_on_alert,
    })
}

/// Validated, immutable set of vital specs.
///
/// Built once at startup and shared by reference; cloning only bumps a
/// reference count.
#[derive(Debug, Clone)]
pub struct VitalsConfig {
    specs: Arc<[VitalSpec]>,
}

impl VitalsConfig {
    pub fn new(specs: Vec<VitalSpec>) -> Result<Self, VitalsError> {
        if specs.is_empty() {
            return Err(VitalsError::EmptyConfiguration);
        }
        let mut seen = HashSet::new();
        for spec in &specs {
            validate_spec(spec)?;
            if !seen.insert(spec.name.as_str()) {
                return Err(VitalsError::DuplicateVital {
                    vital: spec.name.clone(),
                });
            }
        }
        Ok(Self {
            specs: specs.into(),
        })
    }

    pub fn specs(&self) -> &[VitalSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&VitalSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            specs: default_vitals().into(),
        }
    }
}

pub fn default_vitals() -> Vec<VitalSpec> {
    vec![
        VitalSpec::bounded("temperature", 95.0, 102.0)
            .with_unit("°F")
            .with_message("Temperature is out of range."),
        VitalSpec::bounded("pulseRate", 60.0, 100.0)
            .with_unit("bpm")
            .with_message("Pulse rate is out of range."),
        VitalSpec::bounded("spo2", 90.0, 100.0)
            .with_unit("%")
            .with_message("Oxygen saturation is out of range."),
    ]
}

/// Parse a JSON array of vital specs and validate it.
pub fn parse_vitals_json(json: &str) -> Result<VitalsConfig> {
    let specs: Vec<VitalSpec> = serde_json::from_str(json).context("Malformed vitals JSON")?;
    Ok(VitalsConfig::new(specs)?)
}

pub fn load_vitals_file(path: &Path) -> Result<VitalsConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vitals config {}", path.display()))?;
    parse_vitals_json(&raw).with_context(|| format!("Invalid vitals config {}", path.display()))
}

/// Vital specs from `VITALS_CONFIG`, or the built-in defaults.
pub fn load_vitals(cfg: &Config) -> Result<VitalsConfig> {
    match &cfg.vitals_config_path {
        Some(path) => {
            debug!("loading vitals from {}", path.display());
            load_vitals_file(path)
        }
        None => Ok(VitalsConfig::default()),
    }
}
