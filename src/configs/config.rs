use log::debug;
use yaml_rust::Yaml;

use crate::configs::terms::common;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct MetricConfig {
    pub definition: Box<str>,
    pub label: Option<Box<str>>,
    pub description: Option<Box<str>>,
    pub unit: Option<Box<str>>,
    pub value_type: Option<Box<str>>
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputConfig {
    pub format: Box<str>
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputConfig {
    pub format: Option<Box<str>>,
    pub header: bool,
    pub ignore_faults: bool
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub metrics: Vec<MetricConfig>,
    pub input: InputConfig,
    pub output: OutputConfig
}

impl MetricConfig {
    /// Either a bare definition string or a hash with a `definition` key.
    pub fn new(config: &Yaml) -> Option<Self> {
        match config {
            Yaml::String(definition) => {
                debug!("Loading metric: {:?}", definition);
                Some(Self {
                    definition: definition.as_str().into(),
                    label: None,
                    description: None,
                    unit: None,
                    value_type: None
                })
            },
            Yaml::Hash(_) => {
                debug!("Loading metric: {:?}", config[common::DEFINITION].as_str()?);
                Some(Self {
                    definition: config[common::DEFINITION].as_str()?.into(),
                    label: config[common::LABEL].as_str().map(|s| s.into()),
                    description: config[common::DESCRIPTION].as_str().map(|s| s.into()),
                    unit: config[common::UNIT].as_str().map(|s| s.into()),
                    value_type: config[common::TYPE].as_str().map(|s| s.into())
                })
            },
            _ => None
        }
    }
}

impl OutputConfig {
    pub fn new(config: &Yaml) -> Self {
        match config {
            Yaml::Hash(_) => Self {
                format: config[common::FORMAT].as_str().map(|s| s.into()),
                header: config[common::HEADER].as_bool().unwrap_or(false),
                ignore_faults: config[common::IGNORE_FAULTS].as_bool().unwrap_or(false)
            },
            _ => Self::default()
        }
    }
}

impl Config {
    pub fn new(config: &Yaml) -> Result<Self> {
        let mut metrics = Vec::new();
        match config[common::METRICS] {
            Yaml::Array(ref metrics_yaml) => {
                debug!("Loading metrics");
                for metric_yaml in metrics_yaml {
                    match MetricConfig::new(metric_yaml) {
                        Some(metric) => metrics.push(metric),
                        None => return Err(Error::Config(format!("invalid metric entry {:?}", metric_yaml).into()))
                    }
                }
                debug!("Loading metrics done");
            },
            Yaml::BadValue => {},
            _ => return Err(Error::Config("\"metrics\" must be a list".into()))
        };
        let input = match config[common::INPUT][common::FORMAT].as_str() {
            Some(format) => InputConfig { format: format.into() },
            None => return Err(Error::Config("missing input format".into()))
        };
        Ok(Self {
            metrics,
            input,
            output: OutputConfig::new(&config[common::OUTPUT])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    const CONFIG: &str = "
metrics:
  - jmx://localhost:1099/java.lang:type=Memory/HeapMemoryUsage
  - definition: jbosscli://localhost:9999/subsystem=web/connector=http/requestCount
    label: HTTP requests
    unit: ms
    type: long
input:
  format: \"timestamp(time:MM/dd/yy HH:mm:ss), heap(long), requests(long)\"
output:
  format: \"timestamp, heap, requests\"
  header: true
";

    #[test]
    fn config_test() {
        let yaml = YamlLoader::load_from_str(CONFIG).unwrap();
        let config = Config::new(&yaml[0]).unwrap();
        assert_eq!(config.metrics.len(), 2);
        assert_eq!(config.metrics[0].label, None);
        assert_eq!(config.metrics[1].label.as_deref(), Some("HTTP requests"));
        assert_eq!(config.metrics[1].value_type.as_deref(), Some("long"));
        assert_eq!(&*config.input.format, "timestamp(time:MM/dd/yy HH:mm:ss), heap(long), requests(long)");
        assert_eq!(config.output.format.as_deref(), Some("timestamp, heap, requests"));
        assert!(config.output.header);
        assert!(!config.output.ignore_faults);
    }

    #[test]
    fn missing_input_test() {
        let yaml = YamlLoader::load_from_str("metrics: []").unwrap();
        assert!(matches!(Config::new(&yaml[0]).unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn invalid_metric_test() {
        let yaml = YamlLoader::load_from_str("metrics:\n  - 12\ninput:\n  format: a, b").unwrap();
        assert!(Config::new(&yaml[0]).is_err());
        let yaml = YamlLoader::load_from_str("metrics: x\ninput:\n  format: a, b").unwrap();
        assert!(Config::new(&yaml[0]).is_err());
    }

    #[test]
    fn defaults_test() {
        let yaml = YamlLoader::load_from_str("input:\n  format: a, b").unwrap();
        let config = Config::new(&yaml[0]).unwrap();
        assert!(config.metrics.is_empty());
        assert_eq!(config.output, OutputConfig::default());
    }
}
