use log::{debug, info};
use std::sync::Arc;
use tokio::fs;
use yaml_rust::YamlLoader;

use crate::configs::config::{Config, MetricConfig};
use crate::configs::csv::CsvFormat;
use crate::configs::definition::{MetricDefinition, ValueType};
use crate::configs::units::MeasureUnit;
use crate::error::{Error, Result};
use crate::managers::parser::ParserChain;
use crate::managers::repository::MetricRepository;
use crate::workers::formatter::CsvFormatter;
use crate::workers::reader::CsvEventReader;

/// Loads the configuration and builds the repository, reader and formatter
/// it describes.
pub struct ConfigManager {
    parsers: ParserChain,
    config: Option<Config>,
    repository: Arc<MetricRepository>
}

impl ConfigManager {
    pub fn new(parsers: ParserChain) -> Self {
        Self {
            parsers,
            config: None,
            repository: Arc::new(MetricRepository::new())
        }
    }

    pub async fn start(self, config_file_name: &str) -> Result<Self> {
        info!("Loading config {:?}", config_file_name);
        let config_file = fs::read_to_string(config_file_name).await?;
        self.load(&config_file)
    }

    pub fn load(mut self, config_str: &str) -> Result<Self> {
        let documents = YamlLoader::load_from_str(config_str)
            .map_err(|e| Error::Config(e.to_string().into()))?;
        let document = documents.first().ok_or_else(|| Error::Config("empty configuration".into()))?;
        let config = Config::new(document)?;
        let mut repository = MetricRepository::new();
        for metric in &config.metrics {
            repository.add_definition(self.definition(metric)?);
        }
        info!("Loaded {} metric definitions from {} sources", config.metrics.len(), repository.sources().len());
        self.repository = Arc::new(repository);
        self.config = Some(config);
        Ok(self)
    }

    fn definition(&self, metric: &MetricConfig) -> Result<MetricDefinition> {
        let mut definition = self.parsers.parse(&metric.definition)?;
        if let Some(ref label) = metric.label {
            definition = definition.with_label(label);
        }
        if let Some(ref description) = metric.description {
            definition = definition.with_description(description);
        }
        if let Some(ref unit) = metric.unit {
            definition = definition.with_unit(MeasureUnit::parse(unit)?);
        }
        if let Some(ref value_type) = metric.value_type {
            definition = definition.with_value_type(ValueType::parse(value_type)?);
        }
        debug!("Loaded metric definition {}", definition);
        Ok(definition)
    }

    fn config(&self) -> Result<&Config> {
        self.config.as_ref().ok_or_else(|| Error::Config("configuration not loaded".into()))
    }

    pub fn repository(&self) -> Arc<MetricRepository> {
        self.repository.clone()
    }

    pub fn reader(&self) -> Result<CsvEventReader> {
        Ok(CsvEventReader::new(CsvFormat::new(&self.config()?.input.format)?))
    }

    pub fn formatter(&self) -> Result<CsvFormatter> {
        let output = &self.config()?.output;
        let mut formatter = CsvFormatter::new().with_repository(self.repository());
        if let Some(ref format) = output.format {
            formatter.set_output_format(format);
        }
        if output.header {
            formatter.set_header_on();
        }
        formatter.set_ignore_faults(output.ignore_faults);
        Ok(formatter)
    }
}
