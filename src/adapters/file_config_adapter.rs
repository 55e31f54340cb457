//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_usize(&self, section: &str, key: &str, default: usize) -> usize {
        self.config
            .getuint(section, key)
            .ok()
            .flatten()
            .map(|v| v as usize)
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

/// Config source that only ever supplies defaults, used when no config
/// file is given.
pub struct DefaultConfig;

impl ConfigPort for DefaultConfig {
    fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
        None
    }

    fn get_usize(&self, _section: &str, _key: &str, default: usize) -> usize {
        default
    }

    fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[analysis]
sma_window = 10
volatility_threshold = 3.5

[chart]
output = custom.svg
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();

        assert_eq!(adapter.get_usize("analysis", "sma_window", 20), 10);
        assert_eq!(adapter.get_double("analysis", "volatility_threshold", 2.0), 3.5);
        assert_eq!(
            adapter.get_string("chart", "output"),
            Some("custom.svg".to_string())
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string("[analysis]\n").unwrap();

        assert_eq!(adapter.get_string("analysis", "missing"), None);
        assert_eq!(adapter.get_usize("analysis", "missing", 20), 20);
        assert_eq!(adapter.get_double("missing_section", "key", 2.0), 2.0);
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[analysis]\nsma_window = abc\n").unwrap();

        assert_eq!(adapter.get_usize("analysis", "sma_window", 20), 20);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[chart]\noutput = /tmp/out.svg\n").unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("chart", "output"),
            Some("/tmp/out.svg".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/stocklens.ini").is_err());
    }

    #[test]
    fn default_config_supplies_defaults() {
        assert_eq!(DefaultConfig.get_string("analysis", "sma_window"), None);
        assert_eq!(DefaultConfig.get_usize("analysis", "sma_window", 20), 20);
        assert_eq!(DefaultConfig.get_double("analysis", "volatility_threshold", 2.0), 2.0);
    }
}
