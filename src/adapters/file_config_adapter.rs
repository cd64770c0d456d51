//! INI file configuration adapter.

use crate::domain::error::SwingError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SwingError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| SwingError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SwingError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SwingError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::config_port::read_parsed;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[data]
dir = /var/lib/bars

[strategy]
name = Laws of Swing
assets = AAPL
sma_fast = 10
proximity_tolerance = 0.01
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/var/lib/bars".to_string())
        );
        assert_eq!(
            adapter.get_string("strategy", "name"),
            Some("Laws of Swing".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("strategy", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn read_parsed_present_and_absent() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(read_parsed(&adapter, "strategy", "sma_fast", 0usize, "a count").unwrap(), 10);
        assert_eq!(read_parsed(&adapter, "strategy", "sma_slow", 50usize, "a count").unwrap(), 50);
        assert_eq!(
            read_parsed(&adapter, "strategy", "proximity_tolerance", 0.5f64, "a number").unwrap(),
            0.01
        );
    }

    #[test]
    fn read_parsed_rejects_garbage() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]
min_bars = -1
position_size = big
")
                .unwrap();
        let err = read_parsed(&adapter, "strategy", "min_bars", 50usize, "a count").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config value [strategy] min_bars: expected a count, got \"-1\""
        );
        assert!(read_parsed(&adapter, "strategy", "position_size", 0.2f64, "a number").is_err());
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("strategy", "assets"),
            Some("AAPL".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/swing.ini");
        match result {
            Err(SwingError::ConfigParse { file, .. }) => {
                assert_eq!(file, "/nonexistent/path/swing.ini")
            }
            _ => panic!("expected ConfigParse error"),
        }
    }
}
