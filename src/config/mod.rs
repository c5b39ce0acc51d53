//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<TrackpadConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: TrackpadConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
midi:
  port: Trackpad
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.midi.port.as_deref(), Some("Trackpad"));
        assert_eq!(config.midi.cc, 1);
        assert_eq!(config.output.rate_hz, 60.0);
    }

    #[test]
    fn test_load_example_config() {
        let yaml = include_str!("../../miditrackpad.example.yaml");
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config, TrackpadConfig {
            midi: MidiSettings {
                port: Some("Trackpad".to_string()),
                ..MidiSettings::default()
            },
            ..TrackpadConfig::default()
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let yaml = r#"
mapping:
  deadzone: 900
  max_pressure: 400
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/miditrackpad.yaml"));
        assert!(result.is_err());
    }
}
