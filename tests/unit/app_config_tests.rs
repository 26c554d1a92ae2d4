/*!
 * Tests for application configuration functionality
 */

use subcue::app_config::{AdjustmentConfig, BoundaryStrategy, Config, LogLevel, SegmentationConfig};
use subcue::SubtitleFormat;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.language, None);
    assert_eq!(config.output_format, SubtitleFormat::Vtt);
    assert_eq!(config.boundaries, BoundaryStrategy::Rules);
    assert_eq!(config.segmentation.max_width, 42);
    assert_eq!(config.segmentation.max_lines, 2);
    assert!(!config.segmentation.punctuation_only);
    assert_eq!(config.segmentation.comma_split_threshold, 7);
    assert_eq!(config.adjustment.buffer_seconds, 0.2);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.language = Some("xx".to_string());
    assert!(config.validate().is_err());
    config.language = Some("fra".to_string());
    assert!(config.validate().is_ok());

    config.segmentation = SegmentationConfig {
        max_lines: 4,
        ..SegmentationConfig::default()
    };
    assert!(config.validate().is_err());
    config.segmentation.max_lines = 3;
    config.segmentation.max_width = 0;
    assert!(config.validate().is_err());
    config.segmentation = SegmentationConfig::default();
    config.segmentation.comma_split_threshold = 0;
    assert!(config.validate().is_err());
    config.segmentation = SegmentationConfig::default();

    config.adjustment = AdjustmentConfig { buffer_seconds: -0.5 };
    assert!(config.validate().is_err());
    config.adjustment.buffer_seconds = f64::NAN;
    assert!(config.validate().is_err());
    config.adjustment.buffer_seconds = 0.0;
    assert!(config.validate().is_ok());
}

/// Test that the serialized default config reads back unchanged
#[test]
fn test_config_serialization_shouldRoundTrip() {
    let config = Config {
        language: Some("fr".to_string()),
        output_format: SubtitleFormat::Srt,
        boundaries: BoundaryStrategy::Punctuation,
        ..Config::default()
    };

    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains("\"output_format\": \"srt\""));
    assert!(json.contains("\"boundaries\": \"punctuation\""));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

/// Test boundary strategy names
#[test]
fn test_boundary_strategy_names_shouldMatchConfigValues() {
    assert_eq!(BoundaryStrategy::Rules.to_string(), "rules");
    assert_eq!(BoundaryStrategy::Punctuation.to_string(), "punctuation");
    let parsed: BoundaryStrategy = serde_json::from_str("\"punctuation\"").unwrap();
    assert_eq!(parsed, BoundaryStrategy::Punctuation);
    assert!(serde_json::from_str::<BoundaryStrategy>("\"nlp\"").is_err());
}
