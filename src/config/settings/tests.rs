use super::*;
use tempfile::TempDir;

#[test]
fn defaults_are_valid() {
    let config = Config {
        gemini: GeminiConfig::default(),
        chunking: ChunkingConfig::default(),
        base_dir: PathBuf::from("/tmp/pdf-chat-test"),
    };

    assert!(config.validate().is_ok());
    assert_eq!(config.gemini.embedding_model, "models/embedding-001");
    assert_eq!(config.gemini.generation_model, "models/gemini-pro");
    assert!((config.gemini.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.chunking.max_chunk_size, 10000);
    assert_eq!(config.chunking.overlap_size, 1000);
}

#[test]
fn missing_file_loads_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let config = Config::load(temp_dir.path()).expect("load should succeed");

    assert_eq!(config.gemini, GeminiConfig::default());
    assert_eq!(config.base_dir, temp_dir.path());
}

#[test]
fn save_and_load_round_trip() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let mut config = Config::load(temp_dir.path()).expect("load should succeed");
    config.gemini.batch_size = 32;
    config.chunking.max_chunk_size = 5000;
    config.chunking.overlap_size = 500;
    config.save().expect("save should succeed");

    let loaded = Config::load(temp_dir.path()).expect("reload should succeed");
    assert_eq!(loaded.gemini.batch_size, 32);
    assert_eq!(loaded.chunking.max_chunk_size, 5000);
    assert_eq!(loaded.chunking.overlap_size, 500);
}

#[test]
fn api_key_is_never_persisted() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let config = Config::load(temp_dir.path())
        .expect("load should succeed")
        .with_api_key(Some("secret-key".to_string()));
    config.save().expect("save should succeed");

    let content = std::fs::read_to_string(config.config_file_path()).expect("config file exists");
    assert!(!content.contains("secret-key"));

    let loaded = Config::load(temp_dir.path()).expect("reload should succeed");
    assert_eq!(loaded.gemini.api_key, None);
}

#[test]
fn overlap_must_be_smaller_than_max_chunk_size() {
    let mut config = Config {
        gemini: GeminiConfig::default(),
        chunking: ChunkingConfig {
            max_chunk_size: 1000,
            overlap_size: 1000,
            ..ChunkingConfig::default()
        },
        base_dir: PathBuf::new(),
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::OverlapTooLarge(1000, 1000))
    ));

    config.chunking.overlap_size = 999;
    assert!(config.validate().is_ok());
}

#[test]
fn invalid_service_settings_are_rejected() {
    let mut gemini = GeminiConfig {
        batch_size: 0,
        ..GeminiConfig::default()
    };
    assert!(matches!(
        gemini.validate(),
        Err(ConfigError::InvalidBatchSize(0))
    ));

    gemini = GeminiConfig {
        temperature: 2.5,
        ..GeminiConfig::default()
    };
    assert!(matches!(
        gemini.validate(),
        Err(ConfigError::InvalidTemperature(_))
    ));

    gemini = GeminiConfig {
        embedding_model: "  ".to_string(),
        ..GeminiConfig::default()
    };
    assert!(matches!(
        gemini.validate(),
        Err(ConfigError::InvalidModel(_))
    ));

    gemini = GeminiConfig {
        api_base: "not a url".to_string(),
        ..GeminiConfig::default()
    };
    assert!(matches!(gemini.validate(), Err(ConfigError::InvalidUrl(_))));
}

#[test]
fn index_path_is_under_the_base_dir() {
    let config = Config {
        gemini: GeminiConfig::default(),
        chunking: ChunkingConfig::default(),
        base_dir: PathBuf::from("/data/pdf-chat"),
    };

    assert_eq!(config.index_path(), PathBuf::from("/data/pdf-chat/vectors"));
}
