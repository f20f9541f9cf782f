//! Configuration loading and validation tests

use prc_infrastructure::config::ConfigLoader;
use prc_infrastructure::logging::parse_log_level;
use tempfile::TempDir;
use tracing::Level;

#[test]
fn defaults_load_without_any_sources() {
    let config = ConfigLoader::new().load().unwrap();
    assert_eq!(config.rag.chunk_size, 1000);
    assert_eq!(config.rag.chunk_overlap, 150);
    assert_eq!(config.rag.top_k, 5);
    assert_eq!(config.rag.collection_name, "product_knowledge");
    assert_eq!(config.research.timeout_secs, 120);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json_format);
}

#[test]
fn toml_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[rag]
chunk_size = 500
chunk_overlap = 50
top_k = 3

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
    assert_eq!(config.rag.chunk_size, 500);
    assert_eq!(config.rag.chunk_overlap, 50);
    assert_eq!(config.rag.top_k, 3);
    assert_eq!(config.logging.level, "debug");
    // Untouched sections keep their defaults.
    assert_eq!(config.rag.collection_name, "product_knowledge");
    assert_eq!(config.llm.model, "gpt-4o-mini");
}

#[test]
fn environment_overrides_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[rag]\ntop_k = 3\n").unwrap();

    // Unique prefix keeps this test independent of the others.
    unsafe {
        std::env::set_var("PRCTESTA_RAG__TOP_K", "9");
    }
    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("PRCTESTA")
        .load()
        .unwrap();
    unsafe {
        std::env::remove_var("PRCTESTA_RAG__TOP_K");
    }
    assert_eq!(config.rag.top_k, 9);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap();
    assert_eq!(config.rag.chunk_size, 1000);
}

#[test]
fn overlap_not_smaller_than_chunk_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[rag]\nchunk_size = 100\nchunk_overlap = 100\n").unwrap();

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("overlap"));
}

#[test]
fn zero_chunk_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[rag]\nchunk_size = 0\n").unwrap();
    assert!(ConfigLoader::new().with_config_path(&path).load().is_err());
}

#[test]
fn invalid_log_level_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();
    assert!(ConfigLoader::new().with_config_path(&path).load().is_err());
}

#[test]
fn log_levels_parse_case_insensitively() {
    assert_eq!(parse_log_level("TRACE").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("Debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    assert!(parse_log_level("verbose").is_err());
}
