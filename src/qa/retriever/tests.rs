use super::*;
use crate::config::GeminiConfig;
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread")]
async fn retrieving_before_any_build_is_an_index_not_found_error() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config = GeminiConfig {
        api_key: Some("test-key".to_string()),
        ..GeminiConfig::default()
    };
    let client = GeminiClient::new(&config).expect("client should build");
    let retriever = Retriever::new(client, temp_dir.path().join("vectors"));

    let error = retriever
        .retrieve("what is this about?", DEFAULT_TOP_K)
        .await
        .err()
        .expect("retrieve should fail");

    assert!(matches!(error, PdfChatError::IndexNotFound(_)));
    assert!(error.to_string().contains("process documents first"));
}
