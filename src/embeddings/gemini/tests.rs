use super::*;
use crate::config::GeminiConfig;

fn test_config() -> GeminiConfig {
    GeminiConfig {
        api_key: Some("test-key".to_string()),
        api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        embedding_model: "models/embedding-001".to_string(),
        generation_model: "models/gemini-pro".to_string(),
        embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
        batch_size: 16,
        temperature: 0.3,
    }
}

#[test]
fn client_configuration() {
    let client = GeminiClient::new(&test_config()).expect("Failed to create client");

    assert_eq!(client.embedding_model, "models/embedding-001");
    assert_eq!(client.generation_model, "models/gemini-pro");
    assert_eq!(client.batch_size, 16);
    assert_eq!(
        client.base_url.host_str(),
        Some("generativelanguage.googleapis.com")
    );
}

#[test]
fn missing_api_key_is_a_configuration_error() {
    let config = GeminiConfig {
        api_key: None,
        ..test_config()
    };

    let result = GeminiClient::new(&config);
    assert!(matches!(result, Err(PdfChatError::Config(_))));
}

#[test]
fn endpoint_urls() {
    let client = GeminiClient::new(&test_config()).expect("Failed to create client");

    let url = client
        .endpoint(&client.embedding_model, "embedContent")
        .expect("valid endpoint");
    assert_eq!(
        url.as_str(),
        "https://generativelanguage.googleapis.com/v1beta/models/embedding-001:embedContent"
    );

    let url = client
        .endpoint(&client.generation_model, "generateContent")
        .expect("valid endpoint");
    assert_eq!(
        url.as_str(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
    );
}

#[test]
fn embed_request_shape() {
    let request = EmbedContentRequest {
        model: "models/embedding-001".to_string(),
        content: Content {
            parts: vec![Part {
                text: "hello".to_string(),
            }],
        },
    };

    let value = serde_json::to_value(&request).expect("serializes");
    assert_eq!(value["model"], "models/embedding-001");
    assert_eq!(value["content"]["parts"][0]["text"], "hello");
}

#[test]
fn generate_request_uses_camel_case_generation_config() {
    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: "prompt".to_string(),
            }],
        }],
        generation_config: GenerationConfig { temperature: 0.3 },
    };

    let value = serde_json::to_value(&request).expect("serializes");
    assert!((value["generationConfig"]["temperature"].as_f64().expect("is a number") - 0.3).abs() < 1e-6);
}

#[test]
fn embedding_response_parsing() {
    let response: EmbedContentResponse =
        serde_json::from_str(r#"{"embedding":{"values":[0.1,0.2,0.3]}}"#).expect("parses");
    assert_eq!(response.embedding.values, vec![0.1, 0.2, 0.3]);
}

#[test]
fn generation_response_parsing() {
    let response: GenerateContentResponse = serde_json::from_str(
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"an answer"}]}}]}"#,
    )
    .expect("parses");

    let text: String = response
        .candidates
        .expect("candidates present")
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .expect("text present");
    assert_eq!(text, "an answer");
}
