/*!
 * Tests for the provider implementations
 */

use humaniser::device::Device;
use humaniser::errors::ProviderError;
use humaniser::providers::mock::MockProvider;
use humaniser::providers::ollama::{GenerationOptions, GenerationRequest, Ollama};
use humaniser::providers::{GenerationParams, Provider};

/// Test the Ollama provider against a live server
#[tokio::test]
#[ignore]
async fn test_ollama_provider_withRunningServer_shouldParaphrase() {
    // This test should only run if a server and model are provided
    let url = std::env::var("OLLAMA_URL").unwrap_or_default();
    let model = std::env::var("OLLAMA_PARAPHRASE_MODEL").unwrap_or_default();
    if url.is_empty() || model.is_empty() {
        return;
    }

    let client = Ollama::from_url(url, model);
    client.test_connection().await.unwrap();

    let request = client.build_request("paraphrase: The weather is nice today. </s>", &GenerationParams::default());
    let response = client.complete(request).await.unwrap();
    assert!(!Ollama::extract_text(&response).trim().is_empty());
}

/// The request body matches the generate API shape
#[test]
fn test_ollama_request_shouldSerializeRawNonStreaming() {
    let client = Ollama::from_url("http://localhost:11434/", "t5-paraphrase");
    let request = client.build_request("paraphrase: Hi. </s>", &GenerationParams::default());
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], "t5-paraphrase");
    assert_eq!(json["prompt"], "paraphrase: Hi. </s>");
    assert_eq!(json["stream"], false);
    assert_eq!(json["raw"], true);
    assert_eq!(json["keep_alive"], "-1");
    assert_eq!(json["options"]["top_k"], 120);
    assert_eq!(json["options"]["num_predict"], 256);
    assert_eq!(json["options"]["stop"][0], "</s>");
    assert!(json["options"].get("temperature").is_none());
}

/// Unset options are left out of the body
#[test]
fn test_generationRequest_withoutOptions_shouldOmitThem() {
    let json = serde_json::to_value(GenerationRequest::new("m", "p")).unwrap();
    assert!(json.get("options").is_none());
    assert!(json.get("raw").is_none());
    assert!(json.get("keep_alive").is_none());
}

/// Accelerated devices leave layer offload to the backend
#[test]
fn test_generationOptions_accelerated_shouldOmitGpuLayers() {
    let params = GenerationParams {
        seed: Some(9),
        stop_sequences: Vec::new(),
        ..Default::default()
    };
    let options = GenerationOptions::from_params(&params, Device::Accelerated);
    assert_eq!(options.num_gpu, None);
    assert_eq!(options.seed, Some(9));
    assert_eq!(options.stop, None);
}

/// The mock counts requests across clones
#[tokio::test]
async fn test_mockProvider_clones_shouldShareCounters() {
    let provider = MockProvider::working();
    let clone = provider.clone();

    let request = clone.build_request("paraphrase: A. </s>", &GenerationParams::default());
    let response = clone.complete(request).await.unwrap();

    assert_eq!(MockProvider::extract_text(&response), "<pad> A. </s>");
    assert_eq!(provider.request_count(), 1);
    assert_eq!(provider.received().len(), 1);
}

/// Failure modes of the mock
#[tokio::test]
async fn test_mockProvider_failureModes_shouldBehaveAsNamed() {
    let failing = MockProvider::failing();
    assert!(failing.test_connection().await.is_err());
    let request = failing.build_request("x", &GenerationParams::default());
    assert!(matches!(
        failing.complete(request).await,
        Err(ProviderError::ApiError { .. })
    ));

    let intermittent = MockProvider::intermittent(3);
    let mut outcomes = Vec::new();
    for _ in 0..6 {
        let request = intermittent.build_request("x", &GenerationParams::default());
        outcomes.push(intermittent.complete(request).await.is_ok());
    }
    assert_eq!(outcomes, vec![true, true, false, true, true, false]);

    let working = MockProvider::working();
    assert!(working.test_connection().await.is_ok());
    assert!(working.warm_up().await.is_ok());
}
