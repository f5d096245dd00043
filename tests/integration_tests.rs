use anyhow::Result;
use httpmock::prelude::*;
use property_relay::utils::error::ErrorCategory;
use property_relay::{
    Dispatcher, LocalStorage, MessagingCredentials, RelayConfig, RelayEngine, RelayError,
    SearchFilter, TwilioProvider,
};
use tempfile::TempDir;

const MESSAGES_PATH: &str = "/2010-04-01/Accounts/AC123/Messages.json";

const PUNE_DATASET: &str = "location,bhk,type,rent,furnishing,parking,contact,photos_link\n\
                            Pune,2 BHK,Apartment,20000,Semi,Yes,9999999999,http://x/1\n";

fn write_dataset(temp_dir: &TempDir, content: &str) -> Result<String> {
    let path = temp_dir.path().join("properties.csv");
    std::fs::write(&path, content)?;
    Ok(path.to_str().unwrap().to_string())
}

fn build_engine(
    dataset_path: String,
    base_url: String,
    credentials: MessagingCredentials,
) -> RelayEngine<LocalStorage, TwilioProvider> {
    let config = RelayConfig::default();
    let provider = TwilioProvider::new(base_url, credentials, Some(5));
    let dispatcher = Dispatcher::new(
        provider,
        config.provider.from_number.clone(),
        config.provider.channel_prefix.clone(),
    );
    RelayEngine::new(LocalStorage::default(), dataset_path, dispatcher)
}

#[tokio::test]
async fn test_end_to_end_relay_to_whatsapp() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = write_dataset(&temp_dir, PUNE_DATASET)?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(MESSAGES_PATH)
            .header_exists("authorization")
            .body_contains("From=whatsapp%3A%2B14155238886")
            .body_contains("To=whatsapp%3A%2B919999999999")
            .body_contains("2+BHK+Available+in+Pune");
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"sid": "SMe2e0001", "status": "queued"}));
    });

    let engine = build_engine(
        dataset_path,
        server.base_url(),
        MessagingCredentials::new("AC123", "token123"),
    );

    let filter = SearchFilter::new("Pune", "2 BHK");
    let preview = engine.preview(&filter).await?;
    assert!(preview.contains("2 BHK Available in Pune"));
    assert!(preview.contains("₹20000/month"));
    assert!(preview.contains("9999999999"));
    assert!(preview.contains("http://x/1"));

    let receipt = engine.relay(&filter, "+919999999999").await?;

    api_mock.assert();
    assert_eq!(receipt.message_id.as_str(), "SMe2e0001");
    assert_eq!(receipt.to, "whatsapp:+919999999999");
    Ok(())
}

#[tokio::test]
async fn test_not_found_never_dispatches() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = write_dataset(&temp_dir, PUNE_DATASET)?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(MESSAGES_PATH);
        then.status(201).json_body(serde_json::json!({"sid": "SM0001"}));
    });

    let engine = build_engine(
        dataset_path,
        server.base_url(),
        MessagingCredentials::new("AC123", "token123"),
    );

    let err = engine
        .relay(&SearchFilter::new("Pune", "3 BHK"), "+919999999999")
        .await
        .unwrap_err();

    api_mock.assert_hits(0);
    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert_eq!(err.to_string(), "No matching properties available");
    Ok(())
}

#[tokio::test]
async fn test_missing_dataset_is_load_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("nope.csv").to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(201).json_body(serde_json::json!({"sid": "SM0001"}));
    });

    let engine = build_engine(
        missing,
        server.base_url(),
        MessagingCredentials::new("AC123", "token123"),
    );

    let err = engine.filter_options().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Load);

    let err = engine
        .relay(&SearchFilter::new("Pune", "2 BHK"), "+919999999999")
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::DatasetError { .. }));
    assert!(err.user_friendly_message().starts_with("Error reading CSV"));

    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_empty_phone_is_validation_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = write_dataset(&temp_dir, PUNE_DATASET)?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(201).json_body(serde_json::json!({"sid": "SM0001"}));
    });

    let engine = build_engine(
        dataset_path,
        server.base_url(),
        MessagingCredentials::new("AC123", "token123"),
    );

    let err = engine
        .relay(&SearchFilter::new("Pune", "2 BHK"), "")
        .await
        .unwrap_err();

    api_mock.assert_hits(0);
    assert_eq!(err.category(), ErrorCategory::Validation);
    Ok(())
}

#[tokio::test]
async fn test_missing_credentials_surface_as_send_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = write_dataset(&temp_dir, PUNE_DATASET)?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(201).json_body(serde_json::json!({"sid": "SM0001"}));
    });

    let engine = build_engine(dataset_path, server.base_url(), MessagingCredentials::default());

    let err = engine
        .relay(&SearchFilter::new("Pune", "2 BHK"), "+919999999999")
        .await
        .unwrap_err();

    api_mock.assert_hits(0);
    assert_eq!(err.category(), ErrorCategory::Send);
    assert!(matches!(err, RelayError::MissingCredentialError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_provider_rejection_surfaces_detail() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = write_dataset(&temp_dir, PUNE_DATASET)?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(MESSAGES_PATH);
        then.status(401).json_body(serde_json::json!({
            "code": 20003,
            "message": "Authenticate",
            "more_info": "https://www.twilio.com/docs/errors/20003",
            "status": 401
        }));
    });

    let engine = build_engine(
        dataset_path,
        server.base_url(),
        MessagingCredentials::new("AC123", "wrong-token"),
    );

    let err = engine
        .relay(&SearchFilter::new("Pune", "2 BHK"), "+919999999999")
        .await
        .unwrap_err();

    // 不重試，只呼叫一次
    api_mock.assert_hits(1);
    assert_eq!(err.category(), ErrorCategory::Send);
    assert!(err.to_string().contains("Authenticate"));
    Ok(())
}

#[tokio::test]
async fn test_config_file_drives_engine() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = write_dataset(
        &temp_dir,
        "location,bhk,type,rent,furnishing,parking,contact,photos_link\n\
         Goa,1 BHK,Villa,50000,Full,Yes,5555555555,http://x/goa\n\
         Pune,2 BHK,Apartment,20000,Semi,Yes,9999999999,http://x/1\n",
    )?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(MESSAGES_PATH)
            .body_contains("From=whatsapp%3A%2B15550001111")
            .body_contains("To=whatsapp%3A%2B15551234567");
        then.status(201).json_body(serde_json::json!({"sid": "SMcfg"}));
    });

    let config_path = temp_dir.path().join("relay.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[dataset]
path = "{}"

[provider]
base_url = "{}"
from_number = "whatsapp:+15550001111"
"#,
            dataset_path.replace('\\', "/"),
            server.base_url()
        ),
    )?;

    let config = RelayConfig::from_file(&config_path)?;
    let provider = TwilioProvider::new(
        config.provider.base_url.clone(),
        MessagingCredentials::new("AC123", "token123"),
        config.provider.timeout_seconds,
    );
    let dispatcher = Dispatcher::new(
        provider,
        config.provider.from_number.clone(),
        config.provider.channel_prefix.clone(),
    );
    let engine = RelayEngine::new(
        LocalStorage::default(),
        config.dataset_path().to_string(),
        dispatcher,
    );

    let options = engine.filter_options().await?;
    assert_eq!(options.locations, vec!["Goa", "Pune"]);
    assert_eq!(options.bhks, vec!["1 BHK", "2 BHK"]);

    let receipt = engine
        .relay(&SearchFilter::new("GOA", "1 bhk"), "+15551234567")
        .await?;

    api_mock.assert();
    assert_eq!(receipt.message_id.as_str(), "SMcfg");
    Ok(())
}
