//! OpenAI Provider 测试
//!
//! 本地桩测试默认运行；真实 API 测试需要:
//! ```bash
//! OPENAI_API_KEY=xxx \
//!     cargo test -p recipe-translator-provider --test openai_test -- --ignored --nocapture
//! ```

mod common;

use common::{StubResponse, StubServer, TestContext, tortilla_ingredients, tortilla_steps};
use recipe_translator_provider::{
    Amount, Ingredient, Language, OpenaiProvider, ProviderError, ProviderOptions,
    TranslatableContent, TranslationProvider, TranslationRequest,
};

fn chat_answer(text: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": text } }]
    })
    .to_string()
}

fn stub_provider(server: &StubServer, max_retries: u32) -> OpenaiProvider {
    OpenaiProvider::new(
        "sk-test".to_string(),
        ProviderOptions {
            model: Some("gpt-test".to_string()),
            base_url: Some(format!("{}/v1", server.base_url)),
            max_retries,
        },
    )
}

// ============ 本地桩测试 ============

#[tokio::test]
async fn stub_translates_ingredients_keeping_amounts() {
    let server = StubServer::start(vec![StubResponse::ok(chat_answer(
        r#"[{"name":"potatoes","amount":4,"unit":""},{"name":"eggs","amount":6,"unit":""},{"name":"olive oil","amount":"1/2","unit":"cup"}]"#,
    ))])
    .await;
    let provider = stub_provider(&server, 0);

    let req = TranslationRequest::new(tortilla_ingredients(), Language::Es, Language::En);
    let out = provider.translate(&req).await.unwrap();

    let TranslatableContent::Ingredients(items) = out else {
        panic!("expected ingredients, got {out:?}");
    };
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].name, "olive oil");
    // unit comes from the source, not the model
    assert_eq!(items[2].unit, "taza");
    assert_eq!(items[2].amount, Amount::from("1/2"));
}

#[tokio::test]
async fn stub_non_json_answer_is_parse_error() {
    let server = StubServer::start(vec![StubResponse::ok(chat_answer(
        "Sure! Potatoes, eggs and olive oil.",
    ))])
    .await;
    let provider = stub_provider(&server, 0);

    let req = TranslationRequest::new(tortilla_ingredients(), Language::Es, Language::En);
    let err = provider.translate(&req).await.unwrap_err();
    assert!(matches!(err, ProviderError::ParseError { .. }), "{err:?}");
}

#[tokio::test]
async fn stub_invalid_key_maps_to_invalid_credentials() {
    let server = StubServer::start(vec![StubResponse::status(
        401,
        r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#,
    )])
    .await;
    let provider = stub_provider(&server, 3);

    let req = TranslationRequest::new(
        TranslatableContent::Text("Tortilla de patatas".to_string()),
        Language::Es,
        Language::En,
    );
    let err = provider.translate(&req).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    // not retried
    assert_eq!(server.hits(), 1);
    assert!(!provider.validate_credentials().await.unwrap());
}

#[tokio::test]
async fn stub_retries_gateway_errors() {
    let server = StubServer::start(vec![
        StubResponse::status(502, "bad gateway"),
        StubResponse::ok(chat_answer("Spanish omelette")),
    ])
    .await;
    let provider = stub_provider(&server, 2);

    let req = TranslationRequest::new(
        TranslatableContent::Text("Tortilla de patatas".to_string()),
        Language::Es,
        Language::En,
    );
    let out = provider.translate(&req).await.unwrap();
    assert_eq!(out, TranslatableContent::Text("Spanish omelette".to_string()));
    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn stub_missing_choice_is_parse_error() {
    let server = StubServer::start(vec![StubResponse::ok(r#"{"choices":[]}"#)]).await;
    let provider = stub_provider(&server, 0);

    let req = TranslationRequest::new(
        TranslatableContent::Instructions(vec!["Bate los huevos.".to_string()]),
        Language::Es,
        Language::En,
    );
    let err = provider.translate(&req).await.unwrap_err();
    assert!(matches!(err, ProviderError::ParseError { .. }));
}

// ============ 真实 API 测试 ============

#[tokio::test]
#[ignore]
async fn test_openai_validate_credentials() {
    skip_if_no_credentials!("OPENAI_API_KEY");

    let ctx = TestContext::openai().expect("创建测试上下文失败");
    let valid = require_ok!(ctx.provider.validate_credentials().await);
    assert!(valid, "凭证应该有效");
}

#[tokio::test]
#[ignore]
async fn test_openai_translate_name_to_english() {
    skip_if_no_credentials!("OPENAI_API_KEY");

    let ctx = TestContext::openai().expect("创建测试上下文失败");
    let req = TranslationRequest::new(
        TranslatableContent::Text("Tortilla de patatas".to_string()),
        Language::Es,
        Language::En,
    );
    let out = require_ok!(ctx.provider.translate(&req).await);
    let TranslatableContent::Text(name) = out else {
        panic!("expected text");
    };
    assert!(!name.is_empty());
    println!("✓ name: {name}");
}

#[tokio::test]
#[ignore]
async fn test_openai_translate_lists_keep_length() {
    skip_if_no_credentials!("OPENAI_API_KEY");

    let ctx = TestContext::openai().expect("创建测试上下文失败");
    for content in [tortilla_ingredients(), tortilla_steps()] {
        let len = content.len();
        let req = TranslationRequest::new(content, Language::Es, Language::En);
        let out = require_ok!(ctx.provider.translate(&req).await);
        assert_eq!(out.len(), len);
    }
}

#[tokio::test]
#[ignore]
async fn test_openai_spanish_output_is_castilian() {
    skip_if_no_credentials!("OPENAI_API_KEY");

    let ctx = TestContext::openai().expect("创建测试上下文失败");
    let req = TranslationRequest::new(
        TranslatableContent::Ingredients(vec![
            Ingredient::new("potatoes", 4_u32, ""),
            Ingredient::new("peach juice", 1_u32, "cup"),
        ]),
        Language::En,
        Language::Es,
    );
    let out = require_ok!(ctx.provider.translate(&req).await);
    let text = out.to_json().to_string().to_lowercase();
    assert!(text.contains("patata"), "{text}");
    assert!(!text.contains("papa"), "{text}");
}
