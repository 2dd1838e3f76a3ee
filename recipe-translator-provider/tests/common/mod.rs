//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use recipe_translator_provider::{
    Ingredient, ProviderCredentials, ProviderOptions, TranslatableContent, TranslationProvider,
    create_provider,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试上下文
pub struct TestContext {
    pub provider: Arc<dyn TranslationProvider>,
}

impl TestContext {
    /// 创建 OpenAI 测试上下文（`OPENAI_MODEL` / `OPENAI_BASE_URL` 可选）
    pub fn openai() -> Option<Self> {
        let api_key = env::var("OPENAI_API_KEY").ok()?;
        let options = ProviderOptions {
            model: env::var("OPENAI_MODEL").ok(),
            base_url: env::var("OPENAI_BASE_URL").ok(),
            max_retries: 2,
        };
        let provider = create_provider(ProviderCredentials::Openai { api_key, options }).ok()?;
        Some(Self { provider })
    }

    /// 创建 Anthropic 测试上下文（`ANTHROPIC_MODEL` 可选）
    pub fn anthropic() -> Option<Self> {
        let api_key = env::var("ANTHROPIC_API_KEY").ok()?;
        let options = ProviderOptions {
            model: env::var("ANTHROPIC_MODEL").ok(),
            base_url: None,
            max_retries: 2,
        };
        let provider =
            create_provider(ProviderCredentials::Anthropic { api_key, options }).ok()?;
        Some(Self { provider })
    }
}

/// A small Spanish recipe used by the live tests.
pub fn tortilla_ingredients() -> TranslatableContent {
    TranslatableContent::Ingredients(vec![
        Ingredient::new("patatas", 4_u32, ""),
        Ingredient::new("huevos", 6_u32, ""),
        Ingredient::new("aceite de oliva", "1/2", "taza"),
    ])
}

pub fn tortilla_steps() -> TranslatableContent {
    TranslatableContent::Instructions(vec![
        "Pela y corta las patatas en láminas finas.".to_string(),
        "Fríe las patatas a fuego medio hasta que estén tiernas.".to_string(),
        "Bate los huevos, mezcla con las patatas y cuaja la tortilla por ambos lados.".to_string(),
    ])
}

// ============ 本地 HTTP 桩 ============

/// A canned HTTP response served by [`StubServer`].
#[derive(Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Local HTTP/1.1 server answering each connection with the next canned
/// response (the last one repeats). Counts requests.
pub struct StubServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    pub async fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let response = responses[n.min(responses.len() - 1)].clone();
                tokio::spawn(async move {
                    read_request(&mut socket).await;
                    let reply = format!(
                        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        response.status,
                        response.body.len(),
                        response.body
                    );
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Drain one request (headers plus `Content-Length` body).
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= header_end + 4 + content_length {
            return;
        }
    }
}
