use recall::config::ServiceConfig;
use recall::explain::ExplanationClient;
use recall::{ErrorKind, RecallError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve a single canned HTTP response and hand back the raw request
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let base_url = format!("http://{}", listener.local_addr().unwrap());

  let handle = tokio::spawn(async move {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
      let n = socket.read(&mut chunk).await.unwrap();
      if n == 0 {
        break;
      }
      request.extend_from_slice(&chunk[..n]);
      if request_complete(&request) {
        break;
      }
    }

    let response = format!(
      "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
      body.len()
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.unwrap();

    String::from_utf8_lossy(&request).to_string()
  });

  (base_url, handle)
}

fn request_complete(request: &[u8]) -> bool {
  let text = String::from_utf8_lossy(request);
  let Some(header_end) = text.find("\r\n\r\n") else {
    return false;
  };

  let content_length = text[..header_end]
    .lines()
    .find_map(|line| {
      let (name, value) = line.split_once(':')?;
      name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
    })
    .unwrap_or(0);

  request.len() >= header_end + 4 + content_length
}

fn client_for(base_url: &str) -> ExplanationClient {
  ExplanationClient::new(&ServiceConfig { base_url: base_url.to_string(), timeout_secs: 5 }).unwrap()
}

#[cfg(test)]
mod explanation_client_tests {
  use super::*;

  #[tokio::test]
  async fn test_explain_posts_prompt_and_decodes_answer() {
    let (base_url, server) = serve_once(
      "200 OK",
      r#"{"explanation":"TCP is a reliable transport protocol.","analogy":"Coming soon...","codeSnippet":"Coming soon...","difficulty":"intermediate"}"#,
    )
    .await;

    let answer = client_for(&base_url).explain("What is TCP?").await.unwrap();
    assert_eq!(answer.explanation, "TCP is a reliable transport protocol.");
    assert_eq!(answer.code_snippet.as_deref(), Some("Coming soon..."));
    assert_eq!(answer.difficulty.as_deref(), Some("intermediate"));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/chat"));
    assert!(request.contains(r#"{"message":"What is TCP?"}"#));
  }

  #[tokio::test]
  async fn test_optional_fields_may_be_missing() {
    let (base_url, _server) = serve_once("200 OK", r#"{"explanation":"Short answer."}"#).await;

    let answer = client_for(&base_url).explain("Anything").await.unwrap();
    assert_eq!(answer.explanation, "Short answer.");
    assert!(answer.analogy.is_none());
  }

  #[tokio::test]
  async fn test_server_error_is_service_failure() {
    let (base_url, _server) =
      serve_once("500 Internal Server Error", r#"{"detail":"GROQ API key not configured"}"#).await;

    let err = client_for(&base_url).explain("What is TCP?").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert!(err.to_string().contains("500"));
  }

  #[tokio::test]
  async fn test_empty_explanation_is_rejected() {
    let (base_url, _server) = serve_once("200 OK", r#"{"explanation":"   "}"#).await;

    let err = client_for(&base_url).explain("What is TCP?").await.unwrap_err();
    assert!(matches!(err, RecallError::InvalidServiceResponse { .. }));
  }

  #[tokio::test]
  async fn test_empty_prompt_is_rejected_without_a_request() {
    let client = client_for("http://127.0.0.1:9");
    let err = client.explain("  ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
  }

  #[tokio::test]
  async fn test_health_check() {
    let (base_url, server) =
      serve_once("200 OK", r#"{"status":"online","api_key_configured":true}"#).await;

    let health = client_for(&format!("{base_url}/")).health().await.unwrap();
    assert_eq!(health.status, "online");
    assert!(health.api_key_configured);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/health"));
  }
}
