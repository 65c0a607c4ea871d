//! 세션 엔드포인트 유도.
//!
//! 페이지 URL에서 백엔드 WebSocket URL을 만든다. 보안 페이지(https/wss)는
//! wss로 올라가고 포트가 없으면 명시적 `:443`을 붙인다. 경로는 고정
//! 세션 prefix 뒤에 페이지 자신의 경로를 이어 붙여 백엔드가 세션과
//! 페이지를 연관지을 수 있게 한다.

use beacon_core::error::CoreError;
use url::Url;

/// 세션 경로 prefix
pub const SESSION_PREFIX: &str = "/_session";

/// 페이지 URL → 세션 WebSocket URL
pub fn session_endpoint(page_url: &str) -> Result<String, CoreError> {
    let url = Url::parse(page_url)
        .map_err(|e| CoreError::Config(format!("잘못된 페이지 URL '{page_url}': {e}")))?;

    let secure = match url.scheme() {
        "https" | "wss" => true,
        "http" | "ws" => false,
        other => {
            return Err(CoreError::Config(format!(
                "지원하지 않는 스킴 '{other}' (http/https/ws/wss만 허용)"
            )))
        }
    };
    let scheme = if secure { "wss" } else { "ws" };

    let host = url
        .host_str()
        .ok_or_else(|| CoreError::Config(format!("호스트 없는 페이지 URL: {page_url}")))?;

    // 페이지에 명시된 포트는 그대로, 보안 페이지에 포트가 없으면 명시적 :443
    let port = match url.port() {
        Some(p) => format!(":{p}"),
        None if secure => ":443".to_string(),
        None => String::new(),
    };

    Ok(format!("{scheme}://{host}{port}{SESSION_PREFIX}{}", url.path()))
}
