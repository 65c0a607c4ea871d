//! 세션 전송 포트.
//!
//! 리포터는 이 trait에만 의존한다. 실제 WebSocket 어댑터는 beacon-client에,
//! 테스트 더블은 각 테스트 모듈에 둔다.

use async_trait::async_trait;

use crate::error::CoreError;

/// 세션 전송 포트 — 열린 연결로 텍스트 프레임 하나를 보낸다.
///
/// 전송은 fire-and-forget: 서버 응답을 기다리지 않으며, 성공 반환은
/// 프레임이 소켓에 쓰였다는 뜻일 뿐 도착을 보장하지 않는다.
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// 텍스트 프레임 전송. 연결이 이미 닫혔으면 `ConnectionClosed`.
    async fn send_text(&self, text: &str) -> Result<(), CoreError>;
}
