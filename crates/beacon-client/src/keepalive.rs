//! 최소 변형 — keep-alive 전용 클라이언트.
//!
//! 버퍼도 리포터도 없다. 연결이 열려 있는 동안 고정 ping 메시지를 주기적으로
//! 보내고, 끊기면 타이머를 멈추고 재연결한다. 세션 ID와 엔드포인트 유도는
//! 전체 클라이언트와 같은 규칙을 쓴다.

use std::time::Duration;

use beacon_core::config::ClientConfig;
use beacon_core::error::CoreError;
use beacon_core::models::message::SessionMessage;
use beacon_core::ports::transport::SessionTransport;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::endpoint::session_endpoint;
use crate::session::SessionId;
use crate::ws_transport::{WsEvent, WsTransport};

/// keep-alive 클라이언트
pub struct KeepAliveClient {
    config: ClientConfig,
    endpoint: String,
    session_id: SessionId,
    /// 매번 동일한 ping 프레임 — 생성 시 한 번 직렬화
    ping_frame: String,
}

impl KeepAliveClient {
    /// 새 keep-alive 클라이언트 생성
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let endpoint = session_endpoint(&config.page_url)?;
        let session_id = SessionId::generate();
        let ping_frame = serde_json::to_string(&SessionMessage::ping(session_id.as_str()))?;
        Ok(Self {
            config,
            endpoint,
            session_id,
            ping_frame,
        })
    }

    /// 세션 식별자
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// 유도된 세션 엔드포인트 URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 연결 → 주기 ping → 재연결 루프
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "keep-alive 클라이언트 시작: session={}, endpoint={}",
            self.session_id, self.endpoint
        );
        let mut delay = Duration::ZERO;

        loop {
            // 핸드셰이크 중에도 종료 신호에 반응한다
            let connected = tokio::select! {
                result = WsTransport::connect(&self.endpoint) => result,
                _ = shutdown_rx.changed() => return,
            };

            match connected {
                Ok((transport, mut events)) => {
                    info!("연결 열림: {}", self.endpoint);
                    delay = Duration::ZERO;
                    let mut interval = tokio::time::interval(self.config.report_interval());

                    loop {
                        tokio::select! {
                            _ = interval.tick() => {
                                if let Err(e) = transport.send_text(&self.ping_frame).await {
                                    warn!("ping 실패: {e}");
                                    break;
                                }
                                debug!("ping 전송");
                            }
                            event = events.recv() => match event {
                                Some(WsEvent::Text(_)) => {}
                                Some(WsEvent::Closed) | None => {
                                    warn!("연결 끊김 — 재연결 시도");
                                    break;
                                }
                            },
                            _ = shutdown_rx.changed() => {
                                info!("종료 신호 — keep-alive 클라이언트 정지");
                                return;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("연결 실패: {e}");
                }
            }

            if *shutdown_rx.borrow() {
                return;
            }

            delay = self.config.reconnect.next_delay(delay);
            if !delay.is_zero() {
                debug!("재연결 대기: {}ms", delay.as_millis());
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = shutdown_rx.changed() => return,
                }
            }
        }
    }
}
