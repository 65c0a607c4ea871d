//! 전체 텔레메트리 클라이언트.
//!
//! 연결 수립 → 보고 루프 가동 → 종료 감지 → 재연결의 상태 기계를 돈다.
//! 버퍼와 세션 ID는 클라이언트 소유라 재연결을 넘어 살아남고,
//! 리포터는 연결마다 새로 만들어져 죽은 연결에 남는 루프가 없다.

use std::sync::Arc;
use std::time::Duration;

use beacon_core::config::ClientConfig;
use beacon_core::error::CoreError;
use beacon_core::ports::transport::SessionTransport;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::endpoint::session_endpoint;
use crate::event_buffer::EventBuffer;
use crate::observe::TelemetryHandle;
use crate::reporter::Reporter;
use crate::session::SessionId;
use crate::ws_transport::{ConnectionState, WsEvent, WsTransport};

/// 텔레메트리 클라이언트
pub struct TelemetryClient {
    config: ClientConfig,
    endpoint: String,
    session_id: SessionId,
    buffer: Arc<EventBuffer>,
    state_tx: watch::Sender<ConnectionState>,
    state_rx: watch::Receiver<ConnectionState>,
}

impl TelemetryClient {
    /// 새 클라이언트 생성.
    ///
    /// 엔드포인트는 여기서 즉시 유도한다 — 잘못된 페이지 URL은 런타임이
    /// 아니라 생성 시점에 `Config` 에러로 드러난다.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let endpoint = session_endpoint(&config.page_url)?;
        let buffer = Arc::new(EventBuffer::new(config.buffer.clone()));
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        Ok(Self {
            config,
            endpoint,
            session_id: SessionId::generate(),
            buffer,
            state_tx,
            state_rx,
        })
    }

    /// 계측 코드에 나눠줄 관측 핸들
    pub fn handle(&self) -> TelemetryHandle {
        TelemetryHandle::new(self.buffer.clone())
    }

    /// 세션 식별자
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// 유도된 세션 엔드포인트 URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 연결 상태 변경 수신기 생성
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// 재연결 상태 기계.
    ///
    /// 종료 신호가 올 때까지 영원히 재시도한다. 연결 실패/종료는 호출자에게
    /// 에러로 올라가지 않는다 — 장애 중 쌓인 측정은 버퍼에 남아 다음 연결의
    /// 첫 tick에 전송된다.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "텔레메트리 클라이언트 시작: session={}, endpoint={}",
            self.session_id, self.endpoint
        );
        let mut delay = Duration::ZERO;

        loop {
            let _ = self.state_tx.send(ConnectionState::Connecting);

            // 핸드셰이크 중에도 종료 신호에 반응한다
            let connected = tokio::select! {
                result = WsTransport::connect(&self.endpoint) => result,
                _ = shutdown_rx.changed() => {
                    let _ = self.state_tx.send(ConnectionState::Closed);
                    return;
                }
            };

            match connected {
                Ok((transport, mut events)) => {
                    info!("연결 열림: {}", self.endpoint);
                    let _ = self.state_tx.send(ConnectionState::Open);
                    // 연결이 열리면 backoff 초기화 — 열리자마자 닫히는
                    // 백엔드라면 다음 지연도 initial부터 다시 시작한다
                    delay = Duration::ZERO;

                    let transport: Arc<dyn SessionTransport> = Arc::new(transport);
                    let reporter = Reporter::new(
                        self.buffer.clone(),
                        self.session_id.clone(),
                        transport,
                        self.config.report_interval(),
                    );
                    let (closed_tx, closed_rx) = watch::channel(false);
                    let mut reporter_task =
                        tokio::spawn(async move { reporter.run(closed_rx).await });

                    loop {
                        tokio::select! {
                            event = events.recv() => match event {
                                Some(WsEvent::Text(text)) => {
                                    debug!("백엔드 메시지 수신: {text}");
                                }
                                Some(WsEvent::Closed) | None => {
                                    warn!("연결 끊김 — 재연결 시도");
                                    break;
                                }
                            },
                            _ = &mut reporter_task => {
                                // 전송 실패로 리포터가 먼저 끝난 경우
                                warn!("보고 루프 종료 — 재연결 시도");
                                break;
                            }
                            _ = shutdown_rx.changed() => {
                                let _ = closed_tx.send(true);
                                reporter_task.abort();
                                let _ = self.state_tx.send(ConnectionState::Closed);
                                info!("종료 신호 — 텔레메트리 클라이언트 정지");
                                return;
                            }
                        }
                    }

                    let _ = closed_tx.send(true);
                    reporter_task.abort();
                }
                Err(e) => {
                    warn!("연결 실패: {e}");
                }
            }

            let _ = self.state_tx.send(ConnectionState::Closed);
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
