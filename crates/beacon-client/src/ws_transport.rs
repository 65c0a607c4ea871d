//! WebSocket 전송 어댑터.
//!
//! `tokio-tungstenite` 기반. 연결당 어댑터 하나 — 재연결은 새 어댑터를 만든다.

use std::sync::Arc;

use beacon_core::error::CoreError;
use beacon_core::ports::transport::SessionTransport;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// 연결 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// 핸드셰이크 진행 중
    Connecting,
    /// 연결 열림 — 보고 루프 가동
    Open,
    /// 연결 닫힘 — 재연결 대기
    Closed,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Open => write!(f, "Open"),
            ConnectionState::Closed => write!(f, "Closed"),
        }
    }
}

/// 수신 이벤트
#[derive(Debug, Clone)]
pub enum WsEvent {
    /// 백엔드가 보낸 텍스트 메시지
    Text(String),
    /// 연결 종료 (정상 close, 에러, EOF 모두)
    Closed,
}

/// WebSocket 전송 — 물리 연결 하나를 감싼다
pub struct WsTransport {
    write: Arc<tokio::sync::Mutex<SplitSink<WsStream, Message>>>,
}

impl WsTransport {
    /// 핸드셰이크 수행 후 전송기와 수신 이벤트 채널을 반환.
    ///
    /// 수신 루프는 별도 태스크로 돌며 연결이 죽으면 `WsEvent::Closed`를 보낸다.
    pub async fn connect(url: &str) -> Result<(Self, mpsc::Receiver<WsEvent>), CoreError> {
        let (ws_stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| CoreError::Network(format!("WebSocket 연결 실패: {e}")))?;

        let (write, read) = ws_stream.split();
        let (tx, rx) = mpsc::channel(64);

        // 수신 태스크 — 연결 종료 감지용
        tokio::spawn(Self::read_loop(read, tx));

        Ok((
            Self {
                write: Arc::new(tokio::sync::Mutex::new(write)),
            },
            rx,
        ))
    }

    /// 수신 루프
    async fn read_loop(mut read: SplitStream<WsStream>, tx: mpsc::Sender<WsEvent>) {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if tx.send(WsEvent::Text(text.to_string())).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {} // Ping/Pong/Binary는 자동 처리
                Err(e) => {
                    warn!("WebSocket 수신 에러: {e}");
                    break;
                }
            }
        }
        // 수신측이 이미 사라졌으면 무시
        let _ = tx.send(WsEvent::Closed).await;
        debug!("WebSocket 수신 루프 종료");
    }
}

#[async_trait::async_trait]
impl SessionTransport for WsTransport {
    async fn send_text(&self, text: &str) -> Result<(), CoreError> {
        let mut write = self.write.lock().await;
        write.send(Message::text(text)).await.map_err(|e| {
            // open 확인과 send 사이에 닫힌 race — 호출측은 버퍼를 drain하면 안 된다
            warn!("WebSocket 전송 실패: {e}");
            CoreError::ConnectionClosed
        })
    }
}
