//! 보고 루프.
//!
//! tick마다 버퍼를 checkpoint로 snapshot해 record 메시지를 만들고(비었으면
//! heartbeat), 전송이 발행된 뒤에만 해당 prefix를 commit한다. 전송 실패 시
//! 버퍼는 건드리지 않고 루프를 끝낸다 — 다음 연결의 리포터가 이어받는다.

use std::sync::Arc;
use std::time::Duration;

use beacon_core::error::CoreError;
use beacon_core::models::message::{MessageKind, SessionMessage};
use beacon_core::ports::transport::SessionTransport;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::event_buffer::EventBuffer;
use crate::session::SessionId;

/// 보고 루프 — 연결 하나당 리포터 하나
pub struct Reporter {
    buffer: Arc<EventBuffer>,
    session_id: SessionId,
    transport: Arc<dyn SessionTransport>,
    interval: Duration,
}

impl Reporter {
    /// 새 리포터 생성
    pub fn new(
        buffer: Arc<EventBuffer>,
        session_id: SessionId,
        transport: Arc<dyn SessionTransport>,
        interval: Duration,
    ) -> Self {
        Self {
            buffer,
            session_id,
            transport,
            interval,
        }
    }

    /// tick 하나 수행.
    ///
    /// commit은 전송이 발행된 뒤에만 — snapshot 이후 들어온 측정은 다음
    /// tick까지 버퍼에 남는다.
    pub async fn tick(&self) -> Result<MessageKind, CoreError> {
        let (checkpoint, snapshot) = self.buffer.snapshot();

        let msg = if checkpoint == 0 {
            SessionMessage::heartbeat(self.session_id.as_str())
        } else {
            SessionMessage::record(self.session_id.as_str(), snapshot)
        };
        let kind = msg.full_name;

        let text = serde_json::to_string(&msg)?;
        self.transport.send_text(&text).await?;

        if checkpoint > 0 {
            self.buffer.commit(checkpoint);
            debug!("측정 {checkpoint}개 보고");
        }

        Ok(kind)
    }

    /// 주기 보고 루프.
    ///
    /// 첫 tick은 즉시(연결이 열리는 순간) 발행된다. 전송 실패 또는
    /// `closed_rx` 신호로 종료하며, 종료 후에는 절대 재스케줄하지 않는다 —
    /// 죽은 연결에 대고 도는 루프는 없다.
    pub async fn run(&self, mut closed_rx: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.tick().await {
                        warn!("보고 실패, 루프 종료: {e}");
                        break;
                    }
                }
                _ = closed_rx.changed() => {
                    debug!("연결 종료 신호 — 보고 루프 종료");
                    break;
                }
            }
        }
    }
}
