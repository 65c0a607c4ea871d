//! 세션 프로토콜 메시지.
//!
//! 클라이언트 → 백엔드로 가는 JSON 텍스트 프레임.
//! 하트비트는 `Data` 필드가 아예 없어야 하므로 `skip_serializing_if`로 생략한다.

use serde::{Deserialize, Serialize};

use super::measurement::Measurement;

/// 메시지 종류 태그 (와이어에서는 `FullName` 필드, 소문자)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// 보낼 측정이 없을 때의 생존 신호
    Heartbeat,
    /// 측정 배치 전송
    Record,
    /// 최소 변형(keep-alive) 전용 핑
    Ping,
}

/// 세션 메시지 — 모든 프레임은 세션 ID와 종류 태그를 싣는다
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMessage {
    /// 세션 식별자 (페이지 수명 동안 불변)
    #[serde(rename = "ID")]
    pub id: String,
    /// 메시지 종류
    #[serde(rename = "FullName")]
    pub full_name: MessageKind,
    /// 측정 데이터 (record일 때만 존재)
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Measurement>>,
}

impl SessionMessage {
    /// 하트비트 메시지 생성
    pub fn heartbeat(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: MessageKind::Heartbeat,
            data: None,
        }
    }

    /// 측정 배치 메시지 생성
    pub fn record(id: impl Into<String>, data: Vec<Measurement>) -> Self {
        Self {
            id: id.into(),
            full_name: MessageKind::Record,
            data: Some(data),
        }
    }

    /// 핑 메시지 생성 (최소 변형)
    pub fn ping(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: MessageKind::Ping,
            data: None,
        }
    }
}
