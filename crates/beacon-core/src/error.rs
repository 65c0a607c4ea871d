//! Beacon 핵심 에러 타입.
//!
//! 연결 실패는 내부 재연결 루프가 처리하므로 호출자에게 노출되지 않는다.
//! 이 타입은 모듈 경계(포트, 설정, 직렬화)에서만 사용된다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 유효성 검증 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류 (잘못된 페이지 URL 등)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 네트워크 에러 (핸드셰이크 실패, 전송 실패)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 이미 닫힌 연결에 대한 전송 시도
    #[error("연결이 닫힘")]
    ConnectionClosed,
}
