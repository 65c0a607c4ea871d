//! 클라이언트 설정 구조체.
//!
//! 페이지 URL, 보고 주기, 재연결 정책, 버퍼 정책 등 런타임 설정을 정의한다.
//! 라이브러리 크레이트이므로 파일/환경변수 로딩은 임베딩 애플리케이션의 몫.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 최상위 클라이언트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 텔레메트리를 발생시키는 페이지의 URL (예: "https://example.com/docs/intro")
    pub page_url: String,
    /// 보고 주기 (밀리초)
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,
    /// 재연결 정책
    #[serde(default)]
    pub reconnect: ReconnectConfig,
    /// 버퍼 정책
    #[serde(default)]
    pub buffer: BufferConfig,
}

impl ClientConfig {
    /// 기본값으로 설정 생성
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            report_interval_ms: default_report_interval_ms(),
            reconnect: ReconnectConfig::default(),
            buffer: BufferConfig::default(),
        }
    }

    /// 보고 주기를 Duration으로 반환
    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}

// ============================================================
// 재연결 정책
// ============================================================

/// 재연결 정책 — 기본값은 지연 없는 즉시 재연결.
///
/// `initial_delay_ms`가 0이면 매 시도마다 지연 없이 재연결한다.
/// 0보다 크면 실패할 때마다 지연을 2배로 늘리되 `max_delay_ms`에서 상한.
///
/// 지연은 연결이 열리는 순간 0으로 초기화된다. 핸드셰이크는 받아 주고
/// 곧바로 닫는 백엔드를 상대하면 매 사이클이 `initial_delay_ms`부터
/// 다시 시작한다는 뜻이다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconnectConfig {
    /// 첫 재연결 지연 (밀리초, 0 = 즉시 재연결)
    #[serde(default)]
    pub initial_delay_ms: u64,
    /// 재연결 지연 상한 (밀리초)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 0,
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl ReconnectConfig {
    /// 첫 재연결 지연을 Duration으로 반환
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// 재연결 지연 상한을 Duration으로 반환
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// 다음 재연결 지연 계산 (capped exponential)
    pub fn next_delay(&self, current: Duration) -> Duration {
        if self.initial_delay_ms == 0 {
            return Duration::ZERO;
        }
        if current.is_zero() {
            return self.initial_delay();
        }
        (current * 2).min(self.max_delay())
    }
}

// ============================================================
// 버퍼 정책
// ============================================================

/// 버퍼 초과 시 폐기 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// 가장 오래된 측정을 버림 (장애 중에는 최신 데이터가 더 유용)
    #[default]
    DropOldest,
    /// 새로 들어오는 측정을 버림
    DropNewest,
}

/// 버퍼 정책 — 용량 상한과 초과 시 폐기 방식.
///
/// 기본값은 무제한. 연결이 장기간 닫혀 있으면 버퍼가 무한히 자랄 수 있으므로
/// 운영 환경에서는 용량 설정을 권장한다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BufferConfig {
    /// 버퍼 용량 (측정 개수, None = 무제한)
    #[serde(default)]
    pub capacity: Option<usize>,
    /// 용량 초과 시 폐기 정책
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_report_interval_ms() -> u64 {
    5_000
}

fn default_max_delay_ms() -> u64 {
    30_000
}
