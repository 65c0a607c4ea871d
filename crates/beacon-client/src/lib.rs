//! # beacon-client
//!
//! WebSocket 텔레메트리 클라이언트.
//! 관측 API로 들어온 메트릭을 메모리 버퍼에 쌓고, 백엔드와의 양방향 연결로
//! 주기적으로 flush한다(보낼 것이 없으면 하트비트). 연결이 끊기면 즉시
//! 재연결하며, 장애 중 쌓인 측정은 다음 연결에서 전송된다(at-least-once).
//!
//! ## 구조
//!
//! - [`event_buffer`] — 측정 버퍼 (checkpoint 기반 prefix drain)
//! - [`observe`] — 계측 코드용 공개 관측 API
//! - [`session`] — 세션 식별자
//! - [`endpoint`] — 페이지 URL → 세션 WebSocket URL 유도
//! - [`ws_transport`] — tokio-tungstenite 전송 어댑터
//! - [`reporter`] — 주기 보고 루프 (record/heartbeat)
//! - [`client`] — 전체 클라이언트 + 재연결 상태 기계
//! - [`keepalive`] — 버퍼 없는 최소 변형 (ping 전용)
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use beacon_client::client::TelemetryClient;
//! use beacon_core::config::ClientConfig;
//! use beacon_core::models::measurement::RawMetric;
//!
//! let client = TelemetryClient::new(ClientConfig::new("https://example.com/docs/"))?;
//! let handle = client.handle();
//! tokio::spawn(async move { client.run(shutdown_rx).await });
//!
//! handle.observe(vec![RawMetric::new("first_paint_ms", 132)].into())?;
//! ```

pub mod client;
pub mod endpoint;
pub mod event_buffer;
pub mod keepalive;
pub mod observe;
pub mod reporter;
pub mod session;
pub mod ws_transport;
