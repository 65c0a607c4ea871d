//! # beacon-core
//!
//! Beacon 텔레메트리 클라이언트의 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 전송 계층과 무관한 핵심 타입을 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 측정/프로토콜 메시지 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — 전송 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 클라이언트 설정 구조체

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
