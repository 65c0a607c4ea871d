//! 도메인 데이터 구조체.

pub mod measurement;
pub mod message;
