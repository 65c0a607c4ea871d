//! 포트 인터페이스.

pub mod transport;
