//! 세션 식별자.
//!
//! 클라이언트 생성 시 한 번 발급되고 모든 메시지의 `ID` 필드로 쓰인다.
//! 새로 발급받는 방법은 클라이언트를 새로 만드는 것뿐 — 재연결로는 안 바뀐다.

use uuid::Uuid;

/// 세션 식별자 (불변)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    /// 새 세션 식별자 발급
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// 문자열 참조
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn display_matches_as_str() {
        let id = SessionId::generate();
        assert_eq!(id.to_string(), id.as_str());
    }
}
