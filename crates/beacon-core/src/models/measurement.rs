//! 측정 모델.
//!
//! 메트릭 레코드 하나, 관측 입력의 정규화, 타임스탬프가 찍힌 측정 배치를 정의.
//! 와이어 필드명은 백엔드 규약에 맞춰 대문자 canonical 형태(`Key`/`Value`)를 쓴다.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 메트릭 레코드 — 정규화가 끝난 canonical 형태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// 메트릭 식별자
    #[serde(rename = "Key")]
    pub key: String,
    /// 메트릭 값 (숫자 또는 구조화된 값)
    #[serde(rename = "Value")]
    pub value: serde_json::Value,
}

impl MetricRecord {
    /// 새 메트릭 레코드 생성
    pub fn new(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 관측 입력 레코드 — canonical(`Key`/`Value`)과 소문자 별칭(`key`/`value`)을
/// 모두 허용한다. 계측 코드가 어느 표기를 쓰든 버퍼에는 canonical 형태만 저장된다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetric {
    /// canonical 키
    #[serde(rename = "Key")]
    pub key: Option<String>,
    /// 소문자 별칭 키
    #[serde(rename = "key")]
    pub key_alias: Option<String>,
    /// canonical 값
    #[serde(rename = "Value")]
    pub value: Option<serde_json::Value>,
    /// 소문자 별칭 값
    #[serde(rename = "value")]
    pub value_alias: Option<serde_json::Value>,
}

impl RawMetric {
    /// 소문자 별칭 표기로 입력 레코드 생성 (계측 코드의 일반적인 형태)
    pub fn new(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key_alias: Some(key.into()),
            value_alias: Some(value.into()),
            ..Self::default()
        }
    }

    /// canonical 형태로 정규화.
    ///
    /// canonical 필드가 있으면 그대로, 없으면 별칭에서 복사한다.
    /// 두 표기 모두 없으면 `Validation` 에러 — 반쪽짜리 레코드를 조용히
    /// 흘려보내는 대신 즉시 실패한다.
    pub fn normalize(self) -> Result<MetricRecord, CoreError> {
        let key = self
            .key
            .or(self.key_alias)
            .ok_or_else(|| CoreError::Validation {
                field: "Key".to_string(),
                message: "canonical/별칭 키가 모두 없음".to_string(),
            })?;
        let value = self
            .value
            .or(self.value_alias)
            .ok_or_else(|| CoreError::Validation {
                field: "Value".to_string(),
                message: "canonical/별칭 값이 모두 없음".to_string(),
            })?;
        Ok(MetricRecord { key, value })
    }
}

/// 관측 배치 하나 — 버퍼 진입 시점의 타임스탬프와 정규화된 메트릭 목록.
///
/// 타임스탬프는 flush 시점이 아니라 `observe` 호출 시점에 찍힌다.
/// 중복 레코드는 병합하지 않고 삽입 순서 그대로 보존한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// 수집 시각 (epoch 밀리초)
    #[serde(rename = "Timestamp")]
    pub timestamp: i64,
    /// 메트릭 목록 (삽입 순서 유지)
    #[serde(rename = "Metrics")]
    pub metrics: Vec<MetricRecord>,
}

impl Measurement {
    /// 현재 시각으로 측정 생성
    pub fn now(metrics: Vec<MetricRecord>) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis(),
            metrics,
        }
    }
}
