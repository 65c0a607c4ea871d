//! 공개 관측 API.
//!
//! 계측 코드가 쓰는 유일한 진입점. 레코드를 정규화해 버퍼에 넣을 뿐
//! 네트워크를 건드리지 않는다 — 호출은 절대 블로킹되지 않는다.

use std::sync::Arc;

use beacon_core::error::CoreError;
use beacon_core::models::measurement::{Measurement, RawMetric};

use crate::event_buffer::EventBuffer;

/// 관측 입력 배치
#[derive(Debug, Clone, Default)]
pub struct ObserveBatch {
    /// 메트릭 레코드 목록 (canonical 또는 별칭 표기)
    pub metrics: Vec<RawMetric>,
}

impl From<Vec<RawMetric>> for ObserveBatch {
    fn from(metrics: Vec<RawMetric>) -> Self {
        Self { metrics }
    }
}

/// 관측 핸들 — 값싸게 복제해 계측 코드 곳곳에 나눠줄 수 있다
#[derive(Clone)]
pub struct TelemetryHandle {
    buffer: Arc<EventBuffer>,
}

impl TelemetryHandle {
    pub(crate) fn new(buffer: Arc<EventBuffer>) -> Self {
        Self { buffer }
    }

    /// 메트릭 배치를 보고 대기열에 올린다.
    ///
    /// 측정의 타임스탬프는 이 호출 시점에 찍힌다(전송 시점이 아님).
    /// 레코드 하나라도 정규화에 실패하면 배치 전체를 거부하고 아무것도
    /// 추가하지 않는다. O(k), k = 메트릭 개수.
    pub fn observe(&self, batch: impl Into<ObserveBatch>) -> Result<(), CoreError> {
        let batch = batch.into();
        let metrics = batch
            .metrics
            .into_iter()
            .map(RawMetric::normalize)
            .collect::<Result<Vec<_>, _>>()?;
        self.buffer.push(Measurement::now(metrics));
        Ok(())
    }
}
