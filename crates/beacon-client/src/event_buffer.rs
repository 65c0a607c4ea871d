//! 이벤트 버퍼.
//!
//! 측정을 삽입 순서대로 보관하고, 리포터가 checkpoint 기반으로 prefix만
//! drain한다. commit은 전송이 발행된 뒤에만 호출되므로 전송 도중 들어온
//! 측정은 다음 tick까지 버퍼에 남는다.
//!
//! 용량 상한이 있으면 DropOldest가 전송 중인 prefix 요소를 밀어낼 수 있다.
//! 밀려난 개수를 snapshot 시점부터 세어 두고 commit에서 그만큼 덜 지운다 —
//! commit이 지우는 것은 언제나 snapshot에 실렸던 요소뿐이다.

use std::collections::VecDeque;

use beacon_core::config::{BufferConfig, OverflowPolicy};
use beacon_core::models::measurement::Measurement;
use parking_lot::Mutex;
use tracing::{debug, warn};

struct Inner {
    queue: VecDeque<Measurement>,
    /// 마지막 snapshot prefix 중 아직 큐 앞쪽에 남아 있는 개수
    reserved: usize,
    /// 마지막 snapshot 이후 DropOldest가 prefix에서 밀어낸 개수
    evicted: usize,
}

/// 측정 버퍼 — 클라이언트당 하나, `Arc`로 공유
pub struct EventBuffer {
    inner: Mutex<Inner>,
    config: BufferConfig,
}

impl EventBuffer {
    /// 새 버퍼 생성
    pub fn new(config: BufferConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                queue: VecDeque::new(),
                reserved: 0,
                evicted: 0,
            }),
            config,
        }
    }

    /// 측정 추가. 용량 상한이 설정돼 있으면 폐기 정책을 적용한다.
    pub fn push(&self, measurement: Measurement) {
        let mut inner = self.inner.lock();
        if let Some(capacity) = self.config.capacity {
            if inner.queue.len() >= capacity {
                match self.config.overflow {
                    OverflowPolicy::DropOldest => {
                        inner.queue.pop_front();
                        if inner.reserved > 0 {
                            // 전송 중인 prefix 요소가 밀려났다 — commit이 알아야 한다
                            inner.reserved -= 1;
                            inner.evicted += 1;
                        }
                        warn!("버퍼 용량 초과 ({capacity}) — 가장 오래된 측정 폐기");
                    }
                    OverflowPolicy::DropNewest => {
                        warn!("버퍼 용량 초과 ({capacity}) — 새 측정 폐기");
                        return;
                    }
                }
            }
        }
        inner.queue.push_back(measurement);
        debug!("측정 추가, 현재 버퍼 크기: {}", inner.queue.len());
    }

    /// 현재 버퍼 길이를 checkpoint로 잡고 그 prefix를 복제해 반환.
    ///
    /// 버퍼 자체는 변경하지 않는다 — 전송이 성공한 뒤 `commit`으로만 제거.
    pub fn snapshot(&self) -> (usize, Vec<Measurement>) {
        let mut inner = self.inner.lock();
        let checkpoint = inner.queue.len();
        inner.reserved = checkpoint;
        inner.evicted = 0;
        (checkpoint, inner.queue.iter().cloned().collect())
    }

    /// snapshot에 실렸던 prefix를 제거. snapshot 이후 들어온 측정과,
    /// 폐기 정책으로 이미 밀려난 자리의 측정은 건드리지 않는다.
    pub fn commit(&self, checkpoint: usize) {
        let mut inner = self.inner.lock();
        let n = checkpoint
            .saturating_sub(inner.evicted)
            .min(inner.queue.len());
        inner.queue.drain(..n);
        inner.reserved = 0;
        inner.evicted = 0;
        debug!("측정 {n}개 commit, 남은 버퍼 크기: {}", inner.queue.len());
    }

    /// 현재 버퍼 크기
    pub fn len(&self) -> usize {
        self.inner.lock().queue.len()
    }

    /// 버퍼가 비었는지
    pub fn is_empty(&self) -> bool {
        self.inner.lock().queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::models::measurement::MetricRecord;

    fn make_measurement(key: &str) -> Measurement {
        Measurement {
            timestamp: 0,
            metrics: vec![MetricRecord::new(key, 1)],
        }
    }

    #[test]
    fn snapshot_does_not_consume() {
        let buffer = EventBuffer::new(BufferConfig::default());
        buffer.push(make_measurement("a"));
        buffer.push(make_measurement("b"));

        let (checkpoint, snapshot) = buffer.snapshot();
        assert_eq!(checkpoint, 2);
        assert_eq!(snapshot.len(), 2);
        // snapshot만으로는 버퍼가 변하지 않는다
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn commit_removes_exactly_the_prefix() {
        let buffer = EventBuffer::new(BufferConfig::default());
        buffer.push(make_measurement("a"));
        buffer.push(make_measurement("b"));

        let (checkpoint, _) = buffer.snapshot();

        // 전송 도중 새 측정이 들어온 상황
        buffer.push(make_measurement("c"));

        buffer.commit(checkpoint);
        let (_, remaining) = buffer.snapshot();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].metrics[0].key, "c");
    }

    #[test]
    fn failed_send_leaves_buffer_unchanged() {
        let buffer = EventBuffer::new(BufferConfig::default());
        buffer.push(make_measurement("a"));

        let (_checkpoint, _) = buffer.snapshot();
        // 전송 실패 → commit 호출 없음
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn ordering_preserved() {
        let buffer = EventBuffer::new(BufferConfig::default());
        for key in ["m1", "m2", "m3"] {
            buffer.push(make_measurement(key));
        }
        let (_, snapshot) = buffer.snapshot();
        let keys: Vec<_> = snapshot
            .iter()
            .map(|m| m.metrics[0].key.as_str())
            .collect();
        assert_eq!(keys, ["m1", "m2", "m3"]);
    }

    #[test]
    fn drop_oldest_on_overflow() {
        let buffer = EventBuffer::new(BufferConfig {
            capacity: Some(2),
            overflow: OverflowPolicy::DropOldest,
        });
        buffer.push(make_measurement("a"));
        buffer.push(make_measurement("b"));
        buffer.push(make_measurement("c"));

        let (_, snapshot) = buffer.snapshot();
        let keys: Vec<_> = snapshot
            .iter()
            .map(|m| m.metrics[0].key.as_str())
            .collect();
        assert_eq!(keys, ["b", "c"]);
    }

    #[test]
    fn drop_newest_on_overflow() {
        let buffer = EventBuffer::new(BufferConfig {
            capacity: Some(2),
            overflow: OverflowPolicy::DropNewest,
        });
        buffer.push(make_measurement("a"));
        buffer.push(make_measurement("b"));
        buffer.push(make_measurement("c"));

        let (_, snapshot) = buffer.snapshot();
        let keys: Vec<_> = snapshot
            .iter()
            .map(|m| m.metrics[0].key.as_str())
            .collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn drop_oldest_during_send_keeps_unsent_measurement() {
        let buffer = EventBuffer::new(BufferConfig {
            capacity: Some(2),
            overflow: OverflowPolicy::DropOldest,
        });
        buffer.push(make_measurement("a"));
        buffer.push(make_measurement("b"));

        let (checkpoint, _) = buffer.snapshot();
        assert_eq!(checkpoint, 2);

        // 전송 도중 용량 초과 push — 전송 중인 a가 밀려난다
        buffer.push(make_measurement("c"));

        // commit은 밀려난 만큼 덜 지운다 — 전송된 적 없는 c는 남아야 한다
        buffer.commit(checkpoint);
        let (_, remaining) = buffer.snapshot();
        let keys: Vec<_> = remaining
            .iter()
            .map(|m| m.metrics[0].key.as_str())
            .collect();
        assert_eq!(keys, ["c"]);
    }

    #[test]
    fn eviction_accounting_capped_at_snapshot_prefix() {
        let buffer = EventBuffer::new(BufferConfig {
            capacity: Some(2),
            overflow: OverflowPolicy::DropOldest,
        });
        buffer.push(make_measurement("a"));
        buffer.push(make_measurement("b"));

        let (checkpoint, _) = buffer.snapshot();

        // prefix(a, b)에 이어 snapshot 이후에 들어온 d까지 밀려나는 상황
        buffer.push(make_measurement("d"));
        buffer.push(make_measurement("e"));
        buffer.push(make_measurement("f"));

        buffer.commit(checkpoint);
        let (_, remaining) = buffer.snapshot();
        let keys: Vec<_> = remaining
            .iter()
            .map(|m| m.metrics[0].key.as_str())
            .collect();
        // prefix는 이미 전부 밀려났으니 commit은 아무것도 지우지 않는다
        assert_eq!(keys, ["e", "f"]);
    }

    #[test]
    fn eviction_accounting_resets_on_next_snapshot() {
        let buffer = EventBuffer::new(BufferConfig {
            capacity: Some(2),
            overflow: OverflowPolicy::DropOldest,
        });
        buffer.push(make_measurement("a"));
        buffer.push(make_measurement("b"));

        // 전송 실패 — commit 없이 snapshot만 지나간 뒤 밀려남 발생
        let _ = buffer.snapshot();
        buffer.push(make_measurement("c"));

        // 다음 tick의 snapshot은 새로 계산한다
        let (checkpoint, _) = buffer.snapshot();
        assert_eq!(checkpoint, 2);
        buffer.commit(checkpoint);
        assert!(buffer.is_empty());
    }

    #[test]
    fn commit_beyond_len_is_safe() {
        let buffer = EventBuffer::new(BufferConfig::default());
        buffer.push(make_measurement("a"));
        buffer.commit(10);
        assert!(buffer.is_empty());
    }
}
