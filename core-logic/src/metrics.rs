use crate::utils::retry::CallOutcome;
use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub operations: u64,
    pub calls: CallMetrics,
    pub performance: PerformanceMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallMetrics {
    pub total: u64,
    pub success: u64,
    pub unauthorized: u64,
    pub rejected: u64,
    pub no_response: u64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub uptime_ms: u64,
    pub avg_operation_ms: f64,
    pub min_operation_ms: u64,
    pub max_operation_ms: u64,
}

/// Counters for one run. `rejected` excludes 401s, which are tracked apart.
#[derive(Debug)]
pub struct MetricsCollector {
    operations: AtomicU64,
    calls_total: AtomicU64,
    calls_success: AtomicU64,
    calls_unauthorized: AtomicU64,
    calls_rejected: AtomicU64,
    calls_no_response: AtomicU64,
    operation_duration_sum_ms: AtomicU64,
    operation_min_ms: AtomicU64,
    operation_max_ms: AtomicU64,
    start_time: Instant,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            operations: AtomicU64::new(0),
            calls_total: AtomicU64::new(0),
            calls_success: AtomicU64::new(0),
            calls_unauthorized: AtomicU64::new(0),
            calls_rejected: AtomicU64::new(0),
            calls_no_response: AtomicU64::new(0),
            operation_duration_sum_ms: AtomicU64::new(0),
            operation_min_ms: AtomicU64::new(u64::MAX),
            operation_max_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }
}

impl MetricsCollector {
    pub fn record_call(&self, outcome: &CallOutcome) {
        self.calls_total.fetch_add(1, Ordering::SeqCst);
        let counter = match outcome {
            CallOutcome::Exhausted => &self.calls_no_response,
            CallOutcome::Responded(reply) if reply.is_success() => &self.calls_success,
            CallOutcome::Responded(reply) if reply.status == 401 => &self.calls_unauthorized,
            CallOutcome::Responded(_) => &self.calls_rejected,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_operation(&self, duration: Duration) {
        let duration_ms = duration.as_millis() as u64;
        self.operations.fetch_add(1, Ordering::SeqCst);
        self.operation_duration_sum_ms
            .fetch_add(duration_ms, Ordering::SeqCst);
        self.operation_min_ms.fetch_min(duration_ms, Ordering::SeqCst);
        self.operation_max_ms.fetch_max(duration_ms, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let operations = self.operations.load(Ordering::SeqCst);
        let total = self.calls_total.load(Ordering::SeqCst);
        let success = self.calls_success.load(Ordering::SeqCst);
        let duration_sum = self.operation_duration_sum_ms.load(Ordering::SeqCst);
        let min = self.operation_min_ms.load(Ordering::SeqCst);

        MetricsSnapshot {
            timestamp: Utc::now().to_rfc3339(),
            operations,
            calls: CallMetrics {
                total,
                success,
                unauthorized: self.calls_unauthorized.load(Ordering::SeqCst),
                rejected: self.calls_rejected.load(Ordering::SeqCst),
                no_response: self.calls_no_response.load(Ordering::SeqCst),
                success_rate: if total > 0 {
                    success as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            },
            performance: PerformanceMetrics {
                uptime_ms: self.uptime().as_millis() as u64,
                avg_operation_ms: if operations > 0 {
                    duration_sum as f64 / operations as f64
                } else {
                    0.0
                },
                min_operation_ms: if min == u64::MAX { 0 } else { min },
                max_operation_ms: self.operation_max_ms.load(Ordering::SeqCst),
            },
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HttpReply;

    #[test]
    fn test_call_buckets() {
        let metrics = MetricsCollector::default();
        metrics.record_call(&CallOutcome::Responded(HttpReply::new(200)));
        metrics.record_call(&CallOutcome::Responded(HttpReply::new(204)));
        metrics.record_call(&CallOutcome::Responded(HttpReply::new(401)));
        metrics.record_call(&CallOutcome::Responded(HttpReply::new(404)));
        metrics.record_call(&CallOutcome::Exhausted);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.calls.total, 5);
        assert_eq!(snapshot.calls.success, 2);
        assert_eq!(snapshot.calls.unauthorized, 1);
        assert_eq!(snapshot.calls.rejected, 1);
        assert_eq!(snapshot.calls.no_response, 1);
        assert!((snapshot.calls.success_rate - 40.0).abs() < 0.01);
    }

    #[test]
    fn test_operation_timings() {
        let metrics = MetricsCollector::default();
        metrics.record_operation(Duration::from_millis(100));
        metrics.record_operation(Duration::from_millis(300));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.operations, 2);
        assert_eq!(snapshot.performance.min_operation_ms, 100);
        assert_eq!(snapshot.performance.max_operation_ms, 300);
        assert!((snapshot.performance.avg_operation_ms - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = MetricsCollector::default();
        metrics.record_call(&CallOutcome::Exhausted);

        let json = serde_json::to_string(&metrics.snapshot()).unwrap();
        assert!(json.contains("\"no_response\":1"));
        assert!(json.contains("performance"));
    }
}
