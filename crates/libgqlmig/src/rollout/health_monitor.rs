use crate::rollout::HealthIssue;
use crate::rollout::HealthMetrics;
use crate::rollout::HealthReport;
use crate::rollout::HealthStatus;
use crate::rollout::IssueSeverity;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::Duration;
use std::time::Instant;

#[derive(Clone, Copy, Debug)]
pub struct HealthThresholds {
    /// Error rate above this is critical.
    pub max_error_rate: f64,
    /// No judgment below this many total samples.
    pub min_samples: u64,
    /// P99 latency above this is a high-severity issue.
    pub p99_limit_ms: f64,
    /// An error more recent than this window is a medium-severity issue.
    pub recent_error_window: Duration,
    /// Bound on retained latency samples per operation.
    pub window_size: usize,
}
impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            max_error_rate: 0.01,
            min_samples: 100,
            p99_limit_ms: 2000.0,
            recent_error_window: Duration::from_secs(60),
            window_size: 1000,
        }
    }
}

#[derive(Debug, Default)]
struct OperationSamples {
    error_count: u64,
    last_error: Option<String>,
    last_error_at: Option<Instant>,
    latencies: VecDeque<f64>,
    success_count: u64,
}

/// Live success/error/latency sampling per operation.
///
/// Recording is expected from many concurrent request-handling contexts;
/// buffers are append-only per operation behind a single lock, so
/// concurrent appends never lose updates.
#[derive(Debug, Default)]
pub struct HealthMonitor {
    operations: RwLock<HashMap<String, OperationSamples>>,
    thresholds: HealthThresholds,
}
impl HealthMonitor {
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self {
            operations: RwLock::default(),
            thresholds,
        }
    }

    pub fn record_success(&self, operation_id: &str, latency_ms: f64) {
        let mut operations = self.operations.write();
        let samples = operations.entry(operation_id.to_string()).or_default();
        samples.success_count += 1;
        push_latency(samples, latency_ms, self.thresholds.window_size);
    }

    pub fn record_error(
        &self,
        operation_id: &str,
        error: &str,
        latency_ms: Option<f64>,
    ) {
        let mut operations = self.operations.write();
        let samples = operations.entry(operation_id.to_string()).or_default();
        samples.error_count += 1;
        samples.last_error = Some(error.to_string());
        samples.last_error_at = Some(Instant::now());
        if let Some(latency_ms) = latency_ms {
            push_latency(samples, latency_ms, self.thresholds.window_size);
        }
    }

    /// Judges one operation's health from its current window.
    ///
    /// Below the minimum sample size the status is `healthy` with a
    /// low-severity "insufficient data" issue: absence of evidence is not
    /// treated as evidence of a problem.
    pub fn perform_health_check(&self, operation_id: &str) -> HealthReport {
        let operations = self.operations.read();
        let samples = operations.get(operation_id);

        let (success_count, error_count) = samples
            .map(|s| (s.success_count, s.error_count))
            .unwrap_or((0, 0));
        let sample_count = success_count + error_count;

        let mut sorted: Vec<f64> = samples
            .map(|s| s.latencies.iter().copied().collect())
            .unwrap_or_default();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let metrics = HealthMetrics {
            error_count,
            error_rate: if sample_count > 0 {
                error_count as f64 / sample_count as f64
            } else {
                0.0
            },
            p50_ms: nearest_rank(&sorted, 50.0),
            p95_ms: nearest_rank(&sorted, 95.0),
            p99_ms: nearest_rank(&sorted, 99.0),
            sample_count,
            success_count,
        };

        let mut issues = vec![];
        if sample_count < self.thresholds.min_samples {
            issues.push(HealthIssue {
                message: format!(
                    "insufficient data: {sample_count} samples (need {})",
                    self.thresholds.min_samples,
                ),
                severity: IssueSeverity::Low,
            });
            return HealthReport {
                issues,
                metrics,
                operation_id: operation_id.to_string(),
                status: HealthStatus::Healthy,
            };
        }

        if metrics.error_rate > self.thresholds.max_error_rate {
            issues.push(HealthIssue {
                message: format!(
                    "error rate {:.2}% exceeds {:.2}%",
                    metrics.error_rate * 100.0,
                    self.thresholds.max_error_rate * 100.0,
                ),
                severity: IssueSeverity::Critical,
            });
        }
        if metrics.p99_ms > self.thresholds.p99_limit_ms {
            issues.push(HealthIssue {
                message: format!(
                    "p99 latency {:.0}ms exceeds {:.0}ms",
                    metrics.p99_ms,
                    self.thresholds.p99_limit_ms,
                ),
                severity: IssueSeverity::High,
            });
        }
        if let Some(last_error_at) = samples.and_then(|s| s.last_error_at)
            && last_error_at.elapsed() <= self.thresholds.recent_error_window {
            let detail = samples
                .and_then(|s| s.last_error.clone())
                .unwrap_or_default();
            issues.push(HealthIssue {
                message: format!("recent error: {detail}"),
                severity: IssueSeverity::Medium,
            });
        }

        let status = if issues.iter().any(|i| i.severity == IssueSeverity::Critical) {
            HealthStatus::Unhealthy
        } else if issues.iter().any(|i| i.severity == IssueSeverity::High) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        HealthReport {
            issues,
            metrics,
            operation_id: operation_id.to_string(),
            status,
        }
    }
}

fn push_latency(samples: &mut OperationSamples, latency_ms: f64, window: usize) {
    if samples.latencies.len() == window {
        samples.latencies.pop_front();
    }
    samples.latencies.push_back(latency_ms);
}

/// Nearest-rank percentile over an ascending-sorted window.
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((percentile / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
