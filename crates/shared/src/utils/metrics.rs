use prometheus_client::metrics::{
    counter::Counter,
    family::Family,
    gauge::Gauge,
    histogram::{Histogram, exponential_buckets},
};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{sync::Arc, sync::atomic::AtomicU64, time::Duration};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::warn;

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Gauges describing the gateway process itself, exported as `process_*`.
#[derive(Debug, Clone, Default)]
pub struct ProcessMetrics {
    resident_memory_bytes: Gauge,
    virtual_memory_bytes: Gauge,
    cpu_usage_percent: Gauge<f64, AtomicU64>,
    start_time_seconds: Gauge,
}

impl ProcessMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, registry: &mut Registry) {
        let process = registry.sub_registry_with_prefix("process");

        process.register(
            "resident_memory_bytes",
            "Resident memory of the process in bytes",
            self.resident_memory_bytes.clone(),
        );
        process.register(
            "virtual_memory_bytes",
            "Virtual memory of the process in bytes",
            self.virtual_memory_bytes.clone(),
        );
        process.register(
            "cpu_usage_percent",
            "CPU usage of the process since the previous sample",
            self.cpu_usage_percent.clone(),
        );
        process.register(
            "start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            self.start_time_seconds.clone(),
        );
    }

    /// Refreshes `pid` in `sys` and copies its figures into the gauges.
    /// Returns `false` when the process is not visible.
    pub fn sample(&self, sys: &mut System, pid: Pid) -> bool {
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let Some(process) = sys.process(pid) else {
            return false;
        };

        self.resident_memory_bytes
            .set(saturating_i64(process.memory()));
        self.virtual_memory_bytes
            .set(saturating_i64(process.virtual_memory()));
        self.cpu_usage_percent.set(f64::from(process.cpu_usage()));
        self.start_time_seconds
            .set(saturating_i64(process.start_time()));

        true
    }

    /// Samples the current process every `period` until the task is dropped.
    pub async fn watch(self: Arc<Self>, period: Duration) {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                warn!("⚠️ Process metrics disabled: {e}");
                return;
            }
        };

        let mut sys = System::new();
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;
            if !self.sample(&mut sys, pid) {
                warn!("⚠️ Process {pid} not visible to the metrics sampler");
            }
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RequestLabels {
    pub method: Method,
    pub status: Status,
}

/// Per-service operation counters, registered under a component prefix.
#[derive(Clone, Debug)]
pub struct Metrics {
    requests: Family<RequestLabels, Counter>,
    durations: Family<RequestLabels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            requests: Family::default(),
            // 5ms .. ~10s
            durations: Family::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.005, 2.0, 12))
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry, component: &str) {
        registry.register(
            format!("{component}_requests"),
            format!("Total number of {component} operations"),
            self.requests.clone(),
        );
        registry.register(
            format!("{component}_request_duration_seconds"),
            format!("Duration of {component} operations in seconds"),
            self.durations.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = RequestLabels { method, status };
        self.requests.get_or_create(&labels).inc();
        self.durations.get_or_create(&labels).observe(duration_secs);
    }

    pub fn count(&self, method: Method, status: Status) -> u64 {
        self.requests
            .get_or_create(&RequestLabels { method, status })
            .get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn record_counts_per_label_set() {
        let metrics = Metrics::new();

        metrics.record(Method::Get, Status::Success, 0.01);
        metrics.record(Method::Get, Status::Success, 0.02);
        metrics.record(Method::Get, Status::Error, 0.5);
        metrics.record(Method::Delete, Status::Success, 0.5);

        assert_eq!(metrics.count(Method::Get, Status::Success), 2);
        assert_eq!(metrics.count(Method::Get, Status::Error), 1);
        assert_eq!(metrics.count(Method::Delete, Status::Success), 1);
        assert_eq!(metrics.count(Method::Put, Status::Success), 0);
    }

    #[test]
    fn registered_metrics_are_exposed() {
        let mut registry = Registry::default();
        let metrics = Metrics::new();
        metrics.register(&mut registry, "catalog");
        metrics.record(Method::Get, Status::Success, 0.1);

        let mut buffer = String::new();
        encode(&mut buffer, &registry).unwrap();

        assert!(buffer.contains("catalog_requests_total"));
        assert!(buffer.contains("catalog_request_duration_seconds"));
    }

    #[test]
    fn sampling_the_current_process_fills_the_gauges() {
        let metrics = ProcessMetrics::new();
        let mut registry = Registry::default();
        metrics.register(&mut registry);

        let pid = sysinfo::get_current_pid().unwrap();
        assert!(metrics.sample(&mut System::new(), pid));
        assert!(metrics.resident_memory_bytes.get() > 0);
        assert!(metrics.start_time_seconds.get() > 0);

        let mut buffer = String::new();
        encode(&mut buffer, &registry).unwrap();
        assert!(buffer.contains("process_resident_memory_bytes"));
        assert!(buffer.contains("process_cpu_usage_percent"));
    }
}
