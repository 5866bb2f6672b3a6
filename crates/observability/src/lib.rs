use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    plan_requests_total: AtomicU64,
    generation_calls_total: AtomicU64,
    generation_empty_total: AtomicU64,
    generation_faults_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub plan_requests_total: u64,
    pub generation_calls_total: u64,
    pub generation_empty_total: u64,
    pub generation_faults_total: u64,
    pub avg_plan_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_plan_request(&self) {
        self.plan_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_generation_call(&self) {
        self.generation_calls_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_generation_empty(&self) {
        self.generation_empty_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_generation_fault(&self) {
        self.generation_faults_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_plan_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.plan_requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            plan_requests_total: requests,
            generation_calls_total: self.generation_calls_total.load(Ordering::Relaxed),
            generation_empty_total: self.generation_empty_total.load(Ordering::Relaxed),
            generation_faults_total: self.generation_faults_total.load(Ordering::Relaxed),
            avg_plan_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,tripsmith_api=info,tripsmith_agents=info,tripsmith_genai=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
