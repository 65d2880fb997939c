// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use dashmap::DashMap;
use uuid::Uuid;

use super::report::ExecutionReport;

/// Process-wide store of execution reports keyed by execution id.
///
/// Entries are never evicted.
#[derive(Debug, Default)]
pub struct ExecutionRegistry {
    reports: DashMap<Uuid, ExecutionReport>,
}

impl ExecutionRegistry {
    pub fn new() -> Self {
        Self {
            reports: DashMap::new(),
        }
    }

    pub fn insert(&self, report: ExecutionReport) {
        self.reports.insert(report.execution_id, report);
    }

    /// Malformed ids are simply not found.
    pub fn get(&self, execution_id: &str) -> Option<ExecutionReport> {
        let id = Uuid::parse_str(execution_id).ok()?;
        self.reports.get(&id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_lookup_by_string_id() {
        let registry = ExecutionRegistry::new();
        let report = ExecutionReport::running("p1");
        let id = report.execution_id.to_string();
        registry.insert(report);

        assert_eq!(registry.get(&id).unwrap().pipeline_id, "p1");
        assert!(registry.get("not-a-uuid").is_none());
        assert!(registry.get(&Uuid::new_v4().to_string()).is_none());
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let registry = Arc::new(ExecutionRegistry::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    let mut report = ExecutionReport::running(format!("p{}", i));
                    registry.insert(report.clone());
                    report.mark_completed(i, "unknown".to_string());
                    registry.insert(report);
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(registry.len(), 16);
    }
}
