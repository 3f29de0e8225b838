// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Client-side free-text search over already-fetched collections.
//!
//! Never triggers a fetch: server-side status/level filters are request
//! parameters (`model::ServiceFilter`, `model::LogQuery`) instead.

use crate::model::{Alert, LogEntry, Service};

/// Entity with text fields the search box looks at.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Service {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.display_name.as_str()]
    }
}

impl Searchable for LogEntry {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.message.as_str()];
        fields.extend(self.service_name());
        fields
    }
}

impl Searchable for Alert {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.message.as_str()]
    }
}

/// Lowercased search needle. An empty needle matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle(String);

impl Needle {
    pub fn new(query: &str) -> Self {
        Self(query.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        self.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// Items matching `query`, borrowed, in their original order.
pub fn matching<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = Needle::new(query);
    items.iter().filter(|item| needle.matches(*item)).collect()
}

/// Items matching `query`, in their original order.
pub fn filter<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    matching(items, query).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LogLevel, ServiceStatus};
    use proptest::prelude::*;

    fn service(name: &str, display_name: &str) -> Service {
        Service {
            name: name.to_string(),
            display_name: display_name.to_string(),
            status: ServiceStatus::Running,
            is_critical: false,
            description: String::new(),
            pid: None,
        }
    }

    fn log(message: &str, service: Option<&str>) -> LogEntry {
        LogEntry {
            timestamp: "2024-01-15T10:30:00".to_string(),
            level: LogLevel::Info,
            message: message.to_string(),
            service: service.map(str::to_string),
            source: String::new(),
            level_value: None,
        }
    }

    #[test]
    fn test_services_match_name_or_display_name() {
        let services = vec![
            service("sshd", "OpenSSH Daemon"),
            service("nginx", "Web Server"),
            service("cron", "Periodic Jobs"),
        ];

        let found = filter(&services, "SSH");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "sshd");

        let found = filter(&services, "server");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "nginx");

        assert_eq!(filter(&services, "").len(), 3);
        assert!(filter(&services, "postgres").is_empty());
    }

    #[test]
    fn test_logs_match_message_or_service() {
        let logs = vec![
            log("Disk almost full", None),
            log("Started session", Some("systemd-logind")),
            log("Connection reset", Some("")),
        ];

        let found = filter(&logs, "LOGIND");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "Started session");

        let found = filter(&logs, "disk");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "Disk almost full");
    }

    #[test]
    fn test_matching_borrows_in_order() {
        let services = vec![
            service("nginx", "a"),
            service("cron", "b"),
            service("nginx-proxy", "c"),
        ];
        let found = matching(&services, "nginx");
        let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["nginx", "nginx-proxy"]);
    }

    fn arb_service() -> impl Strategy<Value = Service> {
        ("[a-zA-Z0-9 ]{0,12}", "[a-zA-Z0-9 ]{0,12}").prop_map(|(n, d)| service(&n, &d))
    }

    proptest! {
        #[test]
        fn prop_filter_returns_only_matches(
            services in proptest::collection::vec(arb_service(), 0..20),
            query in "[a-zA-Z]{0,3}",
        ) {
            let needle = Needle::new(&query);
            for s in filter(&services, &query) {
                prop_assert!(needle.matches(&s));
            }
            let expected = services.iter().filter(|s| needle.matches(*s)).count();
            prop_assert_eq!(filter(&services, &query).len(), expected);
        }

        #[test]
        fn prop_filter_preserves_order(
            services in proptest::collection::vec(arb_service(), 0..20),
            query in "[a-zA-Z]{0,3}",
        ) {
            let found = filter(&services, &query);
            let mut cursor = services.iter();
            for item in &found {
                prop_assert!(cursor.any(|s| s == item), "result is not a subsequence");
            }
        }

        #[test]
        fn prop_filter_is_idempotent(
            services in proptest::collection::vec(arb_service(), 0..20),
            query in "[a-zA-Z]{0,3}",
        ) {
            let once = filter(&services, &query);
            let twice = filter(&once, &query);
            prop_assert_eq!(once, twice);
        }
    }
}
