#![no_main]

use libfuzzer_sys::fuzz_target;
use mep_dashboard::{resolve_dashboard_route, DashboardRoute};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let route = resolve_dashboard_route(&raw);
    match &route {
        DashboardRoute::Dashboard => {}
        DashboardRoute::Share { kind, id } => {
            assert!(!kind.is_empty());
            assert!(!kind.contains('/'));
            if let Some(id) = id {
                assert!(!id.is_empty());
                assert!(!id.contains('/'));
            }
            let path = route.path().expect("share routes have a canonical path");
            assert_eq!(resolve_dashboard_route(&path), route);
        }
        DashboardRoute::NotFound => {}
    }
});
