//! Shared test utilities.

#![allow(dead_code)]

pub mod mock_backend;

use std::net::TcpListener;

use chatter_core::{BackendConfig, SummaryResult};

/// A port nothing is listening on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

pub fn config_for(base_url: &str) -> BackendConfig {
    BackendConfig::default()
        .with_overrides(Some(base_url.to_string()), None)
        .expect("valid test base URL")
}

pub fn sample_result() -> SummaryResult {
    SummaryResult {
        summary: "S".into(),
        n_comments: 10,
        n_positive: 7,
        n_negative: 3,
        raw_summary_chunks: vec!["a".into(), "b".into()],
    }
}
