//! Shared record types for builder tests.

#![allow(dead_code)]

use patchwork_builder::{BuildError, BuildResult, record};

record! {
    /// Two-field record mirroring the smallest useful DTO.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TestRecord => TestRecordBuilder {
        id: i32,
        description: String,
    }
}

fn port_in_range(endpoint: &Endpoint) -> BuildResult<()> {
    if *endpoint.port() == 0 {
        return Err(BuildError::validation("port_in_range", "port must be non-zero"));
    }
    Ok(())
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Endpoint => EndpointBuilder {
        host: String,
        port: u16,
        tags: Vec<String>,
        /// Optional label; `None` is a legitimate value, not an unset field.
        label: Option<String>,
    }
    validate = port_in_range;
}

pub fn endpoint() -> Endpoint {
    Endpoint::new(
        "localhost".to_string(),
        8080,
        vec!["a".to_string(), "b".to_string()],
        None,
    )
    .unwrap()
}
