//! Shared records and helpers for update tests.

#![allow(dead_code)]

use patchwork_builder::{BuildError, BuildResult, record};
use serde::{Deserialize, Serialize};
use std::io;

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct TestRecord => TestRecordBuilder {
        id: i32,
        name: String,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

fn adult(person: &Person) -> BuildResult<()> {
    if *person.age() < 18 {
        return Err(BuildError::validation("adult", "age must be at least 18"));
    }
    Ok(())
}

record! {
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Person => PersonBuilder {
        name: String,
        age: u8,
        nickname: Option<String>,
        emails: Vec<String>,
        address: Address,
        score: f64,
    }
    validate = adult;
}

pub fn original() -> TestRecord {
    TestRecord::new(1, "1".to_string())
}

pub fn person() -> Person {
    Person::new(
        "Ada".to_string(),
        36,
        Some("countess".to_string()),
        vec!["ada@example.com".to_string()],
        Address {
            city: "London".to_string(),
            zip: "W1".to_string(),
        },
        9.5,
    )
    .unwrap()
}

/// Reader whose every read fails.
pub struct FailingReader;

impl io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream reset"))
    }
}
