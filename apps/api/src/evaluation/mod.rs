// Resume evaluation cache: one AI evaluation per (company, resume content) pair.

pub mod handlers;
pub mod service;
pub mod store;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Content hash of a resume. Object keys are sorted before hashing, so two
/// resumes differing only in field order hash the same.
pub fn resume_hash(resume: &Value) -> String {
    let canonical = canonicalize(resume).to_string();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (key, item) in entries {
                sorted.insert(key.clone(), canonicalize(item));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// A resume must be a JSON object with at least one field.
pub fn is_blank_resume(resume: &Value) -> bool {
    !matches!(resume, Value::Object(map) if !map.is_empty())
}
