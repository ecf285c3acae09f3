// Job Domain Model

use std::fmt;

/// One unit of work submitted for asynchronous execution.
///
/// The payload is opaque: no schema is imposed and two jobs with the same
/// payload are still two distinct units of work. A `Job` is immutable once
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Job {
    payload: String,
}

impl Job {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn into_payload(self) -> String {
        self.payload
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}

impl From<&str> for Job {
    fn from(payload: &str) -> Self {
        Self::new(payload)
    }
}

impl From<String> for Job {
    fn from(payload: String) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_payloads_are_equal_values() {
        let a = Job::new("resize");
        let b = Job::from("resize");
        assert_eq!(a, b);
        assert_eq!(a.payload(), "resize");
        assert_eq!(b.to_string(), "resize");
    }

    #[test]
    fn test_into_payload() {
        let job = Job::from(String::from("x"));
        assert_eq!(job.into_payload(), "x");
    }
}
