use std::fmt;
use std::str::FromStr;

/// How the access guard treats an unreachable revocation store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevocationFailurePolicy {
    /// Reject the request with the store error
    #[default]
    FailClosed,
    /// Log a warning and treat the token as not revoked
    FailOpen,
}

impl RevocationFailurePolicy {
    pub fn from_fail_open(fail_open: bool) -> Self {
        if fail_open {
            RevocationFailurePolicy::FailOpen
        } else {
            RevocationFailurePolicy::FailClosed
        }
    }
}

impl fmt::Display for RevocationFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevocationFailurePolicy::FailClosed => f.write_str("fail_closed"),
            RevocationFailurePolicy::FailOpen => f.write_str("fail_open"),
        }
    }
}

impl FromStr for RevocationFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail_closed" | "closed" => Ok(RevocationFailurePolicy::FailClosed),
            "fail_open" | "open" => Ok(RevocationFailurePolicy::FailOpen),
            _ => Err(format!("Invalid revocation failure policy: {}", s)),
        }
    }
}
