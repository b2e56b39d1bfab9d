use std::fmt;
use thiserror::Error;

/// Longest response body carried into an error message.
const MAX_BODY_CHARS: usize = 500;

/// The backend call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Operation::List => "load the movie list",
            Operation::Get => "load the movie",
            Operation::Create => "save the record",
            Operation::Update => "update the movie",
            Operation::Delete => "delete the movie",
        };
        f.write_str(action)
    }
}

/// Every way a backend call can fail.
///
/// All variants are treated the same by the views: the `Display` text is the
/// message shown to the user and the action may be retried by hand.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Could not reach the backend to {}: {}", .operation, .source)]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {} (HTTP {}){}", .operation, .status, body_suffix(.body))]
    Status {
        operation: Operation,
        status: u16,
        body: String,
    },

    #[error("Unexpected response while trying to {}: {}", .operation, .message)]
    Body {
        operation: Operation,
        message: String,
    },
}

impl ClientError {
    pub fn transport(operation: Operation, source: reqwest::Error) -> Self {
        ClientError::Transport { operation, source }
    }

    pub fn status(operation: Operation, status: u16, body: impl Into<String>) -> Self {
        ClientError::Status {
            operation,
            status,
            body: truncate_body(body.into()),
        }
    }

    pub fn body(operation: Operation, message: impl Into<String>) -> Self {
        ClientError::Body {
            operation,
            message: message.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ClientError::Transport { operation, .. }
            | ClientError::Status { operation, .. }
            | ClientError::Body { operation, .. } => *operation,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

fn truncate_body(body: String) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_BODY_CHARS {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(MAX_BODY_CHARS).collect();
    cut.push('…');
    cut
}
