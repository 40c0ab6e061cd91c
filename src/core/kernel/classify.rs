use crate::core::errors::ExchangeError;
use crate::core::kernel::rest::{RawResponse, TransportError};
use crate::core::types::{RequestDescriptor, ResponseShape};
use serde_json::Value;

/// Longest body excerpt quoted in error messages
const BODY_EXCERPT_CHARS: usize = 256;

/// Maps an exchange error code to a human readable description
pub type CodeDescriber = fn(i64) -> String;

/// What the executor should do with a finished attempt
#[derive(Debug)]
pub enum Outcome {
    /// Transient server failure with retry budget left
    Retry { status: u16 },
    Failure(ExchangeError),
    Success(Value),
}

/// Turns transport results into values or normalized errors.
///
/// Checks run in a fixed order and the first match wins: transport
/// failure, retryable 5xx, non-2xx status, unparseable body, `error_code`
/// field, `error` field.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    describe: CodeDescriber,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(unknown_code)
    }
}

impl Classifier {
    pub const fn new(describe: CodeDescriber) -> Self {
        Self { describe }
    }

    pub fn classify(
        &self,
        result: Result<RawResponse, TransportError>,
        request: &RequestDescriptor,
        retries_left: bool,
    ) -> Outcome {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                let mut err = ExchangeError::from(err);
                if let ExchangeError::Network { message, .. } = &mut err {
                    *message = format!("{} failed: {}", request.describe(), message);
                }
                return Outcome::Failure(err);
            }
        };

        let status = response.status;
        if (500..600).contains(&status) && retries_left {
            return Outcome::Retry { status };
        }

        if !(200..300).contains(&status) {
            return Outcome::Failure(ExchangeError::HttpStatus {
                status,
                message: format!("{} answered {}", request.describe(), excerpt(&response.body)),
            });
        }

        let value = match parse_body(&response.body, request.shape) {
            Ok(value) => value,
            Err(err) => return Outcome::Failure(err),
        };

        match self.application_error(&value) {
            Some(err) => Outcome::Failure(err),
            None => Outcome::Success(value),
        }
    }

    /// Error reported inside a successfully delivered body
    pub fn application_error(&self, value: &Value) -> Option<ExchangeError> {
        let object = value.as_object()?;

        if let Some(raw) = object.get("error_code") {
            return Some(match numeric_code(raw) {
                Some(code) => ExchangeError::ExchangeCode {
                    code,
                    message: (self.describe)(code),
                },
                None => ExchangeError::ExchangeGeneric {
                    message: format!("Unrecognised error code: {}", raw),
                },
            });
        }

        object.get("error").map(|raw| ExchangeError::ExchangeGeneric {
            message: match raw {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            },
        })
    }
}

fn parse_body(body: &str, shape: ResponseShape) -> Result<Value, ExchangeError> {
    let parsed = serde_json::from_str::<Value>(body);
    match (shape, parsed) {
        (ResponseShape::Form, Ok(value)) => Ok(value),
        (ResponseShape::Json, Ok(value)) if value.is_object() => Ok(value),
        (ResponseShape::Json, Ok(_)) => Err(ExchangeError::Parse {
            message: "expected a JSON object".to_string(),
            body: body.to_string(),
            source: None,
        }),
        (_, Err(err)) => Err(ExchangeError::Parse {
            message: format!("invalid JSON ({}): {}", err, excerpt(body)),
            body: body.to_string(),
            source: Some(err),
        }),
    }
}

fn numeric_code(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{}...", cut)
    }
}

fn unknown_code(code: i64) -> String {
    format!("Unknown error code: {}", code)
}
