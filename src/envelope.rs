//! Uniform `{success, message, data}` result shape returned by every analyzer operation.

use serde::Serialize;

/// Result envelope.
///
/// `success` is true exactly when `data` is present. Fields are private so
/// the pairing cannot be broken; use [`ResultEnvelope::success`] and
/// [`ResultEnvelope::failure`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope<T> {
    success: bool,
    message: String,
    data: Option<T>,
}

impl<T> ResultEnvelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Build from an internal result; errors become `"Error: {err}"`.
    pub fn from_result<E: std::fmt::Display>(
        result: Result<T, E>,
        success_message: impl Into<String>,
    ) -> Self {
        match result {
            Ok(data) => Self::success(success_message, data),
            Err(e) => Self::failure(format!("Error: {}", e)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// `Ok(data)` on success, `Err(message)` on failure.
    pub fn into_result(self) -> Result<T, String> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => Err(self.message),
        }
    }
}
