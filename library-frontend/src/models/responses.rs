use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalResponse {
    #[serde(rename = "totalBooks")]
    pub total_books: u64,
}

/// Acknowledgement or failure body. The backend uses `message` for
/// acknowledgements and lookups, `error` for binding and database failures.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn into_text(self) -> Option<String> {
        self.error.or(self.message)
    }
}
