pub mod reference_dto;

use serde::Serialize;

/// Envelope for every successful API response. Failures go through `AppError`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_carries_data() {
        let body = serde_json::to_value(ApiResponse::ok(vec!["p-1"])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": ["p-1"] }));
    }
}
