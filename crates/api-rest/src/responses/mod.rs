//! Empty-body success responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Created response (HTTP 201) with a `Location` header and no body
#[derive(Debug, Clone)]
pub struct Created {
    /// Path of the new resource
    pub location: String,
}

impl Created {
    /// Point at the newly created resource
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl IntoResponse for Created {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, [(header::LOCATION, self.location)]).into_response()
    }
}

/// No content response (HTTP 204)
#[derive(Debug, Clone, Copy)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_sets_location_without_body() {
        let response = Created::at("/api/v1/beer/42").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/v1/beer/42"
        );
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_no_content() {
        assert_eq!(NoContent.into_response().status(), StatusCode::NO_CONTENT);
    }
}
