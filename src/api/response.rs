//! Shared response handling for every backend call.

use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ApiError;

/// A successful response body: structured JSON when the server declared it,
/// raw text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// Deserialize into a typed record.
    ///
    /// A text body is given one chance to parse as JSON.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value)?),
            Self::Text(text) => serde_json::from_str(&text).map_err(|err| {
                ApiError::Decode(format!("expected a JSON response body: {err}"))
            }),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Turn an HTTP response into a body or an [`ApiError`].
///
/// Non-success statuses fail with the response text, or the status's reason
/// phrase when the body is empty. Success bodies are parsed as JSON only when
/// the `Content-Type` says so.
pub async fn handle_response(response: Response) -> Result<ResponseBody, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        } else {
            text
        };
        tracing::debug!(status = status.as_u16(), message = %message, "request failed");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);

    if is_json {
        let value = response.json::<serde_json::Value>().await?;
        Ok(ResponseBody::Json(value))
    } else {
        Ok(ResponseBody::Text(response.text().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fund;

    #[test]
    fn text_body_with_json_content_still_decodes() {
        let body = ResponseBody::Text(
            r#"{"id": 1, "name": "Core", "strategy": "blend",
                "inception_date": "2020-01-01", "total_aum": "10"}"#
                .to_string(),
        );
        let fund: Fund = body.into_typed().expect("decode fund");
        assert_eq!(fund.id, 1);
    }

    #[test]
    fn plain_text_body_fails_to_decode() {
        let body = ResponseBody::Text("ok".to_string());
        let err = body.into_typed::<Fund>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn untagged_serialization_keeps_raw_shape() {
        let json = ResponseBody::Json(serde_json::json!({"total": 3}));
        assert_eq!(serde_json::to_string(&json).unwrap(), r#"{"total":3}"#);

        let text = ResponseBody::Text("hello".to_string());
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""hello""#);
    }
}
