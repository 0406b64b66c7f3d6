use crate::upload::SourceType;
use serde_json::Value;

pub const SAMPLE_TEXT: &str = "Candidate: John Doe. Skills: Python, React.";

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn render(&self) -> String {
        match self {
            ResponseBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmokeResponse {
    pub status: u16,
    pub body: ResponseBody,
}

/// Sends a text-only manual upload to the gateway.
pub async fn run_smoke_test(
    client: &reqwest::Client,
    url: &str,
    company_id: &str,
) -> Result<SmokeResponse, reqwest::Error> {
    let form = [
        ("company_id", company_id),
        ("source_type", SourceType::ManualUpload.as_str()),
        ("text", SAMPLE_TEXT),
    ];

    let response = client.post(url).form(&form).send().await?;
    let status = response.status().as_u16();
    let text = response.text().await?;

    let body = match serde_json::from_str::<Value>(&text) {
        Ok(value) => ResponseBody::Json(value),
        Err(_) => ResponseBody::Text(text),
    };

    tracing::debug!(status, "smoke test response received");
    Ok(SmokeResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_pretty_json() {
        let body = ResponseBody::Json(json!({"ingestion_id": "abc"}));
        assert_eq!(body.render(), "{\n  \"ingestion_id\": \"abc\"\n}");
    }

    #[test]
    fn test_render_text() {
        let body = ResponseBody::Text("Bad Gateway".into());
        assert_eq!(body.render(), "Bad Gateway");
    }
}
