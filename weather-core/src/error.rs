use thiserror::Error;

/// Errors raised while building a query or talking to the weather provider.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The city words joined to nothing but whitespace.
    #[error("City name must not be empty.")]
    EmptyCity,

    /// Provider answered 401.
    #[error("API key invalid.")]
    InvalidApiKey,

    /// Provider answered 404.
    #[error("Cannot find weather data for this city.")]
    CityNotFound,

    /// Any other non-success status; carries the raw body for diagnosis.
    #[error("Something went wrong... (Error code: {status}): {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A 200 whose body is not the expected JSON shape.
    #[error("Could not read server response.")]
    MalformedResponse(#[source] serde_json::Error),

    /// Request never produced a response (DNS, connect, TLS, body read).
    /// Built with `reqwest::Error::without_url` so the key in the query is dropped.
    #[error("HTTP request error: {0}")]
    Transport(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_mentions_code_and_body() {
        let err = WeatherError::UnexpectedStatus {
            status: 503,
            body: "maintenance".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("maintenance"));
    }

    #[test]
    fn malformed_response_message_is_user_facing() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = WeatherError::MalformedResponse(source);

        assert_eq!(err.to_string(), "Could not read server response.");
    }
}
