use thiserror::Error;

/// Everything that can stop a weather search from producing a card.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no city name given")]
    EmptyInput,

    #[error("no usable API key configured")]
    MissingCredentials,

    #[error("city not found: {city}")]
    CityNotFound { city: String },

    #[error("API key rejected by weather provider")]
    InvalidCredentials,

    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("weather provider returned status {status}")]
    UpstreamError { status: u16 },

    #[error("unexpected weather response: {0}")]
    InvalidResponse(String),
}

impl LookupError {
    /// Message shown to the user in the error banner.
    pub fn banner_message(&self) -> String {
        match self {
            LookupError::EmptyInput => "Please enter a city name".to_string(),
            LookupError::MissingCredentials => {
                "API key not configured. Run `skycard configure` or set OPENWEATHER_API_KEY."
                    .to_string()
            }
            LookupError::CityNotFound { city } => {
                format!("City not found: \"{city}\". Please check the spelling and try again.")
            }
            LookupError::InvalidCredentials => {
                "Invalid API key. Please check your configuration.".to_string()
            }
            LookupError::NetworkFailure(_) => {
                "Network error. Please check your internet connection.".to_string()
            }
            LookupError::UpstreamError { .. } | LookupError::InvalidResponse(_) => {
                "Error fetching weather data".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_banner_names_the_city() {
        let msg = LookupError::CityNotFound { city: "Atlantis".into() }.banner_message();
        assert!(msg.contains("\"Atlantis\""));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn upstream_and_malformed_share_generic_banner() {
        assert_eq!(
            LookupError::UpstreamError { status: 503 }.banner_message(),
            LookupError::InvalidResponse("eof".into()).banner_message()
        );
    }

    #[test]
    fn display_carries_status() {
        let err = LookupError::UpstreamError { status: 500 };
        assert!(err.to_string().contains("500"));
    }
}
