use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Collaborative,
    ContentBased,
    Popularity,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Collaborative,
        Strategy::ContentBased,
        Strategy::Popularity,
    ];

    pub fn requires_user(self) -> bool {
        !matches!(self, Strategy::Popularity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Collaborative => "collaborative",
            Strategy::ContentBased => "content_based",
            Strategy::Popularity => "popularity",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecommendationRequest {
    pub strategy: Strategy,
    /// Raw user key, without the `user_` prefix.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub fallback: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("user_id is required for the {0} strategy")]
    MissingUser(Strategy),
    #[error("user_id must not be empty for user strategies")]
    EmptyUser,
}

impl RecommendationRequest {
    pub fn for_user(strategy: Strategy, user_id: impl Into<String>) -> Self {
        Self {
            strategy,
            user_id: Some(user_id.into()),
            fallback: false,
        }
    }

    pub fn popularity() -> Self {
        Self {
            strategy: Strategy::Popularity,
            user_id: None,
            fallback: false,
        }
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn parse_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// The user strategies need a non-blank `user_id`; popularity ignores it.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if !self.strategy.requires_user() {
            return Ok(());
        }
        match self.user_key() {
            Some("") => Err(RequestValidationError::EmptyUser),
            Some(_) => Ok(()),
            None => Err(RequestValidationError::MissingUser(self.strategy)),
        }
    }

    /// `user_id` with surrounding whitespace removed, matching how ingestion
    /// trims every stored key.
    pub fn user_key(&self) -> Option<&str> {
        self.user_id.as_deref().map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let request =
            RecommendationRequest::parse_json(r#"{"strategy": "content_based", "user_id": "1"}"#)
                .unwrap();
        assert_eq!(request.strategy, Strategy::ContentBased);
        assert_eq!(request.user_id.as_deref(), Some("1"));
        assert!(!request.fallback);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(RecommendationRequest::parse_json(r#"{"strategy": "random"}"#).is_err());
    }

    #[test]
    fn test_validate_user_requirements() {
        let missing = RecommendationRequest {
            strategy: Strategy::Collaborative,
            user_id: None,
            fallback: true,
        };
        assert_eq!(
            missing.validate(),
            Err(RequestValidationError::MissingUser(Strategy::Collaborative))
        );

        let blank = RecommendationRequest::for_user(Strategy::ContentBased, "  ");
        assert_eq!(blank.validate(), Err(RequestValidationError::EmptyUser));

        assert!(RecommendationRequest::popularity().validate().is_ok());
    }

    #[test]
    fn test_popularity_ignores_blank_user() {
        let request =
            RecommendationRequest::parse_json(r#"{"strategy": "popularity", "user_id": ""}"#)
                .unwrap();
        assert!(request.validate().is_ok());

        let padded = RecommendationRequest::for_user(Strategy::Popularity, "   ");
        assert!(padded.validate().is_ok());
    }

    #[test]
    fn test_user_key_is_trimmed() {
        let request = RecommendationRequest::for_user(Strategy::Collaborative, " 1 ");
        assert_eq!(request.user_key(), Some("1"));
        assert!(request.validate().is_ok());
    }
}
