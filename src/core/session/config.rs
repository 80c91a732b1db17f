use serde::{Deserialize, Serialize};

use crate::core::error::GestureError;
use crate::recognizer::state_machine::ConfirmationConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub confirmation: ConfirmationConfig,
}

impl RecognizerConfig {
    /// Parse a JSON5 document; omitted fields keep their defaults.
    ///
    /// ```json5
    /// { confirmation: { required_consecutive: 3, cooldown_policy: "soft" } }
    /// ```
    pub fn from_json5(text: &str) -> Result<Self, GestureError> {
        Ok(json5::from_str(text)?)
    }

    pub fn for_fast_signing() -> Self {
        Self {
            confirmation: ConfirmationConfig::for_fast_signing(),
        }
    }

    pub fn for_deliberate_signing() -> Self {
        Self {
            confirmation: ConfirmationConfig::for_deliberate_signing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::state_machine::CooldownPolicy;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RecognizerConfig::from_json5("{}").unwrap();
        assert_eq!(config, RecognizerConfig::default());
        assert_eq!(config.confirmation.required_consecutive, 5);
        assert_eq!(config.confirmation.cooldown_ms, 1500);
    }

    #[test]
    fn test_partial_document() {
        let text = r#"
            // host overrides
            {
                confirmation: {
                    required_consecutive: 3,
                    cooldown_policy: 'soft',
                },
            }
        "#;
        let config = RecognizerConfig::from_json5(text).unwrap();
        assert_eq!(config.confirmation.required_consecutive, 3);
        assert_eq!(config.confirmation.cooldown_ms, 1500);
        assert_eq!(config.confirmation.cooldown_policy, CooldownPolicy::Soft);
    }

    #[test]
    fn test_invalid_document() {
        let result = RecognizerConfig::from_json5("{ confirmation: ");
        assert!(matches!(result, Err(GestureError::Config(_))));
    }
}
