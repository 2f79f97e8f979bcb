// SPDX-License-Identifier: Apache-2.0

use crate::observability::Sensitive;

/// Model used when `ANTHROPIC_MODEL` is not configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Model configuration handed to the external agent framework.
///
/// This service never invokes the model itself; it only assembles the
/// configuration the framework needs.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: Option<String>,
    pub api_key: Sensitive<String>,
    pub max_tokens: Option<u32>,
}

impl ModelConfig {
    pub fn effective_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn effective_max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ModelConfig {
            model: None,
            api_key: Sensitive::new("sk-test".to_string()),
            max_tokens: None,
        };
        assert_eq!(config.effective_model(), DEFAULT_MODEL);
        assert_eq!(config.effective_max_tokens(), 1024);
    }

    #[test]
    fn explicit_values_win() {
        let config = ModelConfig {
            model: Some("claude-haiku-4".to_string()),
            api_key: Sensitive::new("sk-test".to_string()),
            max_tokens: Some(4096),
        };
        assert_eq!(config.effective_model(), "claude-haiku-4");
        assert_eq!(config.effective_max_tokens(), 4096);
    }

    #[test]
    fn api_key_stays_redacted_in_debug_output() {
        let config = ModelConfig {
            model: None,
            api_key: Sensitive::new("sk-live-secret".to_string()),
            max_tokens: None,
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-live-secret"));
    }
}
