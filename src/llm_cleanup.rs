// src/llm_cleanup.rs
//
// LLM 标识符清洗
//
// 让 LLM 把口述转写整理成单个候选标识符。输出不可信，
// 由 IdentifierEngine 剥离样板后重新走确定性流程

use anyhow::Result;

use crate::config::LlmCleanupConfig;
use crate::identifier::Role;
use crate::openai_client::{ChatOptions, OpenAiClient, OpenAiClientConfig};

const USERNAME_PROMPT: &str = "You convert a dictated email username into its written form. \
The user may speak in any language and may say punctuation as words (\"dot\", \"punto\", \"точка\", \"点\"). \
Reply with the username only: no explanation, no quotes, no full address.";

const DOMAIN_PROMPT: &str = "You convert a dictated email domain into its written form. \
The user may speak in any language and may say punctuation as words (\"dot\", \"punto\", \"точка\", \"点\"). \
Reply with the domain only (for example gmail.com): no explanation, no quotes, no username.";

const ADDRESS_PROMPT: &str = "You convert a dictated email address into its written form. \
The user may speak in any language and may say punctuation as words (\"dot\", \"punto\", \"at\", \"arroba\", \"собака\", \"艾特\"). \
Reply with the full address only (for example maria.garcia@gmail.com): no explanation, no quotes.";

/// 清洗目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupTarget {
    Username,
    Domain,
    /// 完整地址
    Address,
}

impl From<Role> for CleanupTarget {
    fn from(role: Role) -> Self {
        match role {
            Role::Username => CleanupTarget::Username,
            Role::Domain => CleanupTarget::Domain,
        }
    }
}

/// LLM 清洗处理器
#[derive(Clone)]
pub struct LlmCleanupProcessor {
    client: OpenAiClient,
}

impl LlmCleanupProcessor {
    pub fn new(config: &LlmCleanupConfig) -> Self {
        let client_config = OpenAiClientConfig::new(&config.endpoint, &config.api_key, &config.model);
        Self {
            client: OpenAiClient::new(client_config),
        }
    }

    /// 按清洗目标选择系统提示词
    fn system_prompt(target: CleanupTarget) -> &'static str {
        match target {
            CleanupTarget::Username => USERNAME_PROMPT,
            CleanupTarget::Domain => DOMAIN_PROMPT,
            CleanupTarget::Address => ADDRESS_PROMPT,
        }
    }

    /// 清洗口述转写
    ///
    /// 返回未经校验的候选串
    pub async fn clean(&self, raw_text: &str, target: CleanupTarget) -> Result<String> {
        if raw_text.trim().is_empty() {
            return Ok(String::new());
        }

        tracing::info!("LLM 清洗: target={:?}", target);

        // 用标签包裹，防止模型把转写内容当成提问
        let user_message = format!("<transcript>\n{}\n</transcript>", raw_text);

        self.client
            .chat_simple(
                Self::system_prompt(target),
                &user_message,
                ChatOptions::for_cleanup(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_follows_target() {
        assert!(LlmCleanupProcessor::system_prompt(Role::Username.into()).contains("username only"));
        assert!(LlmCleanupProcessor::system_prompt(Role::Domain.into()).contains("domain only"));
        assert!(
            LlmCleanupProcessor::system_prompt(CleanupTarget::Address).contains("full address only")
        );
    }

    #[tokio::test]
    async fn test_empty_input_skips_request() {
        let processor = LlmCleanupProcessor::new(&LlmCleanupConfig::default());
        for target in [CleanupTarget::Username, CleanupTarget::Address] {
            let cleaned = processor.clean("   ", target).await.unwrap();
            assert!(cleaned.is_empty());
        }
    }
}
