// src/openai_client.rs
//
// OpenAI 兼容 API 客户端
//
// 只负责发送聊天请求、解析第一条回复；返回内容不做任何信任假设

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::normalize_chat_completions_endpoint;

// ============================================================================
// 消息类型定义
// ============================================================================

/// LLM 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
        }
    }
}

/// LLM 消息
#[derive(Debug, Clone)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ============================================================================
// 聊天选项
// ============================================================================

/// 聊天请求参数
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// 最大生成 token 数
    pub max_tokens: u32,
    /// 温度参数（使用 f64 避免 0.3 序列化成 0.30000001192092896）
    pub temperature: f64,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.3,
        }
    }
}

impl ChatOptions {
    /// 标识符清洗：输出很短，温度为 0
    pub fn for_cleanup() -> Self {
        Self {
            max_tokens: 128,
            temperature: 0.0,
        }
    }
}

// ============================================================================
// 客户端配置
// ============================================================================

/// OpenAI 兼容 API 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiClientConfig {
    /// API 端点（基础 URL 或完整的 /chat/completions）
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

impl OpenAiClientConfig {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: normalize_chat_completions_endpoint(&endpoint.into()),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

// ============================================================================
// OpenAI 客户端
// ============================================================================

/// OpenAI 兼容 API 客户端
#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiClientConfig,
    client: Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// 构建 OpenAI 兼容格式的请求体
    fn build_request_body(&self, messages: &[Message], options: &ChatOptions) -> Value {
        let messages_json: Vec<Value> = messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content
                })
            })
            .collect();

        serde_json::json!({
            "model": self.config.model,
            "messages": messages_json,
            "max_tokens": options.max_tokens,
            "temperature": options.temperature
        })
    }

    /// 从响应中取第一条回复内容
    fn extract_content(payload: &Value) -> Result<String> {
        let content = payload["choices"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| anyhow::anyhow!("OpenAI API 返回格式不可解析: {:?}", payload))?;

        Ok(content.trim().to_string())
    }

    /// 通用聊天方法
    pub async fn chat(&self, messages: &[Message], options: ChatOptions) -> Result<String> {
        if messages.is_empty() {
            return Ok(String::new());
        }

        let request_body = self.build_request_body(messages, &options);

        tracing::info!(
            "OpenAI 请求: endpoint={}, model={}, max_tokens={}",
            self.config.endpoint,
            self.config.model,
            options.max_tokens
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API 请求失败 ({}): {}", status, text);
        }

        let payload: Value = response.json().await?;
        Self::extract_content(&payload)
    }

    /// 单轮对话
    pub async fn chat_simple(
        &self,
        system_prompt: &str,
        user_message: &str,
        options: ChatOptions,
    ) -> Result<String> {
        let messages = vec![Message::system(system_prompt), Message::user(user_message)];
        self.chat(&messages, options).await
    }
}

// ============================================================================
// 测试
// ============================================================================
