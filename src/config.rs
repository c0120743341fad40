// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// 语言检测配置
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// 不超过该词数的输入在无任何信号时采用对话语言提示
    #[serde(default = "default_short_input_max_tokens")]
    pub short_input_max_tokens: usize,
}

fn default_short_input_max_tokens() -> usize {
    2
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            short_input_max_tokens: default_short_input_max_tokens(),
        }
    }
}

// ============================================================================
// 域名解析配置
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// 失败时最多返回的建议数
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// 生成建议时拼接的顶级域（按顺序）
    #[serde(default = "default_suggestion_tlds")]
    pub suggestion_tlds: Vec<String>,
}

fn default_max_suggestions() -> usize {
    5
}

fn default_suggestion_tlds() -> Vec<String> {
    vec!["com".to_string(), "org".to_string(), "net".to_string()]
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            suggestion_tlds: default_suggestion_tlds(),
        }
    }
}

// ============================================================================
// LLM 清洗配置
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmCleanupConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for LlmCleanupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: String::new(),
        }
    }
}

impl LlmCleanupConfig {
    /// 启用且凭据齐全
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.endpoint.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

/// Normalize OpenAI-compatible chat completions endpoint.
///
/// Accepts either a base URL (`https://api.openai.com/v1`) or the full
/// `/chat/completions` endpoint.
pub fn normalize_chat_completions_endpoint(endpoint: &str) -> String {
    let mut e = endpoint.trim().to_string();
    if e.is_empty() {
        return e;
    }

    while e.ends_with('/') {
        e.pop();
    }

    if e.ends_with("/chat/completions") {
        return e;
    }

    // Tolerate the common typo: /chat.completions
    if e.ends_with("/chat.completions") {
        return e.replace("/chat.completions", "/chat/completions");
    }

    format!("{}/chat/completions", e)
}

// ============================================================================
// 应用配置
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub domain: DomainConfig,
    #[serde(default)]
    pub llm_cleanup: LlmCleanupConfig,
    /// tracing 过滤表达式（RUST_LOG 优先）
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

// ============================================================================
// 加载状态
// ============================================================================

/// 配置加载状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// 配置文件不存在，使用默认配置
    Missing,
    Loaded,
    /// 整体解析失败，逐段恢复（列出成功恢复的段）
    Recovered {
        error: String,
        sections: Vec<&'static str>,
    },
}

impl LoadStatus {
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadStatus::Recovered { .. })
    }

    /// 把加载过程写入日志（需在日志初始化之后调用）
    pub fn report(&self, path: Option<&Path>) {
        tracing::info!("配置路径: {:?}", path);
        match self {
            LoadStatus::Missing => tracing::warn!("配置文件不存在，使用默认配置"),
            LoadStatus::Loaded => tracing::info!("配置加载成功"),
            LoadStatus::Recovered { error, sections } => {
                tracing::warn!("直接解析配置失败，已逐段恢复: {}", error);
                tracing::info!("成功恢复的配置段: {:?}（其余使用默认值）", sections);
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            detector: DetectorConfig::default(),
            domain: DomainConfig::default(),
            llm_cleanup: LlmCleanupConfig::default(),
            log_filter: default_log_filter(),
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        let app_dir = config_dir.join("VoiceIdentifier");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("config.json"))
    }

    /// 从默认路径加载
    ///
    /// 返回配置与加载状态，调用者可据此决定是否回写
    pub fn load() -> Result<(Self, LoadStatus)> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// 从指定路径加载
    ///
    /// 加载发生在日志初始化之前（过滤表达式来自配置本身），
    /// 这里不写日志，过程记录在 [`LoadStatus`] 中，由调用者在初始化后报告
    pub fn load_from(path: &Path) -> Result<(Self, LoadStatus)> {
        if !path.exists() {
            return Ok((Self::new(), LoadStatus::Missing));
        }

        let content = std::fs::read_to_string(path)?;

        // 先解析为 Value，整体反序列化失败时逐段恢复
        let v: serde_json::Value = serde_json::from_str(&content)?;

        match serde_json::from_value::<AppConfig>(v.clone()) {
            Ok(config) => Ok((config, LoadStatus::Loaded)),
            Err(e) => {
                let mut cfg = AppConfig::new();
                let mut sections = Vec::new();

                if let Some(detector) = v.get("detector") {
                    if let Ok(d) = serde_json::from_value(detector.clone()) {
                        cfg.detector = d;
                        sections.push("detector");
                    }
                }
                if let Some(domain) = v.get("domain") {
                    if let Ok(d) = serde_json::from_value(domain.clone()) {
                        cfg.domain = d;
                        sections.push("domain");
                    }
                }
                if let Some(llm_cleanup) = v.get("llm_cleanup") {
                    if let Ok(l) = serde_json::from_value(llm_cleanup.clone()) {
                        cfg.llm_cleanup = l;
                        sections.push("llm_cleanup");
                    }
                }
                if let Some(filter) = v.get("log_filter").and_then(|f| f.as_str()) {
                    cfg.log_filter = filter.to_string();
                    sections.push("log_filter");
                }

                Ok((
                    cfg,
                    LoadStatus::Recovered {
                        error: e.to_string(),
                        sections,
                    },
                ))
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tracing::info!("保存配置到: {:?}", path);

        // 原子写入：先写临时文件，再替换
        let temp_path = path.with_extension("json.tmp");
        let backup_path = path.with_extension("json.bak");

        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("写入临时文件失败: {}", e);
            e
        })?;

        // 1. 目标文件存在时先备份到 .bak
        // 2. 临时文件重命名为目标文件
        // 3. 删除备份
        if path.exists() {
            if backup_path.exists() {
                let _ = std::fs::remove_file(&backup_path);
            }
            std::fs::rename(path, &backup_path).map_err(|e| {
                tracing::error!("备份旧配置文件失败: {}", e);
                e
            })?;
        }

        match std::fs::rename(&temp_path, path) {
            Ok(_) => {
                let _ = std::fs::remove_file(&backup_path);
                tracing::info!("配置保存成功");
                Ok(())
            }
            Err(e) => {
                tracing::error!("重命名临时文件失败: {}", e);
                if backup_path.exists() {
                    if let Err(restore_err) = std::fs::rename(&backup_path, path) {
                        tracing::error!("恢复备份失败: {}", restore_err);
                    } else {
                        tracing::info!("已从备份恢复配置");
                    }
                }
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.detector.short_input_max_tokens, 2);
        assert_eq!(config.domain.max_suggestions, 5);
        assert_eq!(config.domain.suggestion_tlds, vec!["com", "org", "net"]);
        assert!(!config.llm_cleanup.enabled);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let (config, status) = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::new());
        assert_eq!(status, LoadStatus::Missing);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::new();
        config.domain.max_suggestions = 3;
        config.llm_cleanup.enabled = true;
        config.save_to(&path).unwrap();
        // 第二次保存走备份替换分支
        config.save_to(&path).unwrap();

        let (loaded, status) = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(status, LoadStatus::Loaded);
        assert!(!path.with_extension("json.bak").exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "domain": { "max_suggestions": 2 } }"#).unwrap();

        let (config, status) = AppConfig::load_from(&path).unwrap();
        assert!(!status.is_recovered());
        assert_eq!(config.domain.max_suggestions, 2);
        assert_eq!(config.domain.suggestion_tlds, vec!["com", "org", "net"]);
        assert_eq!(config.detector.short_input_max_tokens, 2);
    }

    #[test]
    fn test_broken_section_is_recovered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "detector": { "short_input_max_tokens": "many" }, "domain": { "max_suggestions": 1 } }"#,
        )
        .unwrap();

        let (config, status) = AppConfig::load_from(&path).unwrap();
        assert!(status.is_recovered());
        assert_eq!(config.detector, DetectorConfig::default());
        assert_eq!(config.domain.max_suggestions, 1);
        match status {
            LoadStatus::Recovered { error, sections } => {
                assert!(!error.is_empty());
                assert_eq!(sections, vec!["domain"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_normalize_chat_completions_endpoint() {
        assert_eq!(
            normalize_chat_completions_endpoint("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            normalize_chat_completions_endpoint("https://x.ai/v1/chat.completions"),
            "https://x.ai/v1/chat/completions"
        );
        assert_eq!(normalize_chat_completions_endpoint("  "), "");
    }

    #[test]
    fn test_llm_cleanup_usable() {
        let mut llm = LlmCleanupConfig::default();
        assert!(!llm.is_usable());
        llm.enabled = true;
        llm.api_key = "sk-test".to_string();
        assert!(llm.is_usable());
    }
}
