//! 命令行入口

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::identifier::{
    profile, IdentifierEngine, NormalizationRequest, Outcome, Role, ScriptNormalizer,
};
use crate::llm_cleanup::{CleanupTarget, LlmCleanupProcessor};

/// Normalize a dictated email username, domain or full address
#[derive(Debug, Parser)]
#[command(name = "voice-identifier", version, about)]
pub struct Cli {
    /// What the dictation describes
    #[arg(value_enum)]
    pub mode: Mode,

    /// Dictated text (as returned by speech-to-text)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Language tag reported by speech-to-text or the conversation
    #[arg(short, long, value_name = "TAG")]
    pub lang: Option<String>,

    /// Candidate produced by an external LLM cleanup pass
    #[arg(long, value_name = "TEXT")]
    pub cleaned: Option<String>,

    /// Configuration file (default: platform config dir)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// 规范化目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Email username
    Username,
    /// Email domain
    Domain,
    /// Full address ("maria dot garcia at gmail dot com")
    Email,
}

impl Mode {
    fn role(self) -> Option<Role> {
        match self {
            Mode::Username => Some(Role::Username),
            Mode::Domain => Some(Role::Domain),
            Mode::Email => None,
        }
    }

    fn cleanup_target(self) -> CleanupTarget {
        match self.role() {
            Some(role) => role.into(),
            None => CleanupTarget::Address,
        }
    }
}

impl Cli {
    /// 执行并把结果以 JSON 打印到 stdout
    pub async fn execute(&self) -> Result<Outcome> {
        let (path, loaded) = match &self.config {
            Some(path) => (Some(path.clone()), AppConfig::load_from(path)),
            None => (AppConfig::config_path().ok(), AppConfig::load()),
        };

        // 日志初始化需要配置里的过滤表达式，加载过程在初始化之后再报告
        let (config, status, load_error) = match loaded {
            Ok((config, status)) => (config, Some(status), None),
            Err(e) => (AppConfig::new(), None, Some(e)),
        };
        init_logging(&config.log_filter);

        if let Some(e) = load_error {
            tracing::warn!("加载配置失败，使用默认配置: {}", e);
        }
        if let Some(status) = &status {
            status.report(path.as_deref());
            if status.is_recovered() {
                if let Some(path) = &path {
                    if let Err(e) = config.save_to(path) {
                        tracing::warn!("回写恢复后的配置失败: {}", e);
                    }
                }
            }
        }

        let engine = IdentifierEngine::from_config(&config);
        let text = self.text.join(" ");
        let hint = self.lang.as_deref();
        tracing::debug!("CLI: mode={:?}, text={}", self.mode, text);

        let cleaned = match &self.cleaned {
            Some(cleaned) => Some(cleaned.clone()),
            None if config.llm_cleanup.is_usable() => {
                let processor = LlmCleanupProcessor::new(&config.llm_cleanup);
                match processor.clean(&text, self.mode.cleanup_target()).await {
                    Ok(cleaned) => Some(cleaned),
                    Err(e) => {
                        tracing::warn!("LLM 清洗失败，仅使用原始转写: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        let outcome = match self.mode.role() {
            Some(role) => {
                let mut request = NormalizationRequest::new(text.as_str(), role);
                if let Some(hint) = hint {
                    request = request.with_hint(hint);
                }
                if let Some(cleaned) = cleaned {
                    request = request.with_cleaned(cleaned);
                }
                engine.normalize(&request).to_outcome()
            }
            None => engine
                .normalize_address_with_cleaned(&text, cleaned.as_deref(), hint)
                .to_outcome(),
        };

        if let Some(p) = profile(&outcome.detected_language) {
            tracing::info!(
                "CLI: lang={}, input={}",
                p.code,
                ScriptNormalizer::wrap_for_display(&text, p)
            );
        }

        println!("{}", serde_json::to_string_pretty(&outcome)?);
        Ok(outcome)
    }
}

/// 日志写到 stderr，stdout 只输出 JSON
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadStatus;

    #[test]
    fn test_parse_username_command() {
        let cli = Cli::parse_from([
            "voice-identifier",
            "username",
            "maria",
            "punto",
            "garcia",
            "--lang",
            "es-MX",
        ]);
        assert_eq!(cli.mode, Mode::Username);
        assert_eq!(cli.text.join(" "), "maria punto garcia");
        assert_eq!(cli.lang.as_deref(), Some("es-MX"));
        assert!(cli.cleaned.is_none());
    }

    #[test]
    fn test_parse_email_command_with_cleaned() {
        let cli = Cli::parse_from([
            "voice-identifier",
            "--cleaned",
            "maria@gmail.com",
            "email",
            "maria arroba gmail punto com",
        ]);
        assert_eq!(cli.mode, Mode::Email);
        assert_eq!(cli.mode.role(), None);
        assert_eq!(cli.mode.cleanup_target(), CleanupTarget::Address);
        assert_eq!(cli.cleaned.as_deref(), Some("maria@gmail.com"));
    }

    #[test]
    fn test_cleanup_target_covers_every_mode() {
        assert_eq!(Mode::Username.cleanup_target(), CleanupTarget::Username);
        assert_eq!(Mode::Domain.cleanup_target(), CleanupTarget::Domain);
        assert_eq!(Mode::Email.cleanup_target(), CleanupTarget::Address);
    }

    #[test]
    fn test_missing_text_is_rejected() {
        assert!(Cli::try_parse_from(["voice-identifier", "domain"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_with_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cli = Cli::parse_from([
            "voice-identifier",
            "domain",
            "gnail",
            "--config",
            path.to_str().unwrap(),
        ]);
        let outcome = cli.execute().await.unwrap();
        assert!(!outcome.success);
        assert!(outcome.suggestions.contains(&"gmail.com".to_string()));
    }

    #[tokio::test]
    async fn test_recovered_config_is_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "detector": { "short_input_max_tokens": "many" }, "domain": { "max_suggestions": 1 } }"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "voice-identifier",
            "domain",
            "gnail",
            "--config",
            path.to_str().unwrap(),
        ]);
        let outcome = cli.execute().await.unwrap();
        assert_eq!(outcome.suggestions, vec!["gmail.com".to_string()]);

        let (config, status) = AppConfig::load_from(&path).unwrap();
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(config.domain.max_suggestions, 1);
    }
}
