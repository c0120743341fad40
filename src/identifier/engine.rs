//! 标识符规范化主引擎
//!
//! 组合语言检测、口语符号翻译、文字规范化、校验与域名解析

use std::time::Instant;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::config::AppConfig;
use crate::identifier::assembler::{AssembledEmail, EmailAssembler};
use crate::identifier::cleanup::sanitize_cleanup_output;
use crate::identifier::detector::LanguageDetector;
use crate::identifier::domain::{DomainResolution, DomainResolver};
use crate::identifier::profiles::{normalize_language_tag, LanguageProfile};
use crate::identifier::script::ScriptNormalizer;
use crate::identifier::symbols::SymbolWordTranslator;
use crate::identifier::types::{ErrorKind, NormalizationRequest, NormalizationResult, Outcome, Role};
use crate::identifier::validator::IdentifierValidator;

/// 完整地址的规范化结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailOutcome {
    pub username: NormalizationResult,
    pub domain: NormalizationResult,
    pub email: Result<AssembledEmail, ErrorKind>,
}

impl EmailOutcome {
    pub fn is_success(&self) -> bool {
        self.email.is_ok()
    }

    /// 转换为对外输出结构
    pub fn to_outcome(&self) -> Outcome {
        match &self.email {
            Ok(email) => email.to_outcome(),
            Err(kind) => Outcome {
                success: false,
                username: self
                    .username
                    .success
                    .then(|| self.username.processed_text.clone()),
                domain: self
                    .domain
                    .success
                    .then(|| self.domain.processed_text.clone()),
                email: None,
                detected_language: self.username.detected_language.clone(),
                error_kind: Some(*kind),
                suggestions: self.domain.suggestions.clone(),
            },
        }
    }
}

/// 标识符引擎（可复用，无内部可变状态）
#[derive(Debug, Clone, Default)]
pub struct IdentifierEngine {
    detector: LanguageDetector,
    resolver: DomainResolver,
}

impl IdentifierEngine {
    pub fn new(detector: LanguageDetector, resolver: DomainResolver) -> Self {
        Self { detector, resolver }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            LanguageDetector::new(config.detector.short_input_max_tokens),
            DomainResolver::new(
                config.domain.max_suggestions,
                config.domain.suggestion_tlds.clone(),
            ),
        )
    }

    /// 处理一次规范化请求
    ///
    /// 有 LLM 清洗候选时先用候选走完整流程，校验失败再退回原始转写；
    /// 两者都失败时报告原始转写的结果。
    /// 语言始终按原始转写检测，清洗结果只换文本不换语言
    pub fn normalize(&self, request: &NormalizationRequest) -> NormalizationResult {
        let profile = self.detect(
            &unicode_normalize(&request.raw_text),
            request.hint_language.as_deref(),
        );

        if let Some(cleaned) = request.cleaned_text.as_deref() {
            let sanitized = sanitize_cleanup_output(cleaned);
            if !sanitized.is_empty() {
                let result = self.run(request.role, &sanitized, &request.raw_text, profile);
                if result.success {
                    return result;
                }
                tracing::warn!(
                    "Engine: 清洗结果未通过校验 ({:?})，退回原始转写",
                    result.error_kind
                );
            }
        }

        self.run(request.role, &request.raw_text, &request.raw_text, profile)
    }

    /// 规范化用户名
    pub fn normalize_username(&self, text: &str, hint: Option<&str>) -> NormalizationResult {
        let profile = self.detect(&unicode_normalize(text), hint);
        self.run(Role::Username, text, text, profile)
    }

    /// 解析域名
    pub fn resolve_domain(&self, text: &str, hint: Option<&str>) -> NormalizationResult {
        let profile = self.detect(&unicode_normalize(text), hint);
        self.run(Role::Domain, text, text, profile)
    }

    /// 规范化完整的口述地址
    ///
    /// 符号翻译后在第一个 `@` 处切分，两半分别走用户名/域名流程再组装；
    /// 没有 `@` 时整段视为用户名，域名报 InvalidDomainFormat
    pub fn normalize_address(&self, text: &str, hint: Option<&str>) -> EmailOutcome {
        let profile = self.detect(&unicode_normalize(text), hint);
        self.address_with_profile(text, text, profile)
    }

    /// 规范化完整地址（带 LLM 清洗候选），退回策略与 [`Self::normalize`] 相同
    pub fn normalize_address_with_cleaned(
        &self,
        text: &str,
        cleaned: Option<&str>,
        hint: Option<&str>,
    ) -> EmailOutcome {
        let profile = self.detect(&unicode_normalize(text), hint);

        if let Some(cleaned) = cleaned {
            let sanitized = sanitize_cleanup_output(cleaned);
            if !sanitized.is_empty() {
                let outcome = self.address_with_profile(&sanitized, text, profile);
                if outcome.is_success() {
                    return outcome;
                }
                tracing::warn!("Engine: 清洗后的地址未通过校验，退回原始转写");
            }
        }
        self.address_with_profile(text, text, profile)
    }

    /// 组装两个已规范化的部分
    pub fn assemble(
        &self,
        username: NormalizationResult,
        domain: NormalizationResult,
    ) -> EmailOutcome {
        let email = EmailAssembler::assemble(&username, &domain);
        if let Err(kind) = &email {
            tracing::debug!("Engine: 组装失败 {:?}", kind);
        }
        EmailOutcome {
            username,
            domain,
            email,
        }
    }

    fn address_with_profile(
        &self,
        text: &str,
        original: &str,
        profile: &'static LanguageProfile,
    ) -> EmailOutcome {
        let prepared = unicode_normalize(text);
        let translated = SymbolWordTranslator::translate(&prepared, profile);

        let (username_part, domain_part) = match translated.split_once('@') {
            Some((user, domain)) => (user, Some(domain)),
            None => (translated.as_str(), None),
        };

        let username = Self::finish_username(username_part, profile, original);
        let domain = match domain_part {
            Some(part) => Self::domain_result(
                self.resolver.resolve_translated(part, profile),
                profile,
                original,
            ),
            None => NormalizationResult::failure(
                Role::Domain,
                ErrorKind::InvalidDomainFormat,
                String::new(),
                profile.code,
                original,
            ),
        };

        self.assemble(username, domain)
    }

    fn run(
        &self,
        role: Role,
        text: &str,
        original: &str,
        profile: &'static LanguageProfile,
    ) -> NormalizationResult {
        let start = Instant::now();
        let prepared = unicode_normalize(text);

        let result = match role {
            Role::Username => {
                let translated = SymbolWordTranslator::translate(&prepared, profile);
                Self::finish_username(&translated, profile, original)
            }
            Role::Domain => {
                Self::domain_result(self.resolver.resolve(&prepared, profile), profile, original)
            }
        };

        tracing::debug!(
            "Engine: role={:?}, lang={}, success={}, 耗时 {}us",
            role,
            profile.code,
            result.success,
            start.elapsed().as_micros()
        );
        result
    }

    fn detect(&self, prepared: &str, hint: Option<&str>) -> &'static LanguageProfile {
        let hint_profile = hint.and_then(normalize_language_tag);
        if hint.is_some() && hint_profile.is_none() {
            tracing::debug!("Engine: 无法识别的语言提示 {:?}", hint);
        }
        self.detector.detect_with_hint(prepared, hint_profile).profile
    }

    /// 用户名：文字规范化后校验
    fn finish_username(
        translated: &str,
        profile: &LanguageProfile,
        original: &str,
    ) -> NormalizationResult {
        let candidate = ScriptNormalizer::normalize(translated, profile);
        match IdentifierValidator::validate_username(&candidate) {
            Ok(()) => {
                NormalizationResult::success(Role::Username, candidate, profile.code, original)
            }
            Err(kind) => NormalizationResult::failure(
                Role::Username,
                kind,
                candidate,
                profile.code,
                original,
            ),
        }
    }

    fn domain_result(
        resolution: DomainResolution,
        profile: &LanguageProfile,
        original: &str,
    ) -> NormalizationResult {
        match resolution {
            DomainResolution::Resolved { domain, canonical } => {
                NormalizationResult::success(Role::Domain, domain, profile.code, original)
                    .with_canonical(canonical)
            }
            DomainResolution::Failed {
                error,
                candidate,
                suggestions,
            } => {
                NormalizationResult::failure(Role::Domain, error, candidate, profile.code, original)
                    .with_suggestions(suggestions)
            }
        }
    }
}

/// NFC 归一化 + 空白折叠
fn unicode_normalize(text: &str) -> String {
    let nfc: String = text.nfc().collect();

    let mut result = String::with_capacity(nfc.len());
    let mut prev_whitespace = false;

    for ch in nfc.chars() {
        if ch.is_whitespace() {
            if !prev_whitespace {
                result.push(' ');
                prev_whitespace = true;
            }
        } else {
            result.push(ch);
            prev_whitespace = false;
        }
    }

    result.trim().to_string()
}
