//! 标识符规范化类型定义

use serde::{Deserialize, Serialize};

use crate::identifier::validator::IdentifierValidator;

/// 标识符角色：决定走用户名校验还是域名解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Username,
    Domain,
}

/// 错误类别
///
/// 只作为结果上报，不会跨组件抛出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum ErrorKind {
    /// 输入为空（或规范化后为空）
    #[error("输入为空")]
    EmptyInput,
    /// 用户名不符合格式规则
    #[error("用户名格式无效")]
    InvalidUsernameFormat,
    /// 域名标签或长度不合法
    #[error("域名格式无效")]
    InvalidDomainFormat,
    /// 顶级域不在白名单中
    #[error("不支持的顶级域")]
    UnsupportedTld,
    /// 组合后的地址超出长度限制
    #[error("邮箱地址过长")]
    AddressTooLong,
}

/// 规范化请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationRequest {
    /// ASR 原始转写
    pub raw_text: String,
    /// 上一轮对话检测到的语言（只读提示，可能是任意格式的语言标签）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_language: Option<String>,
    pub role: Role,
    /// LLM 清洗后的候选（不可信，必须重新校验）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned_text: Option<String>,
}

impl NormalizationRequest {
    pub fn new(raw_text: impl Into<String>, role: Role) -> Self {
        Self {
            raw_text: raw_text.into(),
            hint_language: None,
            role,
            cleaned_text: None,
        }
    }

    pub fn username(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, Role::Username)
    }

    pub fn domain(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, Role::Domain)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint_language = Some(hint.into());
        self
    }

    pub fn with_cleaned(mut self, cleaned: impl Into<String>) -> Self {
        self.cleaned_text = Some(cleaned.into());
        self
    }
}

/// 单次规范化结果（构造后不再修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub role: Role,
    pub success: bool,
    /// 规范化后的文本（失败时为最后一步的候选串）
    pub processed_text: String,
    /// 检测到的语言代码
    pub detected_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub original_text: String,
    /// 域名失败时的建议
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// 域名是否命中已知服务商
    #[serde(default)]
    pub canonical: bool,
}

impl NormalizationResult {
    pub fn success(
        role: Role,
        processed_text: String,
        detected_language: &str,
        original_text: &str,
    ) -> Self {
        Self {
            role,
            success: true,
            processed_text,
            detected_language: detected_language.to_string(),
            error_kind: None,
            original_text: original_text.to_string(),
            suggestions: Vec::new(),
            canonical: false,
        }
    }

    pub fn failure(
        role: Role,
        error_kind: ErrorKind,
        processed_text: String,
        detected_language: &str,
        original_text: &str,
    ) -> Self {
        Self {
            role,
            success: false,
            processed_text,
            detected_language: detected_language.to_string(),
            error_kind: Some(error_kind),
            original_text: original_text.to_string(),
            suggestions: Vec::new(),
            canonical: false,
        }
    }

    pub(crate) fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub(crate) fn with_canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }

    /// 转换为对外输出结构
    pub fn to_outcome(&self) -> Outcome {
        let value = self.success.then(|| self.processed_text.clone());
        let (username, domain) = match self.role {
            Role::Username => (value, None),
            Role::Domain => (None, value),
        };

        Outcome {
            success: self.success,
            username,
            domain,
            email: None,
            detected_language: self.detected_language.clone(),
            error_kind: self.error_kind,
            suggestions: self.suggestions.clone(),
        }
    }
}

/// 对外输出结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub detected_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// 完整邮箱地址
///
/// 只能通过 [`EmailAddress::new`] 构造，保证 `full_address == username@domain`
/// 且满足长度与语法约束
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    username: String,
    domain: String,
    full_address: String,
}

impl EmailAddress {
    pub fn new(username: &str, domain: &str) -> Result<Self, ErrorKind> {
        let full_address = format!("{}@{}", username, domain);
        IdentifierValidator::validate_address(&full_address)?;

        Ok(Self {
            username: username.to_string(),
            domain: domain.to_string(),
            full_address,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn full_address(&self) -> &str {
        &self.full_address
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_invariant() {
        let email = EmailAddress::new("maria.garcia_22", "gmail.com").unwrap();
        assert_eq!(email.full_address(), "maria.garcia_22@gmail.com");
        assert_eq!(
            email.full_address(),
            format!("{}@{}", email.username(), email.domain())
        );
    }

    #[test]
    fn test_email_address_rejects_bad_parts() {
        assert!(EmailAddress::new("", "gmail.com").is_err());
        assert!(EmailAddress::new("maria", "gmail").is_err());
        assert_eq!(
            EmailAddress::new(&"a".repeat(65), "gmail.com"),
            Err(ErrorKind::AddressTooLong)
        );
    }

    #[test]
    fn test_outcome_fields_follow_role() {
        let result = NormalizationResult::success(
            Role::Domain,
            "gmail.com".into(),
            "es",
            "gmail punto com",
        );
        let outcome = result.to_outcome();
        assert!(outcome.success);
        assert_eq!(outcome.domain.as_deref(), Some("gmail.com"));
        assert!(outcome.username.is_none());

        let failed = NormalizationResult::failure(
            Role::Username,
            ErrorKind::EmptyInput,
            String::new(),
            "en",
            "",
        );
        let outcome = failed.to_outcome();
        assert!(!outcome.success);
        assert!(outcome.username.is_none());
        assert_eq!(outcome.error_kind, Some(ErrorKind::EmptyInput));
    }

    #[test]
    fn test_outcome_json_shape() {
        let failed = NormalizationResult::failure(
            Role::Domain,
            ErrorKind::InvalidDomainFormat,
            "gnail".into(),
            "en",
            "gnail",
        )
        .with_suggestions(vec!["gmail.com".into()]);
        let json = serde_json::to_value(failed.to_outcome()).unwrap();
        assert_eq!(json["error_kind"], "InvalidDomainFormat");
        assert_eq!(json["suggestions"][0], "gmail.com");
        assert!(json.get("email").is_none());
    }
}
