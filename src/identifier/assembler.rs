//! 邮箱地址组装

use serde::Serialize;

use crate::identifier::types::{EmailAddress, ErrorKind, NormalizationResult, Outcome, Role};

/// 组装结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledEmail {
    pub address: EmailAddress,
    pub username_language: String,
    pub domain_language: String,
}

impl AssembledEmail {
    /// 转换为对外输出结构（语言取用户名一侧）
    pub fn to_outcome(&self) -> Outcome {
        Outcome {
            success: true,
            username: Some(self.address.username().to_string()),
            domain: Some(self.address.domain().to_string()),
            email: Some(self.address.full_address().to_string()),
            detected_language: self.username_language.clone(),
            error_kind: None,
            suggestions: Vec::new(),
        }
    }
}

/// 邮箱组装器
pub struct EmailAssembler;

impl EmailAssembler {
    /// 组合用户名与域名并重新校验
    ///
    /// 任一部分失败时直接返回该部分的错误
    pub fn assemble(
        username: &NormalizationResult,
        domain: &NormalizationResult,
    ) -> Result<AssembledEmail, ErrorKind> {
        Self::ensure_success(username, Role::Username)?;
        Self::ensure_success(domain, Role::Domain)?;

        let address = EmailAddress::new(&username.processed_text, &domain.processed_text)?;
        tracing::debug!("Assembler: 组装完成 {}", address);

        Ok(AssembledEmail {
            address,
            username_language: username.detected_language.clone(),
            domain_language: domain.detected_language.clone(),
        })
    }

    fn ensure_success(result: &NormalizationResult, role: Role) -> Result<(), ErrorKind> {
        if result.success {
            return Ok(());
        }
        let fallback = match role {
            Role::Username => ErrorKind::InvalidUsernameFormat,
            Role::Domain => ErrorKind::InvalidDomainFormat,
        };
        Err(result.error_kind.unwrap_or(fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(role: Role, text: &str, lang: &str) -> NormalizationResult {
        NormalizationResult::success(role, text.to_string(), lang, text)
    }

    #[test]
    fn test_assemble_keeps_both_languages() {
        let email = EmailAssembler::assemble(
            &ok(Role::Username, "ivan.petrov", "ru"),
            &ok(Role::Domain, "yandex.ru", "en"),
        )
        .unwrap();
        assert_eq!(email.address.full_address(), "ivan.petrov@yandex.ru");
        assert_eq!(email.username_language, "ru");
        assert_eq!(email.domain_language, "en");

        let outcome = email.to_outcome();
        assert_eq!(outcome.email.as_deref(), Some("ivan.petrov@yandex.ru"));
        assert_eq!(outcome.detected_language, "ru");
    }

    #[test]
    fn test_failed_part_propagates() {
        let bad_domain = NormalizationResult::failure(
            Role::Domain,
            ErrorKind::UnsupportedTld,
            "acme.comm".into(),
            "en",
            "acme dot comm",
        );
        assert_eq!(
            EmailAssembler::assemble(&ok(Role::Username, "maria", "es"), &bad_domain),
            Err(ErrorKind::UnsupportedTld)
        );

        let bad_user = NormalizationResult::failure(
            Role::Username,
            ErrorKind::EmptyInput,
            String::new(),
            "en",
            "",
        );
        assert_eq!(
            EmailAssembler::assemble(&bad_user, &bad_domain),
            Err(ErrorKind::EmptyInput)
        );
    }

    #[test]
    fn test_too_long_address() {
        let username = "u".repeat(64);
        let domain = format!("{}.{}.{}.com", "a".repeat(63), "b".repeat(63), "c".repeat(62));
        assert_eq!(
            EmailAssembler::assemble(
                &ok(Role::Username, &username, "en"),
                &ok(Role::Domain, &domain, "en"),
            ),
            Err(ErrorKind::AddressTooLong)
        );
    }
}
