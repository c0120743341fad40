//! 标识符语法校验
//!
//! 纯函数，不做任何修正，只判定并给出错误类型

use regex::Regex;

use crate::identifier::types::ErrorKind;

/// 用户名最大长度
pub const MAX_USERNAME_LEN: usize = 64;
/// 域名最大长度
pub const MAX_DOMAIN_LEN: usize = 253;
/// 完整地址最大长度
pub const MAX_ADDRESS_LEN: usize = 254;
/// 域名单个标签最大长度
pub const MAX_LABEL_LEN: usize = 63;

/// 用户名允许的分隔符
const SEPARATORS: &[char] = &['.', '_', '-'];

lazy_static::lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(
        r"^[A-Za-z0-9]+(?:[._-][A-Za-z0-9]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    ).expect("邮箱正则无效");
}

/// 校验结果
pub type ValidationOutcome = Result<(), ErrorKind>;

/// 标识符校验器
pub struct IdentifierValidator;

impl IdentifierValidator {
    /// 校验用户名
    ///
    /// 按顺序检查：非空、长度、字符集、首尾分隔符、连续分隔符
    pub fn validate_username(text: &str) -> ValidationOutcome {
        if text.is_empty() {
            return Err(ErrorKind::EmptyInput);
        }
        if text.chars().count() > MAX_USERNAME_LEN {
            return Err(ErrorKind::InvalidUsernameFormat);
        }
        if !text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SEPARATORS.contains(&c))
        {
            return Err(ErrorKind::InvalidUsernameFormat);
        }
        if text.starts_with(SEPARATORS) || text.ends_with(SEPARATORS) {
            return Err(ErrorKind::InvalidUsernameFormat);
        }

        let mut previous_is_separator = false;
        for c in text.chars() {
            let is_separator = SEPARATORS.contains(&c);
            if is_separator && previous_is_separator {
                return Err(ErrorKind::InvalidUsernameFormat);
            }
            previous_is_separator = is_separator;
        }

        Ok(())
    }

    /// 校验域名单个标签
    pub fn validate_label(label: &str) -> bool {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    }

    /// 校验域名语法（不检查顶级域）
    pub fn validate_domain_syntax(domain: &str) -> ValidationOutcome {
        if domain.is_empty() {
            return Err(ErrorKind::EmptyInput);
        }
        if domain.len() > MAX_DOMAIN_LEN {
            return Err(ErrorKind::InvalidDomainFormat);
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || !labels.iter().all(|l| Self::validate_label(l)) {
            return Err(ErrorKind::InvalidDomainFormat);
        }
        Ok(())
    }

    /// 校验完整地址：先查长度，再查语法
    pub fn validate_address(address: &str) -> ValidationOutcome {
        let Some((username, domain)) = address.split_once('@') else {
            return Err(ErrorKind::InvalidDomainFormat);
        };

        if username.is_empty() || domain.is_empty() {
            return Err(ErrorKind::EmptyInput);
        }
        if username.len() > MAX_USERNAME_LEN
            || domain.len() > MAX_DOMAIN_LEN
            || address.len() > MAX_ADDRESS_LEN
        {
            return Err(ErrorKind::AddressTooLong);
        }

        if ADDRESS_RE.is_match(address) {
            return Ok(());
        }

        Self::validate_username(username)?;
        Err(ErrorKind::InvalidDomainFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["maria.garcia_22", "claire_bernard.33", "a", "john-smith", "X9"] {
            assert_eq!(IdentifierValidator::validate_username(name), Ok(()), "{}", name);
        }
    }

    #[test]
    fn test_invalid_usernames() {
        assert_eq!(
            IdentifierValidator::validate_username(""),
            Err(ErrorKind::EmptyInput)
        );
        for name in [
            ".maria",
            "maria_",
            "maria..garcia",
            "maria._garcia",
            "maria garcia",
            "maría",
            "maria+tag",
            "maria@garcia",
        ] {
            assert_eq!(
                IdentifierValidator::validate_username(name),
                Err(ErrorKind::InvalidUsernameFormat),
                "{}",
                name
            );
        }
        assert_eq!(
            IdentifierValidator::validate_username(&"a".repeat(65)),
            Err(ErrorKind::InvalidUsernameFormat)
        );
        assert_eq!(IdentifierValidator::validate_username(&"a".repeat(64)), Ok(()));
    }

    #[test]
    fn test_labels() {
        assert!(IdentifierValidator::validate_label("gmail"));
        assert!(IdentifierValidator::validate_label("t-online"));
        assert!(!IdentifierValidator::validate_label("-bad"));
        assert!(!IdentifierValidator::validate_label("bad-"));
        assert!(!IdentifierValidator::validate_label("under_score"));
        assert!(!IdentifierValidator::validate_label(""));
        assert!(!IdentifierValidator::validate_label(&"a".repeat(64)));
    }

    #[test]
    fn test_domain_syntax() {
        assert_eq!(IdentifierValidator::validate_domain_syntax("gmail.com"), Ok(()));
        assert_eq!(IdentifierValidator::validate_domain_syntax("mail.co.uk"), Ok(()));
        assert_eq!(
            IdentifierValidator::validate_domain_syntax("gmail"),
            Err(ErrorKind::InvalidDomainFormat)
        );
        assert_eq!(
            IdentifierValidator::validate_domain_syntax("gmail..com"),
            Err(ErrorKind::InvalidDomainFormat)
        );
        assert_eq!(
            IdentifierValidator::validate_domain_syntax(""),
            Err(ErrorKind::EmptyInput)
        );
    }

    #[test]
    fn test_address() {
        assert_eq!(
            IdentifierValidator::validate_address("maria.garcia_22@gmail.com"),
            Ok(())
        );
        assert_eq!(
            IdentifierValidator::validate_address("maria..garcia@gmail.com"),
            Err(ErrorKind::InvalidUsernameFormat)
        );
        assert_eq!(
            IdentifierValidator::validate_address("maria@gmail"),
            Err(ErrorKind::InvalidDomainFormat)
        );
        assert_eq!(
            IdentifierValidator::validate_address("maria@gmail@com"),
            Err(ErrorKind::InvalidDomainFormat)
        );
        assert_eq!(
            IdentifierValidator::validate_address("maria"),
            Err(ErrorKind::InvalidDomainFormat)
        );
    }

    #[test]
    fn test_address_length_bounds() {
        let long_domain = format!("{}.com", "a.".repeat(130) + "b");
        assert!(long_domain.len() > MAX_DOMAIN_LEN);
        assert_eq!(
            IdentifierValidator::validate_address(&format!("maria@{}", long_domain)),
            Err(ErrorKind::AddressTooLong)
        );

        // 各部分都合法，但整体超过 254
        let username = "u".repeat(64);
        let domain = format!("{}.{}.{}.com", "a".repeat(63), "b".repeat(63), "c".repeat(62));
        assert!(domain.len() <= MAX_DOMAIN_LEN);
        let address = format!("{}@{}", username, domain);
        assert!(address.len() > MAX_ADDRESS_LEN);
        assert_eq!(
            IdentifierValidator::validate_address(&address),
            Err(ErrorKind::AddressTooLong)
        );
    }
}
