//! LLM 清洗结果的边界处理
//!
//! LLM 的输出不可信：可能带解释、前缀、引号或代码块。
//! 这里只做剥离，不做任何修正，剥离后的文本仍要走完整的确定性流程。

use crate::identifier::tokenizer::strip_trailing_punctuation;

/// 无冒号的常见前导句式（小写）
const LEADING_PHRASES: &[&str] = &[
    "the email address is",
    "the email is",
    "the username is",
    "the domain is",
    "it is",
    "it's",
    "el correo electrónico es",
    "el correo es",
    "el usuario es",
    "el dominio es",
    "l'adresse est",
    "l'adresse e-mail est",
    "c'est",
    "die e-mail-adresse ist",
    "die e-mail ist",
    "o e-mail é",
    "o email é",
    "l'indirizzo è",
    "адрес",
    "邮箱是",
    "用户名是",
    "域名是",
];

/// 包裹用的引号与反引号
const WRAPPERS: &[char] = &[
    '"', '\'', '`', '“', '”', '‘', '’', '«', '»', '「', '」', '『', '』', '*',
];

/// 冒号前缀最多包含的词数
const MAX_LABEL_WORDS: usize = 6;

/// 剥离 LLM 输出中的样板内容
///
/// 取第一行有效内容（跳过代码块围栏），去掉 "Here is…:"、"Username:" 之类的前缀，
/// 再去掉包裹的引号
pub fn sanitize_cleanup_output(text: &str) -> String {
    let Some(line) = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("```"))
    else {
        return String::new();
    };

    let mut current = line.to_string();
    // 前缀可能叠加（"Output: Username: x"）
    loop {
        let stripped = strip_label(&current)
            .or_else(|| strip_leading_phrase(&current))
            .map(|rest| rest.trim().to_string());
        match stripped {
            Some(rest) if !rest.is_empty() && rest != current => current = rest,
            _ => break,
        }
    }

    strip_wrappers(&current)
}

/// "xxx: value" 形式的标签前缀
fn strip_label(text: &str) -> Option<&str> {
    let idx = text.find([':', '：'])?;
    let label = &text[..idx];
    let separator_len = text[idx..].chars().next()?.len_utf8();
    let rest = &text[idx + separator_len..];

    if label.contains('@') || rest.trim().is_empty() {
        return None;
    }
    if label.split_whitespace().count() > MAX_LABEL_WORDS {
        return None;
    }
    Some(rest)
}

fn strip_leading_phrase(text: &str) -> Option<&str> {
    LEADING_PHRASES
        .iter()
        .find_map(|phrase| strip_prefix_ignore_case(text, phrase))
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// 忽略大小写的前缀剥离（逐字符比较，兼容非 ASCII）
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map(|(i, _)| &text[i..]).unwrap_or(""))
}

fn strip_wrappers(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let mut next = current
            .trim_matches(|c: char| WRAPPERS.contains(&c) || c.is_whitespace())
            .to_string();
        strip_trailing_punctuation(&mut next);
        if next == current {
            return next;
        }
        current = next;
    }
}
