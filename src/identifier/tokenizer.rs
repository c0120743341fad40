//! 分词器
//!
//! 按空白切分口述文本，并去掉 ASR 自动添加的句读符号

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// 含字母的词
    Word,
    /// 纯数字
    Number,
    /// 已经是字面符号（如 "@"、"."）
    Symbol,
}

/// Token
#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

/// ASR 句读噪声：永远不会是标识符的一部分
const NOISE_CHARS: &[char] = &[
    ',', '，', '、', ';', '；', '،', '؛', '"', '“', '”', '«', '»', '„', '!', '！', '?', '？', '؟',
];

/// 句末标点（仅在整段末尾去除）
const TRAILING_PUNCTUATION: &[char] = &['。', '.', ':', '：', '۔', '।'];

/// 分词器
pub struct Tokenizer;

impl Tokenizer {
    /// 分词
    ///
    /// 先去掉整段末尾的句号，再按空白切分；每个 token 内的句读噪声被删除，
    /// 删除后为空的 token 直接丢弃
    pub fn tokenize(text: &str) -> Vec<Token> {
        let mut text = text.trim().to_string();
        strip_trailing_punctuation(&mut text);

        text.split_whitespace()
            .filter_map(|raw| {
                let cleaned: String = raw.chars().filter(|c| !NOISE_CHARS.contains(c)).collect();
                if cleaned.is_empty() {
                    return None;
                }
                let kind = Self::classify(&cleaned);
                Some(Token {
                    text: cleaned,
                    kind,
                })
            })
            .collect()
    }

    /// 统计词数（不含纯符号 token）
    pub fn word_count(text: &str) -> usize {
        Self::tokenize(text)
            .iter()
            .filter(|t| t.kind != TokenKind::Symbol)
            .count()
    }

    fn classify(text: &str) -> TokenKind {
        if text.chars().all(|c| c.is_numeric()) {
            TokenKind::Number
        } else if text.chars().any(|c| c.is_alphanumeric()) {
            TokenKind::Word
        } else {
            TokenKind::Symbol
        }
    }
}

/// 去除末尾的句读符号
pub fn strip_trailing_punctuation(text: &mut String) {
    while let Some(last_char) = text.chars().last() {
        if TRAILING_PUNCTUATION.contains(&last_char) || NOISE_CHARS.contains(&last_char) {
            text.pop();
        } else {
            break;
        }
    }
}

/// 查词用的折叠形式
///
/// 小写化，统一撇号；`fold_accents` 为 true 时额外去掉组合变音符号
pub fn fold_word(word: &str, fold_accents: bool) -> String {
    let lowered = word.trim().to_lowercase().replace(['’', '‘', 'ʼ'], "'");
    if fold_accents {
        lowered.nfd().filter(|c| !is_combining_mark(*c)).collect()
    } else {
        lowered.nfc().collect()
    }
}
