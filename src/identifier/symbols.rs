//! 口语符号翻译
//!
//! 把 "punto"、"точка"、"点" 这类口语符号词替换为字面符号。
//! 先查当前语言的词表，查不到再退回中性（英语）词表，避免跨语言误伤。
//! 符号词只是指令，永远不会拼进标识符；其余 token 原样保留并直接拼接。

use std::collections::HashMap;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

use crate::identifier::profiles::{default_profile, LanguageProfile, PROFILES};
use crate::identifier::tokenizer::{fold_word, Token, Tokenizer};

/// 单个语言的符号词索引（预编译）
struct SymbolIndex {
    /// 折叠后的短语 → 符号
    phrases: HashMap<String, char>,
    /// 最长短语的词数
    max_words: usize,
    /// 是否对查询词去变音
    fold_accents: bool,
    /// 无空格语言的词内匹配器（最左最长）
    inner: Option<(AhoCorasick, Vec<char>)>,
}

impl SymbolIndex {
    fn build(profile: &LanguageProfile) -> Self {
        let fold_accents = profile.script_family.folds_accents();
        let mut phrases = HashMap::new();
        let mut max_words = 1;

        for (symbol, word) in profile.symbol_words() {
            let key = fold_word(word, fold_accents);
            max_words = max_words.max(key.split_whitespace().count());
            phrases.entry(key).or_insert(symbol);
        }

        let inner = if profile.segmented {
            None
        } else {
            let (patterns, symbols): (Vec<&str>, Vec<char>) =
                profile.symbol_words().map(|(s, w)| (w, s)).unzip();
            match AhoCorasickBuilder::new()
                .match_kind(MatchKind::LeftmostLongest)
                .ascii_case_insensitive(true)
                .build(patterns)
            {
                Ok(ac) => Some((ac, symbols)),
                Err(e) => {
                    tracing::warn!("Symbols: 构建 {} 词内匹配器失败: {}", profile.code, e);
                    None
                }
            }
        };

        Self {
            phrases,
            max_words,
            fold_accents,
            inner,
        }
    }

    /// 从 tokens[start] 开始尝试匹配短语（最长优先）
    ///
    /// 返回 `(符号, 消耗的 token 数)`
    fn match_at(&self, tokens: &[Token], start: usize) -> Option<(char, usize)> {
        let available = tokens.len() - start;
        for len in (1..=self.max_words.min(available)).rev() {
            let key = tokens[start..start + len]
                .iter()
                .map(|t| fold_word(&t.text, self.fold_accents))
                .collect::<Vec<_>>()
                .join(" ");
            if let Some(symbol) = self.phrases.get(&key) {
                return Some((*symbol, len));
            }
        }
        None
    }

    /// 词内替换（仅无空格语言）
    fn replace_inner(&self, text: &str) -> Option<String> {
        let (ac, symbols) = self.inner.as_ref()?;
        if !ac.is_match(text) {
            return None;
        }

        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;
        for m in ac.find_iter(text) {
            result.push_str(&text[last_end..m.start()]);
            result.push(symbols[m.pattern().as_usize()]);
            last_end = m.end();
        }
        result.push_str(&text[last_end..]);
        Some(result)
    }
}

lazy_static::lazy_static! {
    /// 所有语言的符号词索引（只读）
    static ref SYMBOL_INDEXES: HashMap<&'static str, SymbolIndex> = PROFILES
        .iter()
        .map(|p| (p.code, SymbolIndex::build(p)))
        .collect();
}

/// 口语符号翻译器
pub struct SymbolWordTranslator;

impl SymbolWordTranslator {
    /// 翻译口语符号词
    ///
    /// 纯函数，不可失败
    pub fn translate(text: &str, profile: &LanguageProfile) -> String {
        let tokens = Tokenizer::tokenize(text);
        if tokens.is_empty() {
            return String::new();
        }

        let own = SYMBOL_INDEXES.get(profile.code);
        let neutral_profile = default_profile();
        let neutral = if neutral_profile.code == profile.code {
            None
        } else {
            SYMBOL_INDEXES.get(neutral_profile.code)
        };

        let mut result = String::with_capacity(text.len());
        let mut replaced = 0usize;
        let mut i = 0;

        while i < tokens.len() {
            let matched = own
                .and_then(|idx| idx.match_at(&tokens, i))
                .or_else(|| neutral.and_then(|idx| idx.match_at(&tokens, i)));

            if let Some((symbol, consumed)) = matched {
                result.push(symbol);
                replaced += 1;
                i += consumed;
                continue;
            }

            let token = &tokens[i].text;
            match own.and_then(|idx| idx.replace_inner(token)) {
                Some(inner) => {
                    replaced += 1;
                    result.push_str(&inner);
                }
                None => result.push_str(token),
            }
            i += 1;
        }

        tracing::debug!(
            "Symbols: lang={}, tokens={}, replaced={}",
            profile.code,
            tokens.len(),
            replaced
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::profiles::profile;

    fn lang(code: &str) -> &'static LanguageProfile {
        profile(code).unwrap()
    }

    #[test]
    fn test_spanish_spoken_punctuation() {
        let out = SymbolWordTranslator::translate("maria punto garcia guion bajo 22", lang("es"));
        assert_eq!(out, "maria.garcia_22");
    }

    #[test]
    fn test_multi_word_phrase_beats_prefix() {
        // "guion bajo" 必须整体识别为下划线，而不是 "guion" + "bajo"
        let out = SymbolWordTranslator::translate("ana guion bajo lopez", lang("es"));
        assert_eq!(out, "ana_lopez");
        let out = SymbolWordTranslator::translate("ana guion lopez", lang("es"));
        assert_eq!(out, "ana-lopez");
    }

    #[test]
    fn test_french_instruction_word_is_consumed() {
        let out = SymbolWordTranslator::translate("Claire souligne Bernard.33", lang("fr"));
        assert_eq!(out, "Claire_Bernard.33");
    }

    #[test]
    fn test_accent_insensitive_lookup() {
        let out = SymbolWordTranslator::translate("jean TIRET BAS paul", lang("fr"));
        assert_eq!(out, "jean_paul");
        let out = SymbolWordTranslator::translate("ana guión bajo lopez", lang("es"));
        assert_eq!(out, "ana_lopez");
    }

    #[test]
    fn test_neutral_fallback() {
        // 西语词表里没有 "dot"，退回英语词表
        let out = SymbolWordTranslator::translate("maria dot garcia", lang("es"));
        assert_eq!(out, "maria.garcia");
    }

    #[test]
    fn test_language_scoped_substitution() {
        // "punkt" 只在德语中是符号词
        let de = SymbolWordTranslator::translate("hans punkt meier", lang("de"));
        assert_eq!(de, "hans.meier");
        let es = SymbolWordTranslator::translate("hans punkt meier", lang("es"));
        assert_eq!(es, "hanspunktmeier");
    }

    #[test]
    fn test_russian_dot() {
        let out = SymbolWordTranslator::translate("иван точка петров", lang("ru"));
        assert_eq!(out, "иван.петров");
    }

    #[test]
    fn test_chinese_inner_replacement() {
        // 中文无空格：词内也要识别
        let out = SymbolWordTranslator::translate("zhangwei点wang", lang("zh"));
        assert_eq!(out, "zhangwei.wang");
        let out = SymbolWordTranslator::translate("test 艾特 example 点 com", lang("zh"));
        assert_eq!(out, "test@example.com");
    }

    #[test]
    fn test_japanese_longest_match() {
        let out = SymbolWordTranslator::translate("tanaka アットマーク example", lang("ja"));
        assert_eq!(out, "tanaka@example");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(SymbolWordTranslator::translate("   ", lang("en")), "");
    }
}
