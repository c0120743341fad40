//! 语言检测
//!
//! 1. 字符特征：RTL、CJK、印度系等无歧义文字，按表顺序第一个命中即返回
//! 2. 词汇打分：关键词与口语符号词按整词（短语）计数，拉丁变音字母额外加一分
//! 3. 兜底：默认语言；极短输入时采用上一轮的语言提示

use std::collections::HashSet;

use serde::Serialize;

use crate::identifier::profiles::{default_profile, LanguageProfile, PROFILES};
use crate::identifier::tokenizer::{fold_word, Tokenizer};

/// 检测依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// 无歧义文字字符
    Script,
    /// 关键词 / 符号词（含拉丁变音字母）
    Vocabulary,
    /// 采用上一轮的语言提示
    Hint,
    /// 无任何信号
    Default,
}

/// 检测结果
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    pub profile: &'static LanguageProfile,
    pub source: DetectionSource,
    pub score: usize,
}

/// 语言检测器
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    /// 不超过该词数视为极短输入
    short_input_max_tokens: usize,
}

impl LanguageDetector {
    pub fn new(short_input_max_tokens: usize) -> Self {
        Self {
            short_input_max_tokens,
        }
    }

    /// 检测语言（无提示）
    pub fn detect(&self, text: &str) -> &'static LanguageProfile {
        self.detect_with_hint(text, None).profile
    }

    /// 检测语言
    ///
    /// 提示只用于两种情况：词汇打分平局时打破平局；无信号的极短输入。
    /// 无歧义文字命中时提示不生效。
    pub fn detect_with_hint(
        &self,
        text: &str,
        hint: Option<&'static LanguageProfile>,
    ) -> Detection {
        let lowered = text.to_lowercase();

        if let Some(profile) = Self::detect_script(&lowered) {
            tracing::debug!("Detector: 文字特征命中 {}", profile.code);
            return Detection {
                profile,
                source: DetectionSource::Script,
                score: 0,
            };
        }

        let scores = Self::score_vocabulary(&lowered);
        let best = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);

        if best > 0 {
            let tied: Vec<&'static LanguageProfile> = scores
                .iter()
                .filter(|(_, s)| *s == best)
                .map(|(p, _)| *p)
                .collect();

            let (profile, source) = match hint {
                Some(h) if tied.len() > 1 && tied.contains(&h) => (h, DetectionSource::Hint),
                _ => (tied[0], DetectionSource::Vocabulary),
            };

            tracing::debug!(
                "Detector: 词汇打分 {} (score={}, tied={})",
                profile.code,
                best,
                tied.len()
            );
            return Detection {
                profile,
                source,
                score: best,
            };
        }

        if let Some(h) = hint {
            if Tokenizer::word_count(text) <= self.short_input_max_tokens {
                tracing::debug!("Detector: 极短输入，采用提示语言 {}", h.code);
                return Detection {
                    profile: h,
                    source: DetectionSource::Hint,
                    score: 0,
                };
            }
        }

        Detection {
            profile: default_profile(),
            source: DetectionSource::Default,
            score: 0,
        }
    }

    /// 无歧义文字检测
    fn detect_script(lowered: &str) -> Option<&'static LanguageProfile> {
        PROFILES
            .iter()
            .filter(|p| !p.script_family.shares_alphabet() && !p.char_pattern.is_empty())
            .find(|p| lowered.chars().any(|ch| p.char_pattern.matches(ch)))
    }

    /// 拉丁系语言打分（按表顺序返回）
    fn score_vocabulary(lowered: &str) -> Vec<(&'static LanguageProfile, usize)> {
        let tokens = Tokenizer::tokenize(lowered);
        let folded: Vec<String> = tokens.iter().map(|t| fold_word(&t.text, true)).collect();
        // 两端补空格，便于整词/整短语匹配
        let haystack = format!(" {} ", folded.join(" "));
        let chars: HashSet<char> = lowered.chars().collect();

        PROFILES
            .iter()
            .filter(|p| p.script_family.shares_alphabet())
            .map(|p| {
                let mut score = 0;
                if chars.iter().any(|ch| p.char_pattern.matches(*ch)) {
                    score += 1;
                }

                let words = p
                    .keywords
                    .iter()
                    .copied()
                    .chain(p.symbol_words().map(|(_, w)| w));
                let mut seen = HashSet::new();
                for word in words {
                    let key = fold_word(word, true);
                    if seen.insert(key.clone()) && haystack.contains(&format!(" {} ", key)) {
                        score += 1;
                    }
                }
                (p, score)
            })
            .collect()
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(2)
    }
}
