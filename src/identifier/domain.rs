//! 域名解析
//!
//! 1. 口语符号翻译 + 逐标签文字规范化
//! 2. 知名服务商匹配（别名 / 常见拼写错误），命中即返回规范域名
//! 3. 否则逐标签校验并检查顶级域
//! 4. 失败时给出建议：相近的知名域名，再加上 `基础名 + 常用顶级域`

use std::collections::HashSet;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use strsim::levenshtein;

use crate::identifier::profiles::LanguageProfile;
use crate::identifier::script::ScriptNormalizer;
use crate::identifier::symbols::SymbolWordTranslator;
use crate::identifier::tld::TldTable;
use crate::identifier::types::ErrorKind;
use crate::identifier::validator::IdentifierValidator;

/// 短于该长度的别名只做整标签精确匹配
const MIN_SUBSTRING_ALIAS_LEN: usize = 5;

/// 知名邮箱服务商
#[derive(Debug)]
pub struct DomainRecord {
    pub canonical: &'static str,
    /// 别名与常见拼写错误（小写）
    pub aliases: &'static [&'static str],
    /// 主要使用地区（ISO 国家代码）
    pub region: Option<&'static str>,
}

const fn record(
    canonical: &'static str,
    aliases: &'static [&'static str],
    region: Option<&'static str>,
) -> DomainRecord {
    DomainRecord {
        canonical,
        aliases,
        region,
    }
}

pub static DOMAIN_RECORDS: &[DomainRecord] = &[
    record("gmail.com", &["gmail", "googlemail", "gmial", "gmal", "jimail"], None),
    record("outlook.com", &["outlook", "outlok", "autlook"], None),
    record("hotmail.com", &["hotmail", "hotmial", "hotmal"], None),
    record("live.com", &["live"], None),
    record("yahoo.com", &["yahoo", "yahooo", "yahu"], None),
    record("icloud.com", &["icloud", "iclod"], None),
    record("aol.com", &["aol"], None),
    record("protonmail.com", &["protonmail", "proton"], None),
    record("proton.me", &["protonme"], None),
    record("yandex.ru", &["yandex", "yandeks", "jandex"], Some("ru")),
    record("mail.ru", &["mailru"], Some("ru")),
    record("gmx.de", &["gmx"], Some("de")),
    record("web.de", &["webde"], Some("de")),
    record("t-online.de", &["t-online", "tonline"], Some("de")),
    record("qq.com", &["qq"], Some("cn")),
    record("163.com", &["163"], Some("cn")),
    record("126.com", &["126"], Some("cn")),
    record("naver.com", &["naver"], Some("kr")),
    record("daum.net", &["daum", "hanmail"], Some("kr")),
    record("zoho.com", &["zoho"], None),
    record("libero.it", &["libero"], Some("it")),
    record("orange.fr", &["orange"], Some("fr")),
    record("laposte.net", &["laposte"], Some("fr")),
    record("uol.com.br", &["uol"], Some("br")),
    record("rediffmail.com", &["rediffmail", "rediff"], Some("in")),
    record("seznam.cz", &["seznam"], Some("cz")),
    record("wp.pl", &["wp"], Some("pl")),
    record("o2.pl", &["o2"], Some("pl")),
    record("onet.pl", &["onet"], Some("pl")),
    record("interia.pl", &["interia"], Some("pl")),
    // 服务商的地区域名：只做整串精确命中，口述时保持原样
    record("gmx.net", &[], Some("de")),
    record("gmx.com", &[], None),
    record("hotmail.es", &[], Some("es")),
    record("hotmail.fr", &[], Some("fr")),
    record("hotmail.it", &[], Some("it")),
    record("hotmail.de", &[], Some("de")),
    record("hotmail.co.uk", &[], Some("uk")),
    record("outlook.es", &[], Some("es")),
    record("outlook.fr", &[], Some("fr")),
    record("outlook.de", &[], Some("de")),
    record("live.fr", &[], Some("fr")),
    record("live.co.uk", &[], Some("uk")),
    record("yahoo.es", &[], Some("es")),
    record("yahoo.fr", &[], Some("fr")),
    record("yahoo.de", &[], Some("de")),
    record("yahoo.co.uk", &[], Some("uk")),
    record("yahoo.co.jp", &[], Some("jp")),
    record("yahoo.com.br", &[], Some("br")),
    record("yahoo.com.mx", &[], Some("mx")),
    record("yandex.com", &[], None),
    record("mail.com", &[], None),
];

lazy_static::lazy_static! {
    /// 长别名的子串匹配器：(匹配器, 模式序号 → 记录序号)
    static ref ALIAS_MATCHER: Option<(AhoCorasick, Vec<usize>)> = build_alias_matcher();
}

fn build_alias_matcher() -> Option<(AhoCorasick, Vec<usize>)> {
    let (patterns, owners): (Vec<&str>, Vec<usize>) = DOMAIN_RECORDS
        .iter()
        .enumerate()
        .flat_map(|(idx, r)| r.aliases.iter().map(move |a| (*a, idx)))
        .filter(|(alias, _)| alias.len() >= MIN_SUBSTRING_ALIAS_LEN)
        .unzip();

    match AhoCorasickBuilder::new()
        .match_kind(MatchKind::Standard)
        .ascii_case_insensitive(true)
        .build(patterns)
    {
        Ok(ac) => Some((ac, owners)),
        Err(e) => {
            tracing::warn!("Domain: 构建别名匹配器失败: {}", e);
            None
        }
    }
}

/// 域名解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainResolution {
    Resolved {
        domain: String,
        /// 是否命中知名服务商
        canonical: bool,
    },
    Failed {
        error: ErrorKind,
        /// 规范化后的候选串
        candidate: String,
        suggestions: Vec<String>,
    },
}

impl DomainResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, DomainResolution::Resolved { .. })
    }
}

/// 域名解析器
#[derive(Debug, Clone)]
pub struct DomainResolver {
    max_suggestions: usize,
    suggestion_tlds: Vec<String>,
}

impl DomainResolver {
    pub fn new(max_suggestions: usize, suggestion_tlds: Vec<String>) -> Self {
        Self {
            max_suggestions,
            suggestion_tlds,
        }
    }

    /// 解析口述域名
    pub fn resolve(&self, text: &str, profile: &LanguageProfile) -> DomainResolution {
        let translated = SymbolWordTranslator::translate(text, profile);
        self.resolve_translated(&translated, profile)
    }

    /// 解析已完成符号翻译的文本
    pub(crate) fn resolve_translated(
        &self,
        translated: &str,
        profile: &LanguageProfile,
    ) -> DomainResolution {
        let candidate = Self::normalize_labels(translated, profile);
        self.resolve_candidate(&candidate)
    }

    /// 逐标签规范化后重新拼接，去掉开头的 `@` 与 `www.`
    fn normalize_labels(translated: &str, profile: &LanguageProfile) -> String {
        let trimmed = translated.trim().trim_start_matches('@');
        let joined = trimmed
            .split('.')
            .map(|label| ScriptNormalizer::normalize(label, profile))
            .collect::<Vec<_>>()
            .join(".");

        match joined.strip_prefix("www.") {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => joined,
        }
    }

    /// 解析规范化后的候选串
    pub fn resolve_candidate(&self, candidate: &str) -> DomainResolution {
        if candidate.is_empty() {
            return DomainResolution::Failed {
                error: ErrorKind::EmptyInput,
                candidate: String::new(),
                suggestions: Vec::new(),
            };
        }

        if let Some(record) = Self::canonical_match(candidate) {
            tracing::debug!(
                "Domain: 命中知名域名 {} (region={:?})",
                record.canonical,
                record.region
            );
            return DomainResolution::Resolved {
                domain: record.canonical.to_string(),
                canonical: true,
            };
        }

        let error = match IdentifierValidator::validate_domain_syntax(candidate) {
            Err(e) => Some(e),
            Ok(()) if !TldTable::accepts(candidate) => Some(ErrorKind::UnsupportedTld),
            Ok(()) => None,
        };

        match error {
            None => DomainResolution::Resolved {
                domain: candidate.to_string(),
                canonical: false,
            },
            Some(error) => {
                let suggestions = self.suggest(candidate);
                tracing::debug!(
                    "Domain: 校验失败 {:?}，建议 {} 条",
                    error,
                    suggestions.len()
                );
                DomainResolution::Failed {
                    error,
                    candidate: candidate.to_string(),
                    suggestions,
                }
            }
        }
    }

    /// 知名服务商匹配
    ///
    /// 完整候选串等于规范域名时直接命中；否则用第一个标签匹配别名：
    /// 短别名要求整标签相等，长别名允许子串命中，取最长别名，同长按表顺序
    pub fn canonical_match(candidate: &str) -> Option<&'static DomainRecord> {
        let candidate = candidate.to_ascii_lowercase();
        if let Some(record) = DOMAIN_RECORDS.iter().find(|r| r.canonical == candidate) {
            return Some(record);
        }

        let label = candidate.split('.').next().unwrap_or("");
        if label.is_empty() {
            return None;
        }

        // (别名长度, 记录序号)
        let mut best: Option<(usize, usize)> = None;
        let mut consider = |len: usize, idx: usize| {
            let better = match best {
                None => true,
                Some((best_len, best_idx)) => len > best_len || (len == best_len && idx < best_idx),
            };
            if better {
                best = Some((len, idx));
            }
        };

        for (idx, record) in DOMAIN_RECORDS.iter().enumerate() {
            for alias in record.aliases {
                if alias.len() < MIN_SUBSTRING_ALIAS_LEN && *alias == label {
                    consider(alias.len(), idx);
                }
            }
        }

        if let Some((ac, owners)) = ALIAS_MATCHER.as_ref() {
            for m in ac.find_overlapping_iter(label) {
                consider(m.end() - m.start(), owners[m.pattern().as_usize()]);
            }
        }

        best.map(|(_, idx)| &DOMAIN_RECORDS[idx])
    }

    /// 生成建议
    ///
    /// 先列出与基础名相近（子串或编辑距离不超过 max(1, len/4)）的知名域名，
    /// 再拼接常用顶级域；只保留语法合法的结果，去重后截断
    pub fn suggest(&self, candidate: &str) -> Vec<String> {
        let base = candidate
            .split('.')
            .find(|label| !label.is_empty())
            .unwrap_or("")
            .to_ascii_lowercase();
        if base.is_empty() || self.max_suggestions == 0 {
            return Vec::new();
        }

        let threshold = std::cmp::max(1, base.chars().count() / 4);
        let mut ordered: Vec<String> = Vec::new();

        for record in DOMAIN_RECORDS {
            let close = record.aliases.iter().any(|alias| {
                let contains = base.len() >= 3 && (alias.contains(base.as_str()) || base.contains(alias));
                contains || levenshtein(&base, alias) <= threshold
            });
            if close {
                ordered.push(record.canonical.to_string());
            }
        }

        for tld in &self.suggestion_tlds {
            ordered.push(format!("{}.{}", base, tld.trim_start_matches('.')));
        }

        let mut seen = HashSet::new();
        ordered
            .into_iter()
            .filter(|d| {
                IdentifierValidator::validate_domain_syntax(d).is_ok() && TldTable::accepts(d)
            })
            .filter(|d| seen.insert(d.clone()))
            .take(self.max_suggestions)
            .collect()
    }
}

impl Default for DomainResolver {
    fn default() -> Self {
        Self::new(5, vec!["com".into(), "org".into(), "net".into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::profiles::profile;

    fn lang(code: &str) -> &'static LanguageProfile {
        profile(code).unwrap()
    }

    fn resolved(resolution: DomainResolution) -> String {
        match resolution {
            DomainResolution::Resolved { domain, .. } => domain,
            other => panic!("expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_spoken_domain() {
        let resolver = DomainResolver::default();
        assert_eq!(
            resolved(resolver.resolve("gmail punto com", lang("es"))),
            "gmail.com"
        );
        assert_eq!(
            resolved(resolver.resolve("empresa punto com punto mx", lang("es"))),
            "empresa.com.mx"
        );
        assert_eq!(
            resolved(resolver.resolve("яндекс точка ру", lang("ru"))),
            "yandex.ru"
        );
    }

    #[test]
    fn test_canonical_bypasses_tld_check() {
        let resolver = DomainResolver::default();
        match resolver.resolve_candidate("gmial") {
            DomainResolution::Resolved { domain, canonical } => {
                assert_eq!(domain, "gmail.com");
                assert!(canonical);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_every_alias_resolves_to_its_canonical() {
        let resolver = DomainResolver::default();
        for record in DOMAIN_RECORDS {
            assert_eq!(
                resolved(resolver.resolve_candidate(record.canonical)),
                record.canonical
            );
            for alias in record.aliases {
                assert_eq!(
                    resolved(resolver.resolve_candidate(alias)),
                    record.canonical,
                    "alias {}",
                    alias
                );
            }
        }
    }

    #[test]
    fn test_short_alias_needs_exact_label() {
        // "qq" 不能在 "qqshop" 中按子串命中
        assert!(DomainResolver::canonical_match("qqshop.com").is_none());
        assert_eq!(
            DomainResolver::canonical_match("qq.com").map(|r| r.canonical),
            Some("qq.com")
        );
    }

    #[test]
    fn test_longest_alias_wins() {
        assert_eq!(
            DomainResolver::canonical_match("protonmail").map(|r| r.canonical),
            Some("protonmail.com")
        );
        assert_eq!(
            DomainResolver::canonical_match("myhotmail.es").map(|r| r.canonical),
            Some("hotmail.com")
        );
    }

    #[test]
    fn test_regional_domain_is_kept() {
        let resolver = DomainResolver::default();
        assert_eq!(
            resolved(resolver.resolve("gmx dot net", lang("en"))),
            "gmx.net"
        );
        assert_eq!(
            resolved(resolver.resolve("hotmail punto es", lang("es"))),
            "hotmail.es"
        );
        assert_eq!(
            resolved(resolver.resolve("yahoo dot co dot jp", lang("en"))),
            "yahoo.co.jp"
        );
        // 只说服务商名时仍取主域名
        assert_eq!(resolved(resolver.resolve("gmx", lang("de"))), "gmx.de");
        assert_eq!(resolved(resolver.resolve("hotmail", lang("es"))), "hotmail.com");
    }

    #[test]
    fn test_gnail_suggests_gmail() {
        let resolver = DomainResolver::default();
        match resolver.resolve("gnail", lang("en")) {
            DomainResolution::Failed {
                error, suggestions, ..
            } => {
                assert_eq!(error, ErrorKind::InvalidDomainFormat);
                assert!(suggestions.contains(&"gmail.com".to_string()));
                assert!(suggestions.contains(&"gnail.com".to_string()));
                assert!(suggestions.len() <= 5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_tld() {
        let resolver = DomainResolver::default();
        match resolver.resolve_candidate("empresa.comm") {
            DomainResolution::Failed {
                error, suggestions, ..
            } => {
                assert_eq!(error, ErrorKind::UnsupportedTld);
                assert_eq!(suggestions[0], "empresa.com");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_plain_valid_domain() {
        let resolver = DomainResolver::default();
        match resolver.resolve("acme dot co dot uk", lang("en")) {
            DomainResolution::Resolved { domain, canonical } => {
                assert_eq!(domain, "acme.co.uk");
                assert!(!canonical);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_leading_at_and_www_dropped() {
        let resolver = DomainResolver::default();
        assert_eq!(
            resolved(resolver.resolve("at www dot acme dot org", lang("en"))),
            "acme.org"
        );
    }

    #[test]
    fn test_suggestion_limit() {
        let resolver = DomainResolver::new(2, vec!["com".into(), "org".into(), "net".into()]);
        assert_eq!(resolver.suggest("gnail").len(), 2);
        assert!(DomainResolver::new(0, Vec::new()).suggest("gnail").is_empty());
    }

    #[test]
    fn test_empty_domain() {
        let resolver = DomainResolver::default();
        assert!(matches!(
            resolver.resolve("  ", lang("en")),
            DomainResolution::Failed {
                error: ErrorKind::EmptyInput,
                ..
            }
        ));
    }
}
