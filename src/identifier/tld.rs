//! 顶级域表

use std::collections::HashMap;

use serde::Serialize;

/// 顶级域分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TldCategory {
    Generic,
    Europe,
    Asia,
    MiddleEast,
    Americas,
    Oceania,
    Africa,
}

const TLDS: &[(TldCategory, &[&str])] = &[
    (
        TldCategory::Generic,
        &[
            "com", "org", "net", "edu", "gov", "mil", "int", "info", "biz", "name", "pro", "io",
            "ai", "app", "dev", "me", "tv", "xyz", "online", "site", "tech", "store", "cloud",
            "email", "mobi",
        ],
    ),
    (
        TldCategory::Europe,
        &[
            "eu", "uk", "de", "fr", "es", "it", "pt", "nl", "be", "ch", "at", "se", "no", "dk",
            "fi", "pl", "cz", "sk", "hu", "ro", "bg", "gr", "ie", "ru", "ua", "by", "lt", "lv",
            "ee", "si", "hr", "rs", "is", "lu", "tr",
        ],
    ),
    (
        TldCategory::Asia,
        &[
            "cn", "jp", "kr", "in", "id", "my", "ph", "vn", "th", "sg", "hk", "tw", "pk", "bd",
            "lk", "np", "kz",
        ],
    ),
    (
        TldCategory::MiddleEast,
        &["ae", "sa", "il", "ir", "qa", "kw", "jo", "lb", "om", "bh", "iq"],
    ),
    (
        TldCategory::Americas,
        &["us", "ca", "mx", "br", "ar", "cl", "co", "pe", "ve", "uy", "ec"],
    ),
    (TldCategory::Oceania, &["au", "nz"]),
    (TldCategory::Africa, &["za", "ng", "ke", "eg", "ma", "tn", "gh"]),
];

/// 常见二级后缀
const SECOND_LEVEL: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "com.br", "net.br", "org.br", "com.au", "net.au", "org.au",
    "co.jp", "ne.jp", "or.jp", "ac.jp", "co.kr", "or.kr", "com.cn", "net.cn", "org.cn", "com.mx",
    "com.ar", "co.in", "net.in", "co.nz", "co.za", "com.tr", "com.tw", "com.hk", "com.sg", "co.il",
    "com.sa", "com.eg", "com.ua", "co.id", "com.my", "com.ph", "com.vn", "co.th",
];

lazy_static::lazy_static! {
    static ref TLD_INDEX: HashMap<&'static str, TldCategory> = TLDS
        .iter()
        .flat_map(|(category, tlds)| tlds.iter().map(move |tld| (*tld, *category)))
        .collect();
}

/// 顶级域表
pub struct TldTable;

impl TldTable {
    /// 单级顶级域是否已登记
    pub fn is_known(tld: &str) -> bool {
        TLD_INDEX.contains_key(tld.to_ascii_lowercase().as_str())
    }

    /// 顶级域分类
    pub fn category_of(tld: &str) -> Option<TldCategory> {
        TLD_INDEX.get(tld.to_ascii_lowercase().as_str()).copied()
    }

    /// 域名命中的后缀（二级后缀优先）
    pub fn matched_suffix(domain: &str) -> Option<String> {
        let domain = domain.to_ascii_lowercase();
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return None;
        }

        if labels.len() >= 3 {
            let two = labels[labels.len() - 2..].join(".");
            if SECOND_LEVEL.contains(&two.as_str()) {
                return Some(two);
            }
        }

        let last = labels[labels.len() - 1];
        Self::is_known(last).then(|| last.to_string())
    }

    /// 域名后缀可接受：后缀已登记，且后缀之前至少还有一个标签
    pub fn accepts(domain: &str) -> bool {
        Self::matched_suffix(domain).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tlds() {
        assert!(TldTable::is_known("com"));
        assert!(TldTable::is_known("DE"));
        assert!(!TldTable::is_known("comm"));
        assert_eq!(TldTable::category_of("br"), Some(TldCategory::Americas));
        assert_eq!(TldTable::category_of("org"), Some(TldCategory::Generic));
    }

    #[test]
    fn test_second_level_suffix() {
        assert_eq!(
            TldTable::matched_suffix("uol.com.br").as_deref(),
            Some("com.br")
        );
        assert_eq!(TldTable::matched_suffix("bbc.co.uk").as_deref(), Some("co.uk"));
        // 只有两个标签时按单级顶级域处理
        assert_eq!(TldTable::matched_suffix("co.uk").as_deref(), Some("uk"));
    }

    #[test]
    fn test_accepts() {
        assert!(TldTable::accepts("gmail.com"));
        assert!(TldTable::accepts("empresa.com.mx"));
        assert!(!TldTable::accepts("gmail.comm"));
        assert!(!TldTable::accepts("gmail"));
    }
}
