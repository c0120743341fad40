//! 语言画像表
//!
//! 每种语言一行数据：字符特征、关键词、口语符号词表、文字族、书写方向。
//! 表的顺序就是检测优先级：RTL、CJK、印度系等字符范围无歧义的文字排在前面，
//! 拉丁变音字母语言其次，纯拉丁语言最后，英语兜底。

use serde::Serialize;

/// 文字族（决定 ScriptNormalizer 的处理分支）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptFamily {
    Latin,
    Cyrillic,
    Greek,
    Cjk,
    Indic,
    Thai,
    Vietnamese,
    Rtl,
}

impl ScriptFamily {
    /// 字符特征是否与其他语言共享同一字母表
    ///
    /// 共享字母表的语言只把特征字符当作打分信号，不直接判定
    pub fn shares_alphabet(&self) -> bool {
        matches!(self, ScriptFamily::Latin | ScriptFamily::Vietnamese)
    }

    /// 查词时是否忽略变音符号
    pub fn folds_accents(&self) -> bool {
        matches!(
            self,
            ScriptFamily::Latin | ScriptFamily::Cyrillic | ScriptFamily::Greek
        )
    }
}

/// 书写方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

/// 特征字符集合：码位区间 + 单个字符（均为小写形式）
#[derive(Debug)]
pub struct CharPattern {
    pub ranges: &'static [(char, char)],
    pub chars: &'static str,
}

impl CharPattern {
    const EMPTY: CharPattern = CharPattern {
        ranges: &[],
        chars: "",
    };

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.chars.is_empty()
    }

    pub fn matches(&self, ch: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= ch && ch <= hi) || self.chars.contains(ch)
    }
}

/// 一个符号及其口语说法
#[derive(Debug)]
pub struct SymbolWords {
    pub symbol: char,
    pub words: &'static [&'static str],
}

const fn sym(symbol: char, words: &'static [&'static str]) -> SymbolWords {
    SymbolWords { symbol, words }
}

/// 语言画像（进程启动后只读）
#[derive(Debug)]
pub struct LanguageProfile {
    /// ISO-639-1 代码
    pub code: &'static str,
    /// 英文名、本地名、ISO-639-2 代码（用于规范化 ASR 语言标签）
    pub names: &'static [&'static str],
    pub script_family: ScriptFamily,
    pub direction: Direction,
    /// 单词之间是否以空白分隔（中文、日文、泰文为 false）
    pub segmented: bool,
    pub char_pattern: CharPattern,
    pub keywords: &'static [&'static str],
    pub symbol_vocabulary: &'static [SymbolWords],
}

impl LanguageProfile {
    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }

    /// 所有口语符号词（按表中顺序）
    pub fn symbol_words(&self) -> impl Iterator<Item = (char, &'static str)> + '_ {
        self.symbol_vocabulary
            .iter()
            .flat_map(|entry| entry.words.iter().map(move |w| (entry.symbol, *w)))
    }
}

impl PartialEq for LanguageProfile {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for LanguageProfile {}

/// 默认语言（无任何信号时使用，同时提供中性符号词表）
pub const DEFAULT_LANGUAGE: &str = "en";

const ARABIC_RANGES: &[(char, char)] = &[
    ('\u{0600}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{FB50}', '\u{FDFF}'),
    ('\u{FE70}', '\u{FEFF}'),
];

pub static PROFILES: &[LanguageProfile] = &[
    // ===== RTL =====
    LanguageProfile {
        code: "fa",
        names: &["persian", "farsi", "فارسی", "fas", "per"],
        script_family: ScriptFamily::Rtl,
        direction: Direction::Rtl,
        segmented: true,
        // 波斯语独有字母与扩展数字
        char_pattern: CharPattern {
            ranges: &[('\u{06F0}', '\u{06F9}')],
            chars: "پچژگیک",
        },
        keywords: &["ایمیل", "من", "است", "نام"],
        symbol_vocabulary: &[
            sym('.', &["نقطه", "دات"]),
            sym('@', &["اَت", "ات"]),
            sym('_', &["زیرخط", "آندرلاین"]),
            sym('-', &["خط تیره", "خط فاصله"]),
        ],
    },
    LanguageProfile {
        code: "ar",
        names: &["arabic", "العربية", "عربي", "ara"],
        script_family: ScriptFamily::Rtl,
        direction: Direction::Rtl,
        segmented: true,
        char_pattern: CharPattern {
            ranges: ARABIC_RANGES,
            chars: "",
        },
        keywords: &["بريدي", "البريد", "الإلكتروني", "اسمي", "هو"],
        symbol_vocabulary: &[
            sym('.', &["نقطة", "دوت"]),
            sym('@', &["آت", "أت", "ات"]),
            sym('_', &["شرطة سفلية", "خط سفلي"]),
            sym('-', &["شرطة", "واصلة"]),
        ],
    },
    LanguageProfile {
        code: "he",
        names: &["hebrew", "עברית", "heb", "iw"],
        script_family: ScriptFamily::Rtl,
        direction: Direction::Rtl,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[('\u{0590}', '\u{05FF}'), ('\u{FB1D}', '\u{FB4F}')],
            chars: "",
        },
        keywords: &["המייל", "שלי", "הוא", "שם"],
        symbol_vocabulary: &[
            sym('.', &["נקודה", "דוט"]),
            sym('@', &["שטרודל", "את"]),
            sym('_', &["קו תחתון"]),
            sym('-', &["מקף"]),
        ],
    },
    // ===== CJK =====
    LanguageProfile {
        code: "ja",
        names: &["japanese", "日本語", "jpn"],
        script_family: ScriptFamily::Cjk,
        direction: Direction::Ltr,
        segmented: false,
        // 假名区间；纯汉字文本交给中文
        char_pattern: CharPattern {
            ranges: &[
                ('\u{3040}', '\u{309F}'),
                ('\u{30A0}', '\u{30FF}'),
                ('\u{31F0}', '\u{31FF}'),
                ('\u{FF66}', '\u{FF9F}'),
            ],
            chars: "",
        },
        keywords: &["メール", "アドレス", "です"],
        symbol_vocabulary: &[
            sym('.', &["ドット", "ピリオド"]),
            sym('@', &["アットマーク", "アット"]),
            sym('_', &["アンダーバー", "アンダースコア"]),
            sym('-', &["ハイフン", "ダッシュ"]),
        ],
    },
    LanguageProfile {
        code: "zh",
        names: &["chinese", "mandarin", "中文", "汉语", "普通话", "zho", "chi", "cmn"],
        script_family: ScriptFamily::Cjk,
        direction: Direction::Ltr,
        segmented: false,
        char_pattern: CharPattern {
            ranges: &[
                ('\u{4E00}', '\u{9FFF}'),
                ('\u{3400}', '\u{4DBF}'),
                ('\u{F900}', '\u{FAFF}'),
                ('\u{20000}', '\u{2CEAF}'),
            ],
            chars: "",
        },
        keywords: &["邮箱", "我的", "是"],
        symbol_vocabulary: &[
            sym('.', &["点", "點"]),
            sym('@', &["艾特", "圈a"]),
            sym('_', &["下划线", "下劃線"]),
            sym('-', &["横杠", "横线", "减号", "杠", "槓"]),
        ],
    },
    LanguageProfile {
        code: "ko",
        names: &["korean", "한국어", "kor"],
        script_family: ScriptFamily::Cjk,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[
                ('\u{AC00}', '\u{D7AF}'),
                ('\u{1100}', '\u{11FF}'),
                ('\u{3130}', '\u{318F}'),
            ],
            chars: "",
        },
        keywords: &["이메일", "제", "주소는"],
        symbol_vocabulary: &[
            sym('.', &["점", "닷"]),
            sym('@', &["골뱅이", "앳"]),
            sym('_', &["언더바", "밑줄"]),
            sym('-', &["하이픈", "대시"]),
        ],
    },
    // ===== 印度系 / 泰文 =====
    LanguageProfile {
        code: "hi",
        names: &["hindi", "हिन्दी", "हिंदी", "hin"],
        script_family: ScriptFamily::Indic,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[('\u{0900}', '\u{097F}')],
            chars: "",
        },
        keywords: &["मेरा", "ईमेल", "है"],
        symbol_vocabulary: &[
            sym('.', &["डॉट", "बिंदु"]),
            sym('@', &["एट", "ऐट"]),
            sym('_', &["अंडरस्कोर"]),
            sym('-', &["हाइफ़न", "हाइफन", "डैश"]),
        ],
    },
    LanguageProfile {
        code: "th",
        names: &["thai", "ไทย", "ภาษาไทย", "tha"],
        script_family: ScriptFamily::Thai,
        direction: Direction::Ltr,
        segmented: false,
        char_pattern: CharPattern {
            ranges: &[('\u{0E00}', '\u{0E7F}')],
            chars: "",
        },
        keywords: &["อีเมล", "ของฉัน"],
        symbol_vocabulary: &[
            sym('.', &["จุด"]),
            sym('@', &["แอท"]),
            sym('_', &["ขีดล่าง", "อันเดอร์สกอร์"]),
            sym('-', &["ขีดกลาง", "ยัติภังค์"]),
        ],
    },
    // ===== 希腊 / 西里尔 =====
    LanguageProfile {
        code: "el",
        names: &["greek", "ελληνικά", "ell", "gre"],
        script_family: ScriptFamily::Greek,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[('\u{0370}', '\u{03FF}'), ('\u{1F00}', '\u{1FFF}')],
            chars: "",
        },
        keywords: &["μου", "είναι", "διεύθυνση"],
        symbol_vocabulary: &[
            sym('.', &["τελεία"]),
            sym('@', &["παπάκι"]),
            sym('_', &["κάτω παύλα"]),
            sym('-', &["παύλα"]),
        ],
    },
    LanguageProfile {
        code: "uk",
        names: &["ukrainian", "українська", "ukr"],
        script_family: ScriptFamily::Cyrillic,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "іїєґ",
        },
        keywords: &["моя", "пошта", "електронна"],
        symbol_vocabulary: &[
            sym('.', &["крапка"]),
            sym('@', &["равлик", "собачка"]),
            sym('_', &["нижнє підкреслення", "підкреслення"]),
            sym('-', &["дефіс", "тире"]),
        ],
    },
    LanguageProfile {
        code: "ru",
        names: &["russian", "русский", "rus"],
        script_family: ScriptFamily::Cyrillic,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[('\u{0400}', '\u{04FF}')],
            chars: "",
        },
        keywords: &["моя", "почта", "адрес", "электронная"],
        symbol_vocabulary: &[
            sym('.', &["точка"]),
            sym('@', &["собака", "собачка"]),
            sym('_', &["нижнее подчеркивание", "подчеркивание", "подчерк"]),
            sym('-', &["дефис", "тире", "минус"]),
        ],
    },
    // ===== 拉丁变音字母语言 =====
    LanguageProfile {
        code: "vi",
        names: &["vietnamese", "tiếng việt", "vie"],
        script_family: ScriptFamily::Vietnamese,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "đơưạảấầẩẫậắằẳẵặẹẻẽếềểễệỉịọỏốồổỗộớờởỡợụủứừửữựỳỵỷỹ",
        },
        keywords: &["của", "tôi", "là", "thư"],
        symbol_vocabulary: &[
            sym('.', &["chấm"]),
            sym('@', &["a còng", "a móc"]),
            sym('_', &["gạch dưới"]),
            sym('-', &["gạch ngang", "gạch nối"]),
        ],
    },
    LanguageProfile {
        code: "tr",
        names: &["turkish", "türkçe", "tur"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "ğış",
        },
        keywords: &["benim", "adresim", "e-posta"],
        symbol_vocabulary: &[
            sym('.', &["nokta"]),
            sym('@', &["et işareti", "et"]),
            sym('_', &["alt çizgi"]),
            sym('-', &["tire", "kısa çizgi"]),
        ],
    },
    LanguageProfile {
        code: "pl",
        names: &["polish", "polski", "pol"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "ąćęłńśźż",
        },
        keywords: &["mój", "adres", "mailowy", "to"],
        symbol_vocabulary: &[
            sym('.', &["kropka"]),
            sym('@', &["małpa", "małpka"]),
            sym('_', &["podkreślnik", "podłoga"]),
            sym('-', &["myślnik", "minus", "łącznik"]),
        ],
    },
    LanguageProfile {
        code: "cs",
        names: &["czech", "čeština", "ces", "cze"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "ěřůťď",
        },
        keywords: &["můj", "je", "adresa"],
        symbol_vocabulary: &[
            sym('.', &["tečka"]),
            sym('@', &["zavináč"]),
            sym('_', &["podtržítko"]),
            sym('-', &["pomlčka", "spojovník"]),
        ],
    },
    LanguageProfile {
        code: "hu",
        names: &["hungarian", "magyar", "hun"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "őű",
        },
        keywords: &["az", "én", "címem"],
        symbol_vocabulary: &[
            sym('.', &["pont"]),
            sym('@', &["kukac"]),
            sym('_', &["alsóvonás", "aláhúzás"]),
            sym('-', &["kötőjel"]),
        ],
    },
    LanguageProfile {
        code: "ro",
        names: &["romanian", "română", "ron", "rum"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "ășță",
        },
        keywords: &["mea", "adresa", "este"],
        symbol_vocabulary: &[
            sym('.', &["punct"]),
            sym('@', &["arond", "coadă de maimuță"]),
            sym('_', &["liniuță jos", "bară jos"]),
            sym('-', &["cratimă", "liniuță"]),
        ],
    },
    LanguageProfile {
        code: "de",
        names: &["german", "deutsch", "deu", "ger"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "äöüß",
        },
        keywords: &["meine", "ist", "adresse", "lautet"],
        symbol_vocabulary: &[
            sym('.', &["punkt"]),
            sym('@', &["ät", "klammeraffe"]),
            sym('_', &["unterstrich"]),
            sym('-', &["bindestrich", "strich"]),
        ],
    },
    LanguageProfile {
        code: "es",
        names: &["spanish", "español", "castellano", "spa"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "ñ¿¡",
        },
        keywords: &["mi", "correo", "es", "electrónico", "usuario"],
        symbol_vocabulary: &[
            sym('.', &["punto"]),
            sym('@', &["arroba"]),
            sym('_', &["guion bajo", "guión bajo", "subrayado", "barra baja"]),
            sym('-', &["guion", "guión", "menos"]),
        ],
    },
    LanguageProfile {
        code: "pt",
        names: &["portuguese", "português", "por"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "ãõ",
        },
        keywords: &["meu", "e-mail", "endereço"],
        symbol_vocabulary: &[
            sym('.', &["ponto"]),
            sym('@', &["arroba"]),
            sym('_', &["sublinhado", "traço baixo", "underline"]),
            sym('-', &["hífen", "traço"]),
        ],
    },
    LanguageProfile {
        code: "fr",
        names: &["french", "français", "fra", "fre"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "çœèêëîïûÿ",
        },
        keywords: &["mon", "adresse", "est", "courriel"],
        symbol_vocabulary: &[
            sym('.', &["point"]),
            sym('@', &["arobase", "arrobe"]),
            sym('_', &["tiret bas", "souligné", "tiret du bas"]),
            sym('-', &["tiret", "trait d'union"]),
        ],
    },
    LanguageProfile {
        code: "sv",
        names: &["swedish", "svenska", "swe"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "å",
        },
        keywords: &["min", "adress", "är"],
        symbol_vocabulary: &[
            sym('.', &["punkt"]),
            sym('@', &["snabel-a", "snabela"]),
            sym('_', &["understreck"]),
            sym('-', &["bindestreck"]),
        ],
    },
    LanguageProfile {
        code: "da",
        names: &["danish", "dansk", "dan"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern {
            ranges: &[],
            chars: "æø",
        },
        keywords: &["min", "adresse", "er"],
        symbol_vocabulary: &[
            sym('.', &["punktum"]),
            sym('@', &["snabel-a"]),
            sym('_', &["understreg"]),
            sym('-', &["bindestreg"]),
        ],
    },
    LanguageProfile {
        code: "no",
        names: &["norwegian", "norsk", "nor", "nb", "nob"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern::EMPTY,
        keywords: &["min", "adressen", "er"],
        symbol_vocabulary: &[
            sym('.', &["punktum"]),
            sym('@', &["krøllalfa"]),
            sym('_', &["understrek"]),
            sym('-', &["bindestrek"]),
        ],
    },
    LanguageProfile {
        code: "fi",
        names: &["finnish", "suomi", "fin"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern::EMPTY,
        keywords: &["minun", "osoite", "on"],
        symbol_vocabulary: &[
            sym('.', &["piste"]),
            sym('@', &["ät-merkki", "miukumauku"]),
            sym('_', &["alaviiva"]),
            sym('-', &["väliviiva", "tavuviiva"]),
        ],
    },
    // ===== 纯拉丁字母语言（只能靠词汇判定） =====
    LanguageProfile {
        code: "it",
        names: &["italian", "italiano", "ita"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern::EMPTY,
        keywords: &["il", "mio", "indirizzo", "posta"],
        symbol_vocabulary: &[
            sym('.', &["punto"]),
            sym('@', &["chiocciola"]),
            sym('_', &["trattino basso", "sottolineato"]),
            sym('-', &["trattino", "meno"]),
        ],
    },
    LanguageProfile {
        code: "nl",
        names: &["dutch", "nederlands", "nld", "dut"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern::EMPTY,
        keywords: &["mijn", "adres", "is"],
        symbol_vocabulary: &[
            sym('.', &["punt"]),
            sym('@', &["apenstaartje"]),
            sym('_', &["liggend streepje", "laag streepje"]),
            sym('-', &["streepje", "koppelteken"]),
        ],
    },
    LanguageProfile {
        code: "id",
        names: &["indonesian", "bahasa indonesia", "ind", "in"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern::EMPTY,
        keywords: &["saya", "alamat", "adalah"],
        symbol_vocabulary: &[
            sym('.', &["titik"]),
            sym('@', &["et"]),
            sym('_', &["garis bawah"]),
            sym('-', &["tanda hubung", "strip"]),
        ],
    },
    LanguageProfile {
        code: "ms",
        names: &["malay", "bahasa melayu", "msa", "may"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern::EMPTY,
        keywords: &["saya", "ialah", "emel"],
        symbol_vocabulary: &[
            sym('.', &["titik", "noktah"]),
            sym('@', &["alias"]),
            sym('_', &["garis bawah"]),
            sym('-', &["sempang", "tanda sempang"]),
        ],
    },
    LanguageProfile {
        code: "tl",
        names: &["tagalog", "filipino", "tgl", "fil"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern::EMPTY,
        keywords: &["ang", "aking", "ko", "ay"],
        symbol_vocabulary: &[
            sym('.', &["tuldok"]),
            sym('@', &["at sign"]),
            sym('_', &["salungguhit"]),
            sym('-', &["gitling"]),
        ],
    },
    LanguageProfile {
        code: "en",
        names: &["english", "eng"],
        script_family: ScriptFamily::Latin,
        direction: Direction::Ltr,
        segmented: true,
        char_pattern: CharPattern::EMPTY,
        keywords: &["my", "email", "is", "address", "username"],
        symbol_vocabulary: &[
            sym('.', &["dot", "period", "point", "full stop"]),
            sym('@', &["at", "at sign", "at symbol"]),
            sym('_', &["underscore", "under score", "underline"]),
            sym('-', &["hyphen", "dash", "minus"]),
        ],
    },
];

/// 按语言代码查找
pub fn profile(code: &str) -> Option<&'static LanguageProfile> {
    PROFILES.iter().find(|p| p.code.eq_ignore_ascii_case(code))
}

/// 默认画像（英语）
pub fn default_profile() -> &'static LanguageProfile {
    PROFILES
        .iter()
        .find(|p| p.code == DEFAULT_LANGUAGE)
        .unwrap_or(&PROFILES[PROFILES.len() - 1])
}

/// 规范化 ASR 返回的语言标签
///
/// 支持 `es`、`es-ES`、`zh_Hans`、`spa`、`Spanish`、`español` 等写法，
/// 无法识别时返回 None（不作为提示）
pub fn normalize_language_tag(tag: &str) -> Option<&'static LanguageProfile> {
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }

    let folded = crate::identifier::tokenizer::fold_word(tag, true);

    // 完整名称优先（"bahasa indonesia" 之类带空格的名字）
    if let Some(p) = PROFILES.iter().find(|p| {
        p.names
            .iter()
            .any(|n| crate::identifier::tokenizer::fold_word(n, true) == folded)
    }) {
        return Some(p);
    }

    // BCP-47 主子标签
    let primary = folded
        .split(|c: char| c == '-' || c == '_')
        .next()
        .unwrap_or("");
    PROFILES
        .iter()
        .find(|p| p.code == primary || p.names.iter().any(|n| *n == primary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_profile_codes_unique() {
        let codes: HashSet<&str> = PROFILES.iter().map(|p| p.code).collect();
        assert_eq!(codes.len(), PROFILES.len());
        assert!(PROFILES.len() >= 30);
    }

    #[test]
    fn test_default_profile_is_english_and_last() {
        assert_eq!(default_profile().code, "en");
        assert_eq!(PROFILES.last().map(|p| p.code), Some("en"));
    }

    #[test]
    fn test_every_profile_has_core_symbols() {
        for p in PROFILES {
            for symbol in ['.', '@', '_', '-'] {
                assert!(
                    p.symbol_vocabulary.iter().any(|s| s.symbol == symbol),
                    "{} 缺少符号 {}",
                    p.code,
                    symbol
                );
            }
        }
    }

    #[test]
    fn test_rtl_profiles_have_rtl_direction() {
        for p in PROFILES {
            assert_eq!(p.is_rtl(), p.script_family == ScriptFamily::Rtl, "{}", p.code);
        }
    }

    #[test]
    fn test_char_pattern_matches() {
        let ru = profile("ru").unwrap();
        assert!(ru.char_pattern.matches('д'));
        assert!(!ru.char_pattern.matches('d'));

        let es = profile("es").unwrap();
        assert!(es.char_pattern.matches('ñ'));
        assert!(profile("it").unwrap().char_pattern.is_empty());
    }

    #[test]
    fn test_normalize_language_tag() {
        assert_eq!(normalize_language_tag("es").map(|p| p.code), Some("es"));
        assert_eq!(normalize_language_tag("es-MX").map(|p| p.code), Some("es"));
        assert_eq!(normalize_language_tag("zh_Hans").map(|p| p.code), Some("zh"));
        assert_eq!(normalize_language_tag("Spanish").map(|p| p.code), Some("es"));
        assert_eq!(normalize_language_tag("Español").map(|p| p.code), Some("es"));
        assert_eq!(normalize_language_tag("FRA").map(|p| p.code), Some("fr"));
        assert_eq!(normalize_language_tag("Bahasa Indonesia").map(|p| p.code), Some("id"));
        assert_eq!(normalize_language_tag("русский").map(|p| p.code), Some("ru"));
        assert!(normalize_language_tag("klingon").is_none());
        assert!(normalize_language_tag("  ").is_none());
    }
}
