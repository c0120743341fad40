//! 文字规范化
//!
//! 把任意文字的候选标识符转为 ASCII 安全的字符串。每个文字族一个分支，
//! 所有分支最后都经过通用音译兜底（deunicode），因此规范化永不失败。

use std::iter;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::identifier::profiles::{LanguageProfile, ScriptFamily};
use crate::identifier::translit;

/// 书写方向控制符：永远不会出现在标识符里
const DIRECTIONAL_MARKS: &[char] = &[
    '\u{200E}', '\u{200F}', '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}', '\u{2066}',
    '\u{2067}', '\u{2068}', '\u{2069}', '\u{061C}', '\u{200C}', '\u{200D}', '\u{FEFF}',
];

/// 首个强字符隔离（FSI）/ 隔离结束（PDI）
const FIRST_STRONG_ISOLATE: char = '\u{2068}';
const POP_DIRECTIONAL_ISOLATE: char = '\u{2069}';

/// 阿拉伯延长符
const TATWEEL: char = '\u{0640}';

/// 文字规范化器
pub struct ScriptNormalizer;

impl ScriptNormalizer {
    /// 规范化为 ASCII 候选串
    pub fn normalize(text: &str, profile: &LanguageProfile) -> String {
        let prepared = prepare(text).to_lowercase();

        let transliterated = match profile.script_family {
            ScriptFamily::Latin => latin(&prepared),
            ScriptFamily::Cyrillic => cyrillic(&prepared, profile.code == "uk"),
            ScriptFamily::Greek => greek(&prepared),
            ScriptFamily::Cjk => cjk(&prepared),
            ScriptFamily::Indic => indic(&prepared),
            ScriptFamily::Thai => thai(&prepared),
            ScriptFamily::Vietnamese => vietnamese(&prepared),
            ScriptFamily::Rtl => rtl(&prepared),
        };

        let result = ascii_fallback(&transliterated);
        tracing::debug!(
            "Script: lang={}, family={:?}, '{}' -> '{}'",
            profile.code,
            profile.script_family,
            text,
            result
        );
        result
    }

    /// 仅用于展示：RTL 文本加隔离符，避免与周围 LTR 文本混排错乱
    pub fn wrap_for_display(text: &str, profile: &LanguageProfile) -> String {
        if profile.is_rtl() {
            format!("{}{}{}", FIRST_STRONG_ISOLATE, text, POP_DIRECTIONAL_ISOLATE)
        } else {
            text.to_string()
        }
    }
}

/// 所有分支共用的预处理：NFKC（全角折叠）、去方向控制符、统一文字标点
fn prepare(text: &str) -> String {
    text.nfkc()
        .filter(|c| !DIRECTIONAL_MARKS.contains(c))
        .map(|c| match c {
            '。' | '｡' | '・' | '٫' | '۔' => '.',
            '‐' | '‑' | '‒' | '–' | '—' | '−' | '－' => '-',
            '،' => ',',
            '؛' => ';',
            '؟' => '?',
            _ => c,
        })
        .collect()
}

fn is_latin_letter(ch: char) -> bool {
    let code = ch as u32;
    ch.is_alphabetic() && (code < 0x0250 || (0x1E00..=0x1EFF).contains(&code))
}

/// 拉丁字母去变音
fn push_latin(out: &mut String, ch: char) {
    if let Some(s) = translit::latin_special(ch) {
        out.push_str(s);
    } else if is_latin_letter(ch) {
        out.extend(iter::once(ch).nfd().filter(|c| !is_combining_mark(*c)));
    } else {
        out.push(ch);
    }
}

fn latin(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_latin(&mut out, ch);
    }
    out
}

fn vietnamese(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match translit::vietnamese_base(ch) {
            Some(base) => out.push(base),
            None => push_latin(&mut out, ch),
        }
    }
    out
}

fn cyrillic(text: &str, ukrainian: bool) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let mapped = if ukrainian {
            translit::cyrillic_uk(ch)
        } else {
            translit::cyrillic(ch)
        };
        match mapped {
            Some(s) => out.push_str(s),
            None => push_latin(&mut out, ch),
        }
    }
    out
}

fn greek(text: &str) -> String {
    // 先去掉重音与分音符
    let chars: Vec<char> = text
        .chars()
        .flat_map(|ch| {
            let code = ch as u32;
            let is_greek = (0x0370..=0x03FF).contains(&code) || (0x1F00..=0x1FFF).contains(&code);
            let decomposed: Vec<char> = if is_greek {
                iter::once(ch).nfd().filter(|c| !is_combining_mark(*c)).collect()
            } else {
                vec![ch]
            };
            decomposed
        })
        .collect();

    let mut out = String::with_capacity(text.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == 'ο' && chars.get(i + 1) == Some(&'υ') {
            out.push_str("ou");
            i += 2;
            continue;
        }
        match translit::greek(ch) {
            Some(s) => out.push_str(s),
            None => push_latin(&mut out, ch),
        }
        i += 1;
    }
    out
}

fn cjk(text: &str) -> String {
    use pinyin::ToPinyin;

    let chars: Vec<char> = text.chars().map(translit::katakana_to_hiragana).collect();
    let mut out = String::with_capacity(text.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        // 促音：双写下一个假名的辅音
        if translit::is_sokuon(ch) {
            if let Some(next) = chars.get(i + 1).and_then(|c| translit::kana(*c)) {
                if let Some(first) = next.chars().next().filter(|c| !"aiueo".contains(*c)) {
                    out.push(first);
                }
            }
            i += 1;
            continue;
        }

        // 长音符：重复前一个元音
        if translit::is_long_vowel_mark(ch) {
            if let Some(last) = out.chars().last().filter(|c| "aiueo".contains(*c)) {
                out.push(last);
            }
            i += 1;
            continue;
        }

        if let Some(base) = translit::kana(ch) {
            let small = chars
                .get(i + 1)
                .filter(|c| translit::is_small_ya(**c))
                .and_then(|c| translit::kana(*c));
            match small {
                // 拗音："きょ" → "kyo"，"しょ" → "sho"
                Some(small) if base.len() > 1 && base.ends_with('i') => {
                    let stem = &base[..base.len() - 1];
                    if matches!(base, "shi" | "chi" | "ji") {
                        out.push_str(stem);
                        out.push_str(&small[1..]);
                    } else {
                        out.push_str(stem);
                        out.push_str(small);
                    }
                    i += 2;
                }
                _ => {
                    out.push_str(base);
                    i += 1;
                }
            }
            continue;
        }

        if let Some(syllable) = translit::hangul_syllable(ch) {
            out.push_str(&syllable);
        } else if let Some(pinyin) = ch.to_pinyin() {
            out.push_str(pinyin.plain());
        } else {
            push_latin(&mut out, ch);
        }
        i += 1;
    }
    out
}

fn indic(text: &str) -> String {
    // 去掉 nukta 与 chandrabindu
    let chars: Vec<char> = text
        .chars()
        .filter(|c| !matches!(*c, '\u{093C}' | '\u{0901}'))
        .map(|c| translit::native_digit(c).unwrap_or(c))
        .collect();
    let is_devanagari = |c: char| ('\u{0900}'..='\u{097F}').contains(&c);

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if let Some(consonant) = translit::devanagari_consonant(ch) {
            out.push_str(consonant);
            match chars.get(i + 1).copied() {
                Some(translit::DEVANAGARI_VIRAMA) => {
                    i += 2;
                    continue;
                }
                Some(next) => {
                    if let Some(sign) = translit::devanagari_vowel_sign(next) {
                        out.push_str(sign);
                        i += 2;
                        continue;
                    }
                    // 词中保留固有元音，词尾省略
                    if is_devanagari(next) {
                        out.push('a');
                    }
                }
                None => {}
            }
        } else if let Some(vowel) = translit::devanagari_vowel(ch) {
            out.push_str(vowel);
        } else {
            match ch {
                '\u{0902}' => out.push('n'),
                '\u{0903}' => out.push('h'),
                translit::DEVANAGARI_VIRAMA => {}
                _ => out.push(ch),
            }
        }
        i += 1;
    }
    out
}

fn thai(text: &str) -> String {
    text.chars()
        .filter(|c| !('\u{0E47}'..='\u{0E4E}').contains(c))
        .map(|c| translit::native_digit(c).unwrap_or(c))
        .collect()
}

fn rtl(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if let Some(digit) = translit::native_digit(ch) {
            out.push(digit);
            continue;
        }
        // 延长符、阿拉伯语短元音符号、希伯来语点符
        let code = ch as u32;
        if ch == TATWEEL
            || (0x064B..=0x065F).contains(&code)
            || code == 0x0670
            || (0x0591..=0x05C7).contains(&code)
        {
            continue;
        }

        let ch = translit::hebrew_canonical(translit::arabic_canonical(ch));
        match translit::arabic(ch).or_else(|| translit::hebrew(ch)) {
            Some(s) => out.push_str(s),
            None => out.push(ch),
        }
    }
    out
}

/// 通用兜底：ASCII 原样保留（去空白与引号），其余字符走 deunicode
fn ascii_fallback(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() {
            if ch.is_ascii_whitespace() || ch.is_ascii_control() || matches!(ch, '\'' | '"' | '`')
            {
                continue;
            }
            out.push(ch.to_ascii_lowercase());
        } else if let Some(ascii) = deunicode::deunicode_char(ch) {
            out.extend(
                ascii
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase()),
            );
        }
    }
    out
}
