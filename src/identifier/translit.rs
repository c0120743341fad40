//! 音译表
//!
//! 各文字到 ASCII 的固定映射（有损）。输入均为小写形式。

/// 拉丁字母中不能通过 NFD 分解的特殊字母
pub fn latin_special(ch: char) -> Option<&'static str> {
    let s = match ch {
        'ß' => "ss",
        'æ' => "ae",
        'ø' => "o",
        'œ' => "oe",
        'ł' => "l",
        'đ' => "d",
        'ı' => "i",
        'þ' => "th",
        'ð' => "d",
        'ŋ' => "ng",
        _ => return None,
    };
    Some(s)
}

/// 西里尔字母（俄语为基准）
pub fn cyrillic(ch: char) -> Option<&'static str> {
    let s = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // 乌克兰语 / 白俄罗斯语 / 塞尔维亚语
        'і' => "i",
        'ї' => "yi",
        'є' => "ye",
        'ґ' => "g",
        'ў' => "u",
        'ђ' => "dj",
        'ј' => "j",
        'љ' => "lj",
        'њ' => "nj",
        'ћ' => "c",
        'џ' => "dz",
        _ => return None,
    };
    Some(s)
}

/// 乌克兰语覆盖项
pub fn cyrillic_uk(ch: char) -> Option<&'static str> {
    match ch {
        'г' => Some("h"),
        'и' => Some("y"),
        'й' => Some("i"),
        _ => cyrillic(ch),
    }
}

/// 希腊字母（已去掉重音）
pub fn greek(ch: char) -> Option<&'static str> {
    let s = match ch {
        'α' => "a",
        'β' => "v",
        'γ' => "g",
        'δ' => "d",
        'ε' => "e",
        'ζ' => "z",
        'η' => "i",
        'θ' => "th",
        'ι' => "i",
        'κ' => "k",
        'λ' => "l",
        'μ' => "m",
        'ν' => "n",
        'ξ' => "x",
        'ο' => "o",
        'π' => "p",
        'ρ' => "r",
        'σ' | 'ς' => "s",
        'τ' => "t",
        'υ' => "y",
        'φ' => "f",
        'χ' => "ch",
        'ψ' => "ps",
        'ω' => "o",
        _ => return None,
    };
    Some(s)
}

/// 平假名（片假名先平移到平假名）
pub fn kana(ch: char) -> Option<&'static str> {
    let s = match ch {
        'あ' | 'ぁ' => "a",
        'い' | 'ぃ' | 'ゐ' => "i",
        'う' | 'ぅ' => "u",
        'え' | 'ぇ' | 'ゑ' => "e",
        'お' | 'ぉ' | 'を' => "o",
        'か' => "ka",
        'き' => "ki",
        'く' => "ku",
        'け' => "ke",
        'こ' => "ko",
        'さ' => "sa",
        'し' => "shi",
        'す' => "su",
        'せ' => "se",
        'そ' => "so",
        'た' => "ta",
        'ち' => "chi",
        'つ' => "tsu",
        'て' => "te",
        'と' => "to",
        'な' => "na",
        'に' => "ni",
        'ぬ' => "nu",
        'ね' => "ne",
        'の' => "no",
        'は' => "ha",
        'ひ' => "hi",
        'ふ' => "fu",
        'へ' => "he",
        'ほ' => "ho",
        'ま' => "ma",
        'み' => "mi",
        'む' => "mu",
        'め' => "me",
        'も' => "mo",
        'や' | 'ゃ' => "ya",
        'ゆ' | 'ゅ' => "yu",
        'よ' | 'ょ' => "yo",
        'ら' => "ra",
        'り' => "ri",
        'る' => "ru",
        'れ' => "re",
        'ろ' => "ro",
        'わ' | 'ゎ' => "wa",
        'ん' => "n",
        'が' => "ga",
        'ぎ' => "gi",
        'ぐ' => "gu",
        'げ' => "ge",
        'ご' => "go",
        'ざ' => "za",
        'じ' | 'ぢ' => "ji",
        'ず' | 'づ' => "zu",
        'ぜ' => "ze",
        'ぞ' => "zo",
        'だ' => "da",
        'で' => "de",
        'ど' => "do",
        'ば' => "ba",
        'び' => "bi",
        'ぶ' => "bu",
        'べ' => "be",
        'ぼ' => "bo",
        'ぱ' => "pa",
        'ぴ' => "pi",
        'ぷ' => "pu",
        'ぺ' => "pe",
        'ぽ' => "po",
        'ゔ' => "vu",
        _ => return None,
    };
    Some(s)
}

/// 片假名 → 平假名（仅常规区间）
pub fn katakana_to_hiragana(ch: char) -> char {
    if ('\u{30A1}'..='\u{30F6}').contains(&ch) {
        char::from_u32(ch as u32 - 0x60).unwrap_or(ch)
    } else {
        ch
    }
}

/// 拗音小字
pub fn is_small_ya(ch: char) -> bool {
    matches!(ch, 'ゃ' | 'ゅ' | 'ょ')
}

/// 促音
pub fn is_sokuon(ch: char) -> bool {
    matches!(ch, 'っ' | 'ッ')
}

/// 长音符
pub fn is_long_vowel_mark(ch: char) -> bool {
    matches!(ch, 'ー' | 'ｰ')
}

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;

const HANGUL_INITIALS: [&str; 19] = [
    "g", "kk", "n", "d", "tt", "r", "m", "b", "pp", "s", "ss", "", "j", "jj", "ch", "k", "t", "p",
    "h",
];

const HANGUL_MEDIALS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa", "wae", "oe", "yo", "u", "wo", "we",
    "wi", "yu", "eu", "ui", "i",
];

const HANGUL_FINALS: [&str; 28] = [
    "", "k", "k", "k", "n", "n", "n", "t", "l", "k", "m", "l", "l", "l", "p", "l", "m", "p", "p",
    "t", "t", "ng", "t", "t", "k", "t", "p", "t",
];

/// 韩文音节罗马化（国语罗马字，按音节独立转写）
pub fn hangul_syllable(ch: char) -> Option<String> {
    let code = ch as u32;
    if !(HANGUL_BASE..=HANGUL_LAST).contains(&code) {
        return None;
    }
    let index = code - HANGUL_BASE;
    let initial = (index / (21 * 28)) as usize;
    let medial = ((index % (21 * 28)) / 28) as usize;
    let fin = (index % 28) as usize;

    Some(format!(
        "{}{}{}",
        HANGUL_INITIALS[initial], HANGUL_MEDIALS[medial], HANGUL_FINALS[fin]
    ))
}

/// 越南语元音（含声调）→ 基础元音
pub fn vietnamese_base(ch: char) -> Option<char> {
    const TABLE: &[(&str, char)] = &[
        ("àáảãạăằắẳẵặâầấẩẫậ", 'a'),
        ("èéẻẽẹêềếểễệ", 'e'),
        ("ìíỉĩị", 'i'),
        ("òóỏõọôồốổỗộơờớởỡợ", 'o'),
        ("ùúủũụưừứửữự", 'u'),
        ("ỳýỷỹỵ", 'y'),
        ("đ", 'd'),
    ];
    TABLE
        .iter()
        .find(|(variants, _)| variants.contains(ch))
        .map(|(_, base)| *base)
}

/// 阿拉伯/波斯字母变体归一
pub fn arabic_canonical(ch: char) -> char {
    match ch {
        'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
        'ى' | 'ی' | 'ئ' => 'ي',
        'ؤ' => 'و',
        'ة' | 'ۀ' => 'ه',
        'ک' => 'ك',
        _ => ch,
    }
}

/// 希伯来语词尾字母归一
pub fn hebrew_canonical(ch: char) -> char {
    match ch {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        _ => ch,
    }
}

/// 阿拉伯/波斯字母（已归一）
pub fn arabic(ch: char) -> Option<&'static str> {
    let s = match ch {
        'ا' => "a",
        'ب' => "b",
        'ت' => "t",
        'ث' => "th",
        'ج' => "j",
        'ح' => "h",
        'خ' => "kh",
        'د' => "d",
        'ذ' => "dh",
        'ر' => "r",
        'ز' => "z",
        'س' => "s",
        'ش' => "sh",
        'ص' => "s",
        'ض' => "d",
        'ط' => "t",
        'ظ' => "z",
        'ع' | 'ء' => "",
        'غ' => "gh",
        'ف' => "f",
        'ق' => "q",
        'ك' => "k",
        'ل' => "l",
        'م' => "m",
        'ن' => "n",
        'ه' => "h",
        'و' => "w",
        'ي' => "y",
        'پ' => "p",
        'چ' => "ch",
        'ژ' => "zh",
        'گ' => "g",
        'ڤ' => "v",
        _ => return None,
    };
    Some(s)
}

/// 希伯来字母（已归一）
pub fn hebrew(ch: char) -> Option<&'static str> {
    let s = match ch {
        'א' | 'ע' => "",
        'ב' => "b",
        'ג' => "g",
        'ד' => "d",
        'ה' => "h",
        'ו' => "v",
        'ז' => "z",
        'ח' => "ch",
        'ט' => "t",
        'י' => "y",
        'כ' => "k",
        'ל' => "l",
        'מ' => "m",
        'נ' => "n",
        'ס' => "s",
        'פ' => "p",
        'צ' => "ts",
        'ק' => "k",
        'ר' => "r",
        'ש' => "sh",
        'ת' => "t",
        _ => return None,
    };
    Some(s)
}

/// 天城文辅音（不含固有元音）
pub fn devanagari_consonant(ch: char) -> Option<&'static str> {
    let s = match ch {
        'क' => "k",
        'ख' => "kh",
        'ग' => "g",
        'घ' => "gh",
        'ङ' | 'ञ' | 'ण' | 'न' => "n",
        'च' => "ch",
        'छ' => "chh",
        'ज' => "j",
        'झ' => "jh",
        'ट' | 'त' => "t",
        'ठ' | 'थ' => "th",
        'ड' | 'द' => "d",
        'ढ' | 'ध' => "dh",
        'प' => "p",
        'फ' => "ph",
        'ब' => "b",
        'भ' => "bh",
        'म' => "m",
        'य' => "y",
        'र' => "r",
        'ल' => "l",
        'व' => "v",
        'श' | 'ष' => "sh",
        'स' => "s",
        'ह' => "h",
        _ => return None,
    };
    Some(s)
}

/// 天城文独立元音
pub fn devanagari_vowel(ch: char) -> Option<&'static str> {
    let s = match ch {
        'अ' | 'आ' => "a",
        'इ' | 'ई' => "i",
        'उ' | 'ऊ' => "u",
        'ऋ' => "ri",
        'ए' => "e",
        'ऐ' => "ai",
        'ओ' | 'ऑ' => "o",
        'औ' => "au",
        _ => return None,
    };
    Some(s)
}

/// 天城文元音符号
pub fn devanagari_vowel_sign(ch: char) -> Option<&'static str> {
    let s = match ch {
        'ा' => "a",
        'ि' | 'ी' => "i",
        'ु' | 'ू' => "u",
        'ृ' => "ri",
        'े' | 'ॅ' => "e",
        'ै' => "ai",
        'ो' | 'ॉ' => "o",
        'ौ' => "au",
        _ => return None,
    };
    Some(s)
}

/// 天城文半音符（virama）
pub const DEVANAGARI_VIRAMA: char = '\u{094D}';

/// 各文字的本地数字 → ASCII 数字
pub fn native_digit(ch: char) -> Option<char> {
    let code = ch as u32;
    let zero = match code {
        0x0660..=0x0669 => 0x0660, // 阿拉伯-印度数字
        0x06F0..=0x06F9 => 0x06F0, // 扩展（波斯）数字
        0x0966..=0x096F => 0x0966, // 天城文数字
        0x0E50..=0x0E59 => 0x0E50, // 泰文数字
        _ => return None,
    };
    char::from_digit(code - zero, 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hangul_syllables() {
        assert_eq!(hangul_syllable('김').as_deref(), Some("gim"));
        assert_eq!(hangul_syllable('민').as_deref(), Some("min"));
        assert_eq!(hangul_syllable('수').as_deref(), Some("su"));
        assert_eq!(hangul_syllable('한').as_deref(), Some("han"));
        assert!(hangul_syllable('a').is_none());
    }

    #[test]
    fn test_katakana_shift() {
        assert_eq!(katakana_to_hiragana('タ'), 'た');
        assert_eq!(katakana_to_hiragana('a'), 'a');
    }

    #[test]
    fn test_native_digits() {
        assert_eq!(native_digit('٢'), Some('2'));
        assert_eq!(native_digit('۴'), Some('4'));
        assert_eq!(native_digit('७'), Some('7'));
        assert_eq!(native_digit('๕'), Some('5'));
        assert_eq!(native_digit('5'), None);
    }

    #[test]
    fn test_vietnamese_base() {
        assert_eq!(vietnamese_base('ễ'), Some('e'));
        assert_eq!(vietnamese_base('ư'), Some('u'));
        assert_eq!(vietnamese_base('đ'), Some('d'));
        assert_eq!(vietnamese_base('x'), None);
    }

    #[test]
    fn test_letter_variants() {
        assert_eq!(arabic_canonical('أ'), 'ا');
        assert_eq!(arabic_canonical('ی'), 'ي');
        assert_eq!(hebrew_canonical('ם'), 'מ');
    }
}
