// Copyright (c) 2026 rezky_nightky

use unicode_width::UnicodeWidthChar;

/// The classic glyph pool.
pub const CATRIX_GLYPHS: &str = ":-=0123456789!@#$%&#$[]|<>?ODUCQAB";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Charset(u32);

impl Charset {
    pub const CATRIX: Charset = Charset(0x1);
    pub const ENGLISH_LETTERS: Charset = Charset(0x2);
    pub const ENGLISH_DIGITS: Charset = Charset(0x4);
    pub const ENGLISH_PUNCTUATION: Charset = Charset(0x8);
    pub const BINARY: Charset = Charset(0x10);
    pub const HEX: Charset = Charset(0x20);
    pub const GREEK: Charset = Charset(0x40);
    pub const CYRILLIC: Charset = Charset(0x80);
    pub const DNA: Charset = Charset(0x100);

    pub const ASCII: Charset = Charset(0xE);

    pub fn contains(self, other: Charset) -> bool {
        (self.0 & other.0) != 0
    }
}

pub const CHARSET_NAMES: &[(&str, &str)] = &[
    ("catrix", "Digits, punctuation and a few capitals (default)"),
    ("ascii", "Letters + digits + punctuation"),
    ("english", "Letters only"),
    ("digits", "Digits only (aliases: dec, decimal)"),
    ("punc", "Punctuation only"),
    ("binary", "0 and 1 (aliases: bin, 01)"),
    ("hex", "0-9 and A-F (alias: hexadecimal)"),
    ("greek", "Greek capitals and small letters"),
    ("cyrillic", "Cyrillic"),
    ("dna", "DNA bases (ACGT)"),
];

pub fn charset_from_str(spec: &str) -> Result<Charset, String> {
    let spec = spec.trim().to_ascii_lowercase();
    match spec.as_str() {
        "catrix" | "default" => Ok(Charset::CATRIX),
        "ascii" => Ok(Charset::ASCII),
        "english" => Ok(Charset::ENGLISH_LETTERS),
        "digits" | "dec" | "decimal" => Ok(Charset::ENGLISH_DIGITS),
        "punc" => Ok(Charset::ENGLISH_PUNCTUATION),
        "bin" | "binary" | "01" => Ok(Charset::BINARY),
        "hex" | "hexadecimal" => Ok(Charset::HEX),
        "greek" => Ok(Charset::GREEK),
        "cyrillic" => Ok(Charset::CYRILLIC),
        "dna" => Ok(Charset::DNA),
        _ => Err(format!(
            "unsupported charset: {} (see --list-charsets)",
            spec
        )),
    }
}

/// Every glyph occupies exactly one terminal cell and is followed by a space
/// on screen, so control, whitespace, zero-width and double-width characters
/// are rejected.
pub fn parse_user_chars(s: &str) -> Result<Vec<char>, String> {
    let mut out = Vec::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_control() || ch.is_whitespace() {
            return Err(format!(
                "--chars: unprintable character {:?} at index {}",
                ch,
                i + 1
            ));
        }
        if UnicodeWidthChar::width(ch) != Some(1) {
            return Err(format!(
                "--chars: character {:?} at index {} is not one column wide",
                ch,
                i + 1
            ));
        }
        if !out.contains(&ch) {
            out.push(ch);
        }
    }
    if out.is_empty() {
        return Err("--chars: no characters given".to_string());
    }
    Ok(out)
}

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    for v in start..=end {
        if let Some(ch) = char::from_u32(v) {
            out.push(ch);
        }
    }
}

pub fn build_chars(charset: Charset) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();

    if charset.contains(Charset::CATRIX) {
        out.extend(CATRIX_GLYPHS.chars());
    }
    if charset.contains(Charset::BINARY) {
        push_range(&mut out, 0x30, 0x31);
    }
    if charset.contains(Charset::HEX) {
        push_range(&mut out, 0x30, 0x39);
        push_range(&mut out, 0x41, 0x46);
    }
    if charset.contains(Charset::ENGLISH_LETTERS) {
        push_range(&mut out, 0x41, 0x5A);
        push_range(&mut out, 0x61, 0x7A);
    }
    if charset.contains(Charset::ENGLISH_DIGITS) {
        push_range(&mut out, 0x30, 0x39);
    }
    if charset.contains(Charset::ENGLISH_PUNCTUATION) {
        push_range(&mut out, 0x21, 0x2F);
        push_range(&mut out, 0x3A, 0x40);
        push_range(&mut out, 0x5B, 0x60);
        push_range(&mut out, 0x7B, 0x7E);
    }
    if charset.contains(Charset::GREEK) {
        push_range(&mut out, 0x0391, 0x03A1);
        push_range(&mut out, 0x03A3, 0x03A9);
        push_range(&mut out, 0x03B1, 0x03C9);
    }
    if charset.contains(Charset::CYRILLIC) {
        push_range(&mut out, 0x0410, 0x044F);
    }
    if charset.contains(Charset::DNA) {
        out.extend("ACGT".chars());
    }

    if out.is_empty() {
        out.push('0');
        out.push('1');
    }

    out
}

pub fn print_list_charsets() {
    println!("AVAILABLE CHARSET PRESETS:");
    println!();
    println!("VALUE        DESCRIPTION");
    for (name, desc) in CHARSET_NAMES {
        println!("{:<12} {}", name, desc);
    }
}
