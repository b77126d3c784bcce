//! Response message catalog.
//!
//! Every envelope carries a numeric `code` and a human-readable `message`,
//! both looked up by a stable key (`userNotFound`, `accessDenied`, ...).
//! The locale is fixed at startup.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Key of the success entry.
pub const SUCCESS: &str = "success";

/// Key used when another key is missing from the catalog.
pub const UNKNOWN: &str = "unKnown";

struct Entry {
    key: &'static str,
    code: i32,
    message: &'static str,
}

const fn entry(key: &'static str, code: i32, message: &'static str) -> Entry {
    Entry { key, code, message }
}

const KO: &[Entry] = &[
    entry(SUCCESS, 0, "성공하였습니다."),
    entry(UNKNOWN, -9999, "알수 없는 오류가 발생하였습니다."),
    entry("userNotFound", -1000, "존재하지 않는 회원입니다."),
    entry(
        "emailSigninFailed",
        -1001,
        "계정이 존재하지 않거나 이메일 또는 비밀번호가 정확하지 않습니다.",
    ),
    entry(
        "entryPointException",
        -1002,
        "해당 리소스에 접근하기 위한 권한이 없습니다.",
    ),
    entry(
        "accessDenied",
        -1003,
        "보유한 권한으로 접근할수 없는 리소스 입니다.",
    ),
    entry("uidAlreadyTaken", -1004, "이미 가입된 아이디입니다."),
    entry("invalidRequest", -1005, "요청 값이 올바르지 않습니다."),
];

const EN: &[Entry] = &[
    entry(SUCCESS, 0, "Success."),
    entry(UNKNOWN, -9999, "An unknown error occurred."),
    entry("userNotFound", -1000, "This member does not exist."),
    entry(
        "emailSigninFailed",
        -1001,
        "Your account does not exist or your email or password is incorrect.",
    ),
    entry(
        "entryPointException",
        -1002,
        "You do not have permission to access this resource.",
    ),
    entry(
        "accessDenied",
        -1003,
        "This resource cannot be accessed with your current roles.",
    ),
    entry("uidAlreadyTaken", -1004, "This ID is already registered."),
    entry("invalidRequest", -1005, "The request is invalid."),
];

/// Supported catalog locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ko,
    En,
}

#[derive(Debug, Error)]
#[error("unsupported locale '{0}' (expected 'ko' or 'en')")]
pub struct UnknownLocale(String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" => Ok(Locale::Ko),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ko => f.write_str("ko"),
            Locale::En => f.write_str("en"),
        }
    }
}

/// Code and message lookup for one locale.
#[derive(Debug, Clone, Copy)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Numeric code for `key`, falling back to the unknown entry.
    pub fn code(&self, key: &str) -> i32 {
        self.lookup(key).code
    }

    /// Message for `key`, falling back to the unknown entry.
    pub fn message(&self, key: &str) -> &'static str {
        self.lookup(key).message
    }

    fn entries(&self) -> &'static [Entry] {
        match self.locale {
            Locale::Ko => KO,
            Locale::En => EN,
        }
    }

    fn lookup(&self, key: &str) -> &'static Entry {
        let entries = self.entries();
        entries
            .iter()
            .find(|e| e.key == key)
            .or_else(|| entries.iter().find(|e| e.key == UNKNOWN))
            .unwrap_or(&entries[0])
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_code_zero() {
        let ko = MessageCatalog::new(Locale::Ko);
        assert_eq!(ko.code(SUCCESS), 0);
        assert_eq!(ko.message(SUCCESS), "성공하였습니다.");
        assert_eq!(MessageCatalog::new(Locale::En).message(SUCCESS), "Success.");
    }

    #[test]
    fn missing_key_falls_back_to_unknown() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.code("noSuchKey"), -9999);
        assert_eq!(catalog.message("noSuchKey"), catalog.message(UNKNOWN));
    }

    #[test]
    fn locales_share_codes() {
        for (ko, en) in KO.iter().zip(EN.iter()) {
            assert_eq!(ko.key, en.key);
            assert_eq!(ko.code, en.code);
        }
        assert_eq!(KO.len(), EN.len());
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<i32> = KO.iter().map(|e| e.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), KO.len());
    }

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("KO".parse::<Locale>().unwrap(), Locale::Ko);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::En.to_string(), "en");
    }
}
