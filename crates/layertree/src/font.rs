//! Script classification and CJK font fallback.
//!
//! Text whose code points fall in a CJK block is drawn with a font family
//! known to cover that script. Which families those are depends on the
//! platform the layer tree is painted on, so they come from a
//! [`FontCatalog`] rather than from the builder itself.
//!
//! # Example
//!
//! ```
//! # use layertree::font::FontCatalog;
//! let catalog = FontCatalog::default();
//!
//! assert_eq!(catalog.resolve("Times", "任意非零倍数"), "PingFang SC");
//! assert_eq!(catalog.resolve("Helvetica", "Hello World"), "Helvetica");
//! assert_eq!(catalog.resolve("serif", "수학 공식"), "Apple SD Gothic Neo");
//! ```

use serde::Deserialize;

/// The CJK scripts found in a piece of text.
///
/// # Examples
///
/// ```
/// # use layertree::font::{CjkScript, CjkScripts};
/// let scripts = CjkScripts::classify("数学とすうがく");
/// assert!(scripts.has_han());
/// assert!(scripts.has_kana());
/// assert_eq!(scripts.primary(), Some(CjkScript::Japanese));
///
/// assert_eq!(CjkScripts::classify("plain ascii").primary(), None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CjkScripts {
    han: bool,
    han_extension_a: bool,
    kana: bool,
    hangul: bool,
}

/// The script a CJK substitution is chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CjkScript {
    Korean,
    Japanese,
    Chinese,
    /// CJK text matching none of the above, such as Extension A ideographs only
    Unclassified,
}

impl CjkScripts {
    /// Scans `text` once and records which CJK blocks it touches.
    pub fn classify(text: &str) -> Self {
        let mut scripts = Self::default();
        for c in text.chars() {
            match c {
                '\u{4E00}'..='\u{9FFF}' => scripts.han = true,
                '\u{3400}'..='\u{4DBF}' => scripts.han_extension_a = true,
                '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' => scripts.kana = true,
                '\u{AC00}'..='\u{D7AF}' => scripts.hangul = true,
                _ => {}
            }
        }
        scripts
    }

    /// CJK Unified Ideographs (U+4E00–U+9FFF)
    pub fn has_han(self) -> bool {
        self.han
    }

    /// Hiragana or Katakana (U+3040–U+30FF)
    pub fn has_kana(self) -> bool {
        self.kana
    }

    /// Hangul Syllables (U+AC00–U+D7AF)
    pub fn has_hangul(self) -> bool {
        self.hangul
    }

    /// Returns true if any CJK code point was found.
    pub fn is_cjk(self) -> bool {
        self.han || self.han_extension_a || self.kana || self.hangul
    }

    /// Picks the script to substitute for: Korean, then Japanese, then
    /// Chinese, then unclassified. `None` for text without CJK code points.
    pub fn primary(self) -> Option<CjkScript> {
        if !self.is_cjk() {
            None
        } else if self.hangul {
            Some(CjkScript::Korean)
        } else if self.kana {
            Some(CjkScript::Japanese)
        } else if self.han {
            Some(CjkScript::Chinese)
        } else {
            Some(CjkScript::Unclassified)
        }
    }
}

/// A serif and a non-serif family for one script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FontChoice {
    serif: String,
    sans: String,
}

impl FontChoice {
    pub fn new(serif: impl Into<String>, sans: impl Into<String>) -> Self {
        Self {
            serif: serif.into(),
            sans: sans.into(),
        }
    }

    /// The same family for both variants.
    pub fn uniform(family: impl Into<String>) -> Self {
        let family = family.into();
        Self {
            serif: family.clone(),
            sans: family,
        }
    }

    pub fn select(&self, serif: bool) -> &str {
        if serif { &self.serif } else { &self.sans }
    }
}

/// Platform font data used for CJK fallback.
///
/// `cjk_capable` lists substrings of family names that already cover CJK
/// text; a family containing any of them is never replaced. The remaining
/// fields give the substitute family per script.
///
/// The default is the Apple platform catalog. Every field can be overridden
/// from configuration:
///
/// ```
/// # use layertree::font::FontCatalog;
/// let catalog: FontCatalog = toml::from_str(r#"
///     cjk_capable = ["Noto Sans CJK"]
///     chinese = { serif = "Noto Serif CJK SC", sans = "Noto Sans CJK SC" }
/// "#).unwrap();
///
/// assert_eq!(catalog.resolve("Arial", "你好"), "Noto Sans CJK SC");
/// // Fields left out keep their defaults.
/// assert_eq!(catalog.resolve("Arial", "안녕"), "Apple SD Gothic Neo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontCatalog {
    cjk_capable: Vec<String>,
    korean: FontChoice,
    japanese: FontChoice,
    chinese: FontChoice,
    unclassified: FontChoice,
}

impl FontCatalog {
    pub fn new(
        cjk_capable: Vec<String>,
        korean: FontChoice,
        japanese: FontChoice,
        chinese: FontChoice,
        unclassified: FontChoice,
    ) -> Self {
        Self {
            cjk_capable,
            korean,
            japanese,
            chinese,
            unclassified,
        }
    }

    /// System fonts shipped with macOS and iOS.
    pub fn apple() -> Self {
        Self::new(
            ["PingFang", "Hiragino", "STHeiti", "Apple SD Gothic", "SF"]
                .map(String::from)
                .to_vec(),
            FontChoice::uniform("Apple SD Gothic Neo"),
            FontChoice::new("Hiragino Mincho ProN", "Hiragino Sans"),
            FontChoice::new("Songti SC", "PingFang SC"),
            FontChoice::uniform("PingFang SC"),
        )
    }

    /// Google Noto CJK families, common on Linux and Android.
    pub fn noto_cjk() -> Self {
        Self::new(
            ["Noto Sans CJK", "Noto Serif CJK", "Source Han"]
                .map(String::from)
                .to_vec(),
            FontChoice::new("Noto Serif CJK KR", "Noto Sans CJK KR"),
            FontChoice::new("Noto Serif CJK JP", "Noto Sans CJK JP"),
            FontChoice::new("Noto Serif CJK SC", "Noto Sans CJK SC"),
            FontChoice::uniform("Noto Sans CJK SC"),
        )
    }

    /// Returns true if `font_name` already names a CJK-capable family.
    pub fn is_cjk_capable(&self, font_name: &str) -> bool {
        self.cjk_capable
            .iter()
            .any(|marker| font_name.contains(marker.as_str()))
    }

    /// Returns the substitute family for `script`.
    ///
    /// The serif variant is picked when `font_name`, lowercased, contains
    /// `"serif"`. Note that this includes `sans-serif`.
    pub fn family_for(&self, script: CjkScript, font_name: &str) -> &str {
        let serif = font_name.to_lowercase().contains("serif");
        let choice = match script {
            CjkScript::Korean => &self.korean,
            CjkScript::Japanese => &self.japanese,
            CjkScript::Chinese => &self.chinese,
            CjkScript::Unclassified => &self.unclassified,
        };
        choice.select(serif)
    }

    /// Resolves the family to draw `text` with, starting from `font_name`.
    ///
    /// Text without CJK code points and fonts already able to draw CJK keep
    /// `font_name`; anything else gets the catalog's family for the text's
    /// primary script.
    pub fn resolve<'a>(&'a self, font_name: &'a str, text: &str) -> &'a str {
        let Some(script) = CjkScripts::classify(text).primary() else {
            return font_name;
        };

        if self.is_cjk_capable(font_name) {
            return font_name;
        }

        self.family_for(script, font_name)
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::apple()
    }
}
