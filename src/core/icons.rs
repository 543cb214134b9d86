//! Category name → icon lookup.
//!
//! Category names come from the backend as free text. They are narrowed to a
//! closed set here so the renderer only ever deals with known symbols.

/// Closed set of category icons. Anything unrecognized is `Default`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryIcon {
    Stories,
    Proverbs,
    Music,
    Art,
    Language,
    #[default]
    Default,
}

impl CategoryIcon {
    /// Looks up the icon for a category display name.
    ///
    /// Surrounding whitespace and ASCII case are ignored.
    pub fn from_name(name: &str) -> CategoryIcon {
        let name = name.trim();
        [
            ("stories", CategoryIcon::Stories),
            ("proverbs", CategoryIcon::Proverbs),
            ("music", CategoryIcon::Music),
            ("art", CategoryIcon::Art),
            ("language", CategoryIcon::Language),
        ]
        .into_iter()
        .find(|(key, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, icon)| icon)
        .unwrap_or_default()
    }

    /// Terminal glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::Stories => "📖",
            CategoryIcon::Proverbs => "💬",
            CategoryIcon::Music => "🎵",
            CategoryIcon::Art => "🎨",
            CategoryIcon::Language => "🗣",
            CategoryIcon::Default => "📁",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryIcon::Stories => "Stories",
            CategoryIcon::Proverbs => "Proverbs",
            CategoryIcon::Music => "Music",
            CategoryIcon::Art => "Art",
            CategoryIcon::Language => "Language",
            CategoryIcon::Default => "Other",
        }
    }
}

impl From<&str> for CategoryIcon {
    fn from(name: &str) -> Self {
        CategoryIcon::from_name(name)
    }
}
