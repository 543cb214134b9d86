//! # Content Records
//!
//! Read-only snapshots of what the backend owns. Nothing here has behaviour
//! beyond labels and lookups; the backend creates and mutates every record.
//!
//! ```text
//! ContentItem ──contributor_id──▶ Contributor   (weak, by id)
//! Category    ──icon────────────▶ CategoryIcon  (resolved on decode)
//! Submission  ──category_id─────▶ Category      (weak, by id)
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::icons::CategoryIcon;

/// The four kinds of cultural artifact the archive holds.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Story,
    Proverb,
    Music,
    Art,
}

impl ContentKind {
    /// Tab order.
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Story,
        ContentKind::Proverb,
        ContentKind::Music,
        ContentKind::Art,
    ];

    /// URL path segment under `/content/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            ContentKind::Story => "story",
            ContentKind::Proverb => "proverb",
            ContentKind::Music => "music",
            ContentKind::Art => "art",
        }
    }

    /// Display label, which doubles as the category name for icon lookup.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Story => "Stories",
            ContentKind::Proverb => "Proverbs",
            ContentKind::Music => "Music",
            ContentKind::Art => "Art",
        }
    }

    pub fn icon(self) -> CategoryIcon {
        CategoryIcon::from_name(self.label())
    }

    /// Position in [`ContentKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ContentKind::Story => 0,
            ContentKind::Proverb => 1,
            ContentKind::Music => 2,
            ContentKind::Art => 3,
        }
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> ContentKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around.
    pub fn prev(self) -> ContentKind {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// The kind a category name browses to, if any.
    pub fn from_category(icon: CategoryIcon) -> Option<ContentKind> {
        match icon {
            CategoryIcon::Stories => Some(ContentKind::Story),
            CategoryIcon::Proverbs => Some(ContentKind::Proverb),
            CategoryIcon::Music => Some(ContentKind::Music),
            CategoryIcon::Art => Some(ContentKind::Art),
            CategoryIcon::Language | CategoryIcon::Default => None,
        }
    }
}

/// Moderation status of a record.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ContentStatus {
    pub fn label(self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Approved => "approved",
            ContentStatus::Rejected => "rejected",
        }
    }
}

/// The person credited with a content item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
}

/// A single cultural artifact.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: i64,
    /// Stamped by the service with the kind requested; whatever the backend
    /// sends under `type` is ignored.
    #[serde(rename = "type", skip_deserializing)]
    pub kind: ContentKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub featured: bool,
    /// None when the backend leaves moderation out of the record.
    #[serde(default)]
    pub status: Option<ContentStatus>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contributor_id: Option<i64>,
    #[serde(default)]
    pub contributor: Option<Contributor>,
}

impl ContentItem {
    /// Name to credit in the detail view.
    pub fn credit(&self) -> Option<&str> {
        self.contributor.as_ref().map(|c| c.name.as_str())
    }
}

/// Wire shape of a category; see [`Category`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRecord {
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

/// A display category. The icon is resolved when the record is decoded.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "CategoryRecord")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub icon: CategoryIcon,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        let icon = CategoryIcon::from_name(&record.name);
        Category {
            id: record.id,
            name: record.name,
            description: record.description,
            created_at: record.created_at,
            updated_at: record.updated_at,
            icon,
        }
    }
}

/// A cultural event listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A contribution awaiting (or past) moderation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub submitter_name: Option<String>,
    #[serde(default)]
    pub submitter_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Accepts RFC 3339, a zone-less date-time (read as UTC) or a bare date.
/// Anything else becomes None so one odd field does not sink a whole list.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::String(raw)) = value else {
        return Ok(None);
    };
    let parsed = parse_timestamp(raw.trim());
    if parsed.is_none() {
        debug!("Ignoring unparseable timestamp {:?}", raw);
    }
    Ok(parsed)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
