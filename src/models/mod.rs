use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A country from the catalog. Immutable once fetched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Country {
    pub name: String,
    pub flag_url: String,
    pub region: String,
    /// language code -> display name
    pub languages: BTreeMap<String, String>,
    pub population: u64,
    pub capitals: Vec<String>,
}

impl Country {
    pub fn capital(&self) -> Option<&str> {
        self.capitals.first().map(String::as_str)
    }

    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages.values().map(String::as_str)
    }
}

/// The detail view's extended record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CountryDetail {
    pub country: Country,
    pub latlng: Option<(f64, f64)>,
    /// ISO 3166-1 alpha-2.
    pub code: Option<String>,
    /// alpha-3 codes of neighbouring countries.
    pub borders: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BorderCountry {
    pub name: String,
    pub flag_url: String,
    pub capitals: Vec<String>,
}

/// Credential record. The password is stored as typed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

/// Session-scope mirror of the signed-in user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub username: String,
    pub token: String,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Purple,
    Blue,
    Green,
    Black,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Purple => "Purple",
            Theme::Blue => "Blue",
            Theme::Green => "Green",
            Theme::Black => "Black",
        }
    }

    /// Tailwind color family used for accents.
    pub fn accent(self) -> &'static str {
        match self {
            Theme::Purple => "purple",
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Black => "gray",
        }
    }

    pub fn swatch_class(self) -> &'static str {
        match self {
            Theme::Purple => "bg-purple-600 hover:bg-purple-700",
            Theme::Blue => "bg-blue-600 hover:bg-blue-700",
            Theme::Green => "bg-green-600 hover:bg-green-700",
            Theme::Black => "bg-black hover:bg-gray-800",
        }
    }

    pub fn page_background(self, dark_mode: bool) -> &'static str {
        if !dark_mode {
            return "bg-white";
        }
        match self {
            Theme::Purple => "bg-purple-900",
            Theme::Blue => "bg-blue-900",
            Theme::Green => "bg-green-900",
            Theme::Black => "bg-black",
        }
    }
}

/// Sticky-note color. Serialized as the class string older boards stored.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumIter)]
pub enum NoteColor {
    #[default]
    #[serde(rename = "bg-blue-100 border-blue-200")]
    Blue,
    #[serde(rename = "bg-orange-100 border-orange-200")]
    Orange,
    #[serde(rename = "bg-pink-100 border-pink-200")]
    Pink,
    #[serde(rename = "bg-purple-100 border-purple-200")]
    Purple,
    #[serde(rename = "bg-green-100 border-green-200")]
    Green,
    #[serde(rename = "bg-amber-50 border-amber-100")]
    Beige,
}

impl NoteColor {
    pub fn class(self) -> &'static str {
        match self {
            NoteColor::Blue => "bg-blue-100 border-blue-200",
            NoteColor::Orange => "bg-orange-100 border-orange-200",
            NoteColor::Pink => "bg-pink-100 border-pink-200",
            NoteColor::Purple => "bg-purple-100 border-purple-200",
            NoteColor::Green => "bg-green-100 border-green-200",
            NoteColor::Beige => "bg-amber-50 border-amber-100",
        }
    }
}

fn lenient_color<'de, D>(deserializer: D) -> Result<NoteColor, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<String>::deserialize(deserializer)?;
    Ok(stored
        .and_then(|class| NoteColor::iter().find(|c| c.class() == class))
        .unwrap_or_default())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Missing or unrecognised classes read as the default color.
    #[serde(default, deserialize_with = "lenient_color")]
    pub color: NoteColor,
    /// e.g. `Oct 18`
    #[serde(default)]
    pub date: String,
    /// e.g. `02:30 PM`
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub pinned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_theme_parses_stored_values() {
        assert_eq!(Theme::from_str("blue").ok(), Some(Theme::Blue));
        assert_eq!(Theme::from_str("black").ok(), Some(Theme::Black));
        assert!(Theme::from_str("orange").is_err());
        assert_eq!(Theme::Green.to_string(), "green");
    }

    #[test]
    fn test_theme_black_uses_gray_accent() {
        assert_eq!(Theme::Black.accent(), "gray");
        assert_eq!(Theme::Black.page_background(true), "bg-black");
        assert_eq!(Theme::Black.page_background(false), "bg-white");
    }

    #[test]
    fn test_note_color_round_trips_class_strings() {
        for color in NoteColor::iter() {
            let json = serde_json::to_string(&color).expect("should serialize");
            assert_eq!(json, format!("\"{}\"", color.class()));
        }
    }

    #[test]
    fn test_note_without_stamp_fields_deserializes() {
        let json = r#"{
            "id": "1700000000000",
            "title": "Trip",
            "content": "Pack",
            "color": "bg-amber-50 border-amber-100"
        }"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert_eq!(note.color, NoteColor::Beige);
        assert!(note.date.is_empty());
        assert!(!note.pinned);
    }
}
