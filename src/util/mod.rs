use chrono::{DateTime, Local, TimeZone};

/// Creation stamp for a note: the id source plus its display date and time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteStamp {
    pub millis: i64,
    pub date: String,
    pub time: String,
}

impl NoteStamp {
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            millis: at.timestamp_millis(),
            date: at.format("%b %-d").to_string(),
            time: at.format("%I:%M %p").to_string(),
        }
    }
}

/// Opaque placeholder token for the session mirror. Not a credential.
pub(crate) fn session_token() -> String {
    let mut bytes = [0u8; 16];
    if getrandom::getrandom(&mut bytes).is_err() {
        return format!("session-{}", Local::now().timestamp_millis());
    }
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// `67391582` -> `67,391,582`
pub(crate) fn format_population(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub(crate) fn google_search_url(country: &str) -> String {
    format!("https://www.google.com/search?q={}", urlencoding::encode(country))
}

pub(crate) fn google_maps_url(country: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(country)
    )
}

pub(crate) fn wikipedia_url(country: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", urlencoding::encode(country))
}

pub(crate) fn country_path(name: &str) -> String {
    format!("/country/{}", urlencoding::encode(name))
}
