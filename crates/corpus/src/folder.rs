use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static FOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})_([0-9]{2})([0-9]{2})(?:_(.+))?$")
        .expect("valid folder regex")
});

/// A parsed `YYYY-MM-DD_HHMM[_slug]` meeting folder name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName {
    date: String,
    hour: String,
    minute: String,
    slug: Option<String>,
}

impl FolderName {
    /// Parse a folder name; `None` when it does not follow the naming convention
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let caps = FOLDER_RE.captures(name)?;
        Some(Self {
            date: caps[1].to_string(),
            hour: caps[2].to_string(),
            minute: caps[3].to_string(),
            slug: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    /// The `YYYY-MM-DD` part as written
    #[must_use]
    pub fn date_str(&self) -> &str {
        &self.date
    }

    /// Calendar date, if the digits form a real date
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// `2026-02-13 15:01 — Quarterly Planning`, or `2026-02-16 14:33` without a slug
    #[must_use]
    pub fn display_name(&self) -> String {
        let stamp = format!("{} {}:{}", self.date, self.hour, self.minute);
        match &self.slug {
            Some(slug) => format!("{stamp} — {}", title_case(&slug.replace('-', " "))),
            None => stamp,
        }
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
