//! Minimal APOD response structures.
//!
//! The endpoint returns a JSON array when queried with `count`; only the
//! fields starscan needs are modeled, everything else is ignored.

use serde::Deserialize;

/// One entry of the APOD batch response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApodEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// "image" or "video"; only image entries are downloadable.
    #[serde(default)]
    pub media_type: Option<String>,
    /// Standard-resolution image URL.
    #[serde(default)]
    pub url: Option<String>,
    /// High-resolution image URL, preferred when present.
    #[serde(default)]
    pub hdurl: Option<String>,
}

impl ApodEntry {
    /// True if this entry is a downloadable image.
    pub fn is_image(&self) -> bool {
        self.media_type.as_deref() == Some("image")
    }

    /// Best available image URL: `hdurl` if present, else `url`.
    pub fn image_url(&self) -> Option<&str> {
        self.hdurl.as_deref().or(self.url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_batch_response() {
        let json = r#"[
            {"date":"2024-03-01","title":"Sombrero","media_type":"image",
             "url":"https://example.com/sombrero_small.jpg",
             "hdurl":"https://example.com/sombrero.jpg"},
            {"date":"2024-03-02","title":"A Video","media_type":"video",
             "url":"https://example.com/clip"},
            {"title":"No hd","media_type":"image","url":"https://example.com/x.png"}
        ]"#;
        let entries: Vec<ApodEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_image());
        assert!(!entries[1].is_image());
        assert_eq!(
            entries[0].image_url(),
            Some("https://example.com/sombrero.jpg")
        );
        assert_eq!(entries[2].image_url(), Some("https://example.com/x.png"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let entry: ApodEntry = serde_json::from_str("{}").unwrap();
        assert!(!entry.is_image());
        assert!(entry.image_url().is_none());
    }
}
