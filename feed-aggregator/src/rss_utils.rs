/// Helpers shared by the source readers and the writers

/// URL utilities for source identifiers
pub mod url {
    use url::Url;

    /// Extract domain from URL
    pub fn extract_domain(url_str: &str) -> Option<String> {
        if let Ok(url) = Url::parse(url_str) {
            url.domain().map(|d| d.to_string())
        } else {
            None
        }
    }

    /// File stem for a source mirror, derived from the host name.
    ///
    /// Lowercased, `www.` stripped, anything outside `[a-z0-9]` mapped to `_`.
    pub fn mirror_stem(url_str: &str) -> Option<String> {
        let url = Url::parse(url_str).ok()?;
        let host = url.host_str()?.to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);

        let stem: String = host
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();

        if stem.is_empty() {
            None
        } else {
            Some(stem)
        }
    }
}

/// Time utilities for output metadata
pub mod time {
    use chrono::{DateTime, Utc};

    /// ISO-8601 UTC timestamp with a trailing `Z`, as written to the event log
    pub fn log_timestamp(at: DateTime<Utc>) -> String {
        at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
    }

    /// RFC-822 date as used by RSS 2.0 (`Fri, 01 Mar 2024 10:00:00 +0000`)
    pub fn rfc822(at: DateTime<Utc>) -> String {
        at.format("%a, %d %b %Y %H:%M:%S %z").to_string()
    }
}
