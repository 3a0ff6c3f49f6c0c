//! Requested representation format.

use std::fmt;

/// Resource stem every snapshot representation is served under.
pub const RESOURCE_STEM: &str = "stocks";

/// Closed set of representation formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `text/xml` document.
    Xml,
    /// `application/json` document.
    Json,
}

impl Format {
    /// Resolve a format from a file-extension-like suffix (without the dot).
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "xml" => Some(Self::Xml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Resolve a format from a request path such as `/stocks.xml`.
    ///
    /// Only the `stocks` resource is recognized; any other stem, a missing
    /// suffix or an unknown suffix yields `None`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let resource = path.strip_prefix('/').unwrap_or(path);
        let (stem, extension) = resource.rsplit_once('.')?;
        if stem != RESOURCE_STEM {
            return None;
        }
        Self::from_extension(extension)
    }

    /// Media type sent as `Content-Type`.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Xml => "text/xml",
            Self::Json => "application/json",
        }
    }

    /// Suffix that selects this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/stocks.xml" => Some(Format::Xml); "xml")]
    #[test_case("/stocks.json" => Some(Format::Json); "json")]
    #[test_case("stocks.json" => Some(Format::Json); "no leading slash")]
    #[test_case("/stocks.csv" => None; "unknown suffix")]
    #[test_case("/stocks" => None; "no suffix")]
    #[test_case("/stocks.XML" => None; "suffix is case sensitive")]
    #[test_case("/quotes.xml" => None; "other resource")]
    #[test_case("/stocks.xml.json" => None; "double suffix")]
    fn resolves_format_from_path(path: &str) -> Option<Format> {
        Format::from_path(path)
    }

    #[test]
    fn media_types_match_suffix() {
        assert_eq!(Format::Xml.media_type(), "text/xml");
        assert_eq!(Format::Json.media_type(), "application/json");
    }

    #[test]
    fn display_is_extension() {
        assert_eq!(Format::Xml.to_string(), "xml");
        assert_eq!(Format::Json.to_string(), "json");
    }
}
