//! Document formats accepted by the converter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ConversionError;

/// One of the eight formats exposed by the `convert_contents` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Markdown,
    Html,
    Pdf,
    Docx,
    Rst,
    Latex,
    Epub,
    Txt,
}

impl Format {
    /// All supported formats, in the order they are advertised to clients.
    pub const ALL: [Format; 8] = [
        Format::Markdown,
        Format::Html,
        Format::Pdf,
        Format::Docx,
        Format::Rst,
        Format::Latex,
        Format::Epub,
        Format::Txt,
    ];

    /// Check whether `name` is one of the supported format names.
    pub fn is_supported(name: &str) -> bool {
        Self::ALL.iter().any(|f| f.as_str() == name)
    }

    /// The format name as used in tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Rst => "rst",
            Self::Latex => "latex",
            Self::Epub => "epub",
            Self::Txt => "txt",
        }
    }

    /// File extension for scratch files holding this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Latex => "tex",
            other => other.as_str(),
        }
    }

    /// Pandoc reader name passed after `-f`.
    ///
    /// Pandoc has no plain-text reader; plain text is read as markdown.
    pub fn pandoc_reader(self) -> &'static str {
        match self {
            Self::Txt => "markdown",
            other => other.as_str(),
        }
    }

    /// Pandoc writer name passed after `-t`.
    ///
    /// PDF is produced by the LaTeX writer plus a `.pdf` output path.
    pub fn pandoc_writer(self) -> &'static str {
        match self {
            Self::Txt => "plain",
            Self::Pdf => "latex",
            other => other.as_str(),
        }
    }

    /// Output formats the tool refuses to produce without an `output_file`.
    pub fn requires_output_file(self) -> bool {
        matches!(
            self,
            Self::Pdf | Self::Docx | Self::Epub | Self::Latex | Self::Rst
        )
    }

    /// Binary outputs that cannot be captured from stdout.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Pdf | Self::Docx | Self::Epub)
    }

    /// Output formats that honour `--include-after-body`.
    pub fn accepts_footer(self) -> bool {
        matches!(self, Self::Docx | Self::Pdf | Self::Html)
    }

    /// Extension a destination must carry for Pandoc to produce this format.
    ///
    /// With the LaTeX writer, only a `.pdf` output path triggers PDF
    /// rendering; any other name gets LaTeX source.
    pub fn required_extension(self) -> Option<&'static str> {
        match self {
            Self::Pdf => Some("pdf"),
            _ => None,
        }
    }

    /// Pandoc can write PDF but cannot read it.
    pub fn is_readable(self) -> bool {
        self != Self::Pdf
    }
}

impl FromStr for Format {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConversionError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for format in Format::ALL {
            assert_eq!(format.as_str().parse::<Format>().unwrap(), format);
            assert!(Format::is_supported(format.as_str()));
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "xml".parse::<Format>().unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedFormat(ref name) if name == "xml"));
        assert!(!Format::is_supported("xml"));
        assert!(!Format::is_supported("Markdown"));
        assert!(!Format::is_supported(""));
    }

    #[test]
    fn test_file_mandatory_set() {
        let mandatory: Vec<_> = Format::ALL
            .into_iter()
            .filter(|f| f.requires_output_file())
            .collect();
        assert_eq!(
            mandatory,
            vec![Format::Pdf, Format::Docx, Format::Rst, Format::Latex, Format::Epub]
        );
    }

    #[test]
    fn test_binary_formats_are_file_mandatory() {
        for format in Format::ALL.into_iter().filter(|f| f.is_binary()) {
            assert!(format.requires_output_file(), "{format} should need a file");
        }
    }

    #[test]
    fn test_pandoc_names() {
        assert_eq!(Format::Txt.pandoc_writer(), "plain");
        assert_eq!(Format::Txt.pandoc_reader(), "markdown");
        assert_eq!(Format::Pdf.pandoc_writer(), "latex");
        assert_eq!(Format::Html.pandoc_writer(), "html");
        assert_eq!(Format::Markdown.extension(), "md");
        assert_eq!(Format::Latex.extension(), "tex");
    }

    #[test]
    fn test_required_extension() {
        assert_eq!(Format::Pdf.required_extension(), Some("pdf"));
        for format in Format::ALL.into_iter().filter(|f| *f != Format::Pdf) {
            assert_eq!(format.required_extension(), None, "{format}");
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Format::Docx).unwrap();
        assert_eq!(json, "\"docx\"");
    }
}
