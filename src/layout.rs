use crate::error::{MaskError, Result};
use std::fmt;
use std::str::FromStr;

/// Field separator of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Separator {
    /// `|`
    #[default]
    Pipe,
    /// `\t`
    Tab,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
}

impl Separator {
    /// The separator token used for splitting and joining.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Separator::Pipe => "|",
            Separator::Tab => "\t",
            Separator::Semicolon => ";",
            Separator::Comma => ",",
        }
    }

    /// The separator as a single character.
    pub const fn as_char(&self) -> char {
        match self {
            Separator::Pipe => '|',
            Separator::Tab => '\t',
            Separator::Semicolon => ';',
            Separator::Comma => ',',
        }
    }
}

impl TryFrom<char> for Separator {
    type Error = MaskError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '|' => Ok(Separator::Pipe),
            '\t' => Ok(Separator::Tab),
            ';' => Ok(Separator::Semicolon),
            ',' => Ok(Separator::Comma),
            other => Err(MaskError::UnknownSeparator(other.to_string())),
        }
    }
}

impl FromStr for Separator {
    type Err = MaskError;

    /// Accepts the character itself, the escaped form `\t`, or a name.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "|" | "pipe" => Ok(Separator::Pipe),
            "\t" | "\\t" | "tab" => Ok(Separator::Tab),
            ";" | "semicolon" => Ok(Separator::Semicolon),
            "," | "comma" => Ok(Separator::Comma),
            other => Err(MaskError::UnknownSeparator(other.to_string())),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Tab => write!(f, "\\t"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Inclusive range of header lines, copied verbatim to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRange {
    /// First header line index.
    pub start: usize,
    /// Last header line index (inclusive).
    pub end: usize,
}

impl HeaderRange {
    /// Create a new header range.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true if the line index falls inside the range.
    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// Caller-supplied description of where header and data live in a file.
///
/// `header_start <= header_end < data_start` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDescriptor {
    /// Field separator.
    pub separator: Separator,
    /// Optional header lines.
    pub header_range: Option<HeaderRange>,
    /// Index of the first data line.
    pub data_start: usize,
}

impl Default for LayoutDescriptor {
    fn default() -> Self {
        Self {
            separator: Separator::Pipe,
            header_range: None,
            data_start: 0,
        }
    }
}

impl LayoutDescriptor {
    /// Create a layout without header lines.
    pub const fn new(separator: Separator, data_start: usize) -> Self {
        Self {
            separator,
            header_range: None,
            data_start,
        }
    }

    /// Attach an inclusive header range.
    pub const fn with_header(mut self, start: usize, end: usize) -> Self {
        self.header_range = Some(HeaderRange::new(start, end));
        self
    }

    /// Returns true if the line index is a header line.
    #[inline]
    pub fn is_header(&self, index: usize) -> bool {
        self.header_range.is_some_and(|h| h.contains(index))
    }
}
