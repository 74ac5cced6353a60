//! Output image formats.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ProvError;

/// Image formats the renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    #[default]
    Png,
    /// Portable Document Format.
    Pdf,
    /// Scalable Vector Graphics.
    Svg,
}

impl ImageFormat {
    /// Every supported format.
    pub const ALL: [Self; 3] = [Self::Png, Self::Pdf, Self::Svg];

    /// Graphviz output type and file extension.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Svg => "svg",
        }
    }

    /// MIME type of the rendered bytes.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
            Self::Svg => "image/svg+xml",
        }
    }

    /// File name of a rendered graph, `prov.<format>`.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("prov.{}", self.as_str())
    }
}

impl Display for ImageFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = ProvError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| ProvError::UnsupportedFormat {
                value: value.to_string(),
            })
    }
}
