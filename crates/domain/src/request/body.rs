//! HTTP request body types

use serde::{Deserialize, Serialize};

/// How a form-data entry is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    /// A plain text part.
    #[default]
    Text,
    /// A file part; the entry's value is the path of the file to upload.
    File,
}

/// One entry of a multipart form body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Part name.
    #[serde(default)]
    pub key: String,
    /// Text value, or file path for file parts.
    #[serde(default)]
    pub value: String,
    /// Text or file.
    #[serde(default, rename = "type")]
    pub kind: FormFieldKind,
    /// Whether this entry is sent.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl FormField {
    /// Creates an enabled text entry.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: FormFieldKind::Text,
            enabled: true,
        }
    }

    /// Creates an enabled file entry pointing at `path`.
    #[must_use]
    pub fn file(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: path.into(),
            kind: FormFieldKind::File,
            enabled: true,
        }
    }

    /// Returns this entry disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Returns true if the entry is sent: enabled, with both key and value set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty() && !self.value.is_empty()
    }
}

/// HTTP request body.
///
/// The `type` field is the discriminator in the persisted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// Text that must parse as JSON once variables are resolved.
    Json {
        /// The JSON source text.
        #[serde(default)]
        content: String,
    },
    /// Opaque text sent verbatim.
    Raw {
        /// The raw text.
        #[serde(default)]
        content: String,
    },
    /// Multipart form data.
    FormData {
        /// Ordered form entries.
        #[serde(default)]
        fields: Vec<FormField>,
    },
}

impl RequestBody {
    /// Creates a JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Json {
            content: content.into(),
        }
    }

    /// Creates a raw text body.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
        }
    }

    /// Creates a form-data body.
    #[must_use]
    pub const fn form_data(fields: Vec<FormField>) -> Self {
        Self::FormData { fields }
    }

    /// Returns true for the `none` variant.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the discriminator used in persisted JSON.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json { .. } => "json",
            Self::Raw { .. } => "raw",
            Self::FormData { .. } => "form-data",
        }
    }

    /// Returns the content type sent with this body, if the body sets one.
    ///
    /// Form data returns `None`: the transport adds the multipart boundary.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json { .. } => Some("application/json"),
            Self::Raw { .. } => Some("text/plain"),
            Self::None | Self::FormData { .. } => None,
        }
    }
}
