use thiserror::Error;

/// Result type alias using PfifDiffError
pub type Result<T> = std::result::Result<T, PfifDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and machine-readable CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Caller contract
    InvalidInput,

    // Document reading
    XmlParse,
    EmptyDocument,

    // Structural defects (non-fatal, reported alongside output)
    MissingRecordId,
    DuplicateRecord,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::XmlParse => "ERR_XML_PARSE",
            ExErrorKind::EmptyDocument => "ERR_EMPTY_DOCUMENT",
            ExErrorKind::MissingRecordId => "ERR_MISSING_RECORD_ID",
            ExErrorKind::DuplicateRecord => "ERR_DUPLICATE_RECORD",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging. Every [`PfifDiffError`] converts into one.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add document path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (record_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Fatal failures of the diff pipeline
///
/// Structural defects inside an otherwise readable document are not errors;
/// they are returned next to the canonical map (see `canonical::StructuralDefect`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PfifDiffError {
    /// A comparison was invoked with fewer than two documents
    #[error("Must provide two files to diff.")]
    NotEnoughDocuments { supplied: usize },

    /// A comparison was invoked with more than two documents
    #[error("Can only diff two files at a time, got {supplied}")]
    TooManyDocuments { supplied: usize },

    /// A document could not be read from disk
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// A document is not well-formed XML
    #[error("XML parse error at byte {position}: {message}")]
    XmlParse { position: u64, message: String },

    /// A document contains no root element
    #[error("Document has no root element")]
    EmptyDocument,

    /// Output could not be serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<PfifDiffError> for ExError {
    fn from(err: PfifDiffError) -> Self {
        let message = err.to_string();
        match err {
            PfifDiffError::NotEnoughDocuments { .. } | PfifDiffError::TooManyDocuments { .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("diff_files")
                    .with_message(message)
            }
            PfifDiffError::Io { path, .. } => ExError::new(ExErrorKind::Io)
                .with_op("read_document")
                .with_path(path)
                .with_message(message),
            PfifDiffError::XmlParse { .. } => ExError::new(ExErrorKind::XmlParse)
                .with_op("parse_document")
                .with_message(message),
            PfifDiffError::EmptyDocument => ExError::new(ExErrorKind::EmptyDocument)
                .with_op("parse_document")
                .with_message(message),
            PfifDiffError::Serialization { .. } => ExError::new(ExErrorKind::Serialization)
                .with_message(message),
        }
    }
}

impl From<serde_json::Error> for PfifDiffError {
    fn from(err: serde_json::Error) -> Self {
        PfifDiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for PfifDiffError {
    fn from(err: quick_xml::Error) -> Self {
        PfifDiffError::XmlParse {
            position: 0,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::XmlParse,
            ExErrorKind::EmptyDocument,
            ExErrorKind::MissingRecordId,
            ExErrorKind::DuplicateRecord,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_code_op_and_path() {
        let err = ExError::new(ExErrorKind::Io)
            .with_op("read_document")
            .with_path("a.xml")
            .with_message("boom");
        let rendered = err.to_string();
        assert_eq!(
            rendered,
            "[ERR_IO] in operation 'read_document': boom (path: a.xml)"
        );
    }
}
