use modval_core_types::InvocationId;
use thiserror::Error;

/// Result type alias using ModvalError
pub type Result<T> = std::result::Result<T, ModvalError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// handling, log assertions, and the advisory text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Selection
    InvalidSelection,

    // Lookup
    NotFound,

    // Comparison baseline
    Unsupported,
    ResolutionFailed,

    // Value decoding
    /// A recognised numeric wrapper carried a payload that does not parse
    MalformedValue,

    // Host integration
    /// The host object model rejected a call (create/delete/annotate)
    Host,

    // Configuration
    InvalidConfig,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSelection => "ERR_INVALID_SELECTION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Unsupported => "ERR_UNSUPPORTED",
            ExErrorKind::ResolutionFailed => "ERR_RESOLUTION_FAILED",
            ExErrorKind::MalformedValue => "ERR_MALFORMED_VALUE",
            ExErrorKind::Host => "ERR_HOST",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and graph
/// context (node, property, invocation) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node_id: Option<String>,
    property: Option<String>,
    invocation_id: Option<InvocationId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            property: None,
            invocation_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node ID context
    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    /// Add property label context
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Add invocation ID context
    pub fn with_invocation_id(mut self, invocation_id: InvocationId) -> Self {
        self.invocation_id = Some(invocation_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the node ID context, if any
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Get the property context, if any
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Get the invocation ID context, if any
    pub fn invocation_id(&self) -> Option<&InvocationId> {
        self.invocation_id.as_ref()
    }

    /// Get the error message
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
        if let Some(node_id) = &self.node_id {
            write!(f, " (node_id: {})", node_id)?;
        }
        if let Some(property) = &self.property {
            write!(f, " (property: {})", property)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for modval operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModvalError {
    // ===== Selection =====
    /// The action needs a fixed number of selected nodes
    #[error("Select {expected} and only {expected} {} (got {actual})", node_noun(.expected))]
    InvalidSelection { expected: usize, actual: usize },

    // ===== Lookup =====
    /// Node id not present in the current graph
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// No built-in definition carries the node's display label
    #[error("No definition labelled '{label}' in module {module_id}")]
    DefinitionNotFound { module_id: String, label: String },

    /// Resource missing from a package after a transient load
    #[error("Resource {identifier} not found in package {package_path}")]
    ResourceNotFound {
        package_path: String,
        identifier: String,
    },

    // ===== Baseline =====
    /// Node type has no comparison baseline
    #[error("Node '{label}' is not supported: {reason}")]
    UnsupportedNode { label: String, reason: String },

    // ===== Values =====
    /// A numeric wrapper's payload failed to parse
    #[error("Malformed {kind} payload: '{payload}'")]
    MalformedValue { kind: String, payload: String },

    // ===== Host =====
    /// A host object-model call failed
    #[error("Host call '{op}' failed: {message}")]
    Host { op: String, message: String },

    // ===== Configuration =====
    /// Configuration could not be parsed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration file could not be read
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },
}

fn node_noun(count: &usize) -> &'static str {
    if *count == 1 {
        "node"
    } else {
        "nodes"
    }
}

impl ModvalError {
    /// Shorthand for a failed host call
    pub fn host(op: impl Into<String>, message: impl Into<String>) -> Self {
        ModvalError::Host {
            op: op.into(),
            message: message.into(),
        }
    }
}

/// Conversion from ModvalError to ExError
impl From<ModvalError> for ExError {
    fn from(err: ModvalError) -> Self {
        let message = err.to_string();
        match err {
            ModvalError::InvalidSelection { .. } => {
                ExError::new(ExErrorKind::InvalidSelection).with_message(message)
            }

            ModvalError::NodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(node_id)
                .with_message(message),

            ModvalError::DefinitionNotFound { .. } | ModvalError::ResourceNotFound { .. } => {
                ExError::new(ExErrorKind::ResolutionFailed).with_message(message)
            }

            ModvalError::UnsupportedNode { .. } => {
                ExError::new(ExErrorKind::Unsupported).with_message(message)
            }

            ModvalError::MalformedValue { .. } => {
                ExError::new(ExErrorKind::MalformedValue).with_message(message)
            }

            ModvalError::Host { op, .. } => ExError::new(ExErrorKind::Host)
                .with_op(op)
                .with_message(message),

            ModvalError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }

            ModvalError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<toml::de::Error> for ModvalError {
    fn from(err: toml::de::Error) -> Self {
        ModvalError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
