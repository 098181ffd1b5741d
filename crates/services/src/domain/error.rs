use thiserror::Error;

/// Failure reported by a port implementation (store, user module, streaming vendor).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PortError(#[from] anyhow::Error);

impl PortError {
    pub fn msg<M>(message: M) -> Self
    where
        M: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        Self(anyhow::Error::msg(message))
    }
}

pub type PortResult<T> = Result<T, PortError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Invalid(String),
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<DomainError>,
    },
    #[error("{port}: {source}")]
    Port {
        port: &'static str,
        source: PortError,
    },
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn port(port: &'static str, source: PortError) -> Self {
        Self::Port { port, source }
    }

    /// True when the root cause is a port call failing rather than invalid data.
    pub fn is_port_failure(&self) -> bool {
        match self {
            Self::Invalid(_) => false,
            Self::Context { source, .. } => source.is_port_failure(),
            Self::Port { .. } => true,
        }
    }

    /// Innermost error of a context chain.
    pub fn root(&self) -> &DomainError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Wraps the error of a failed check with the name of the check that ran it.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> DomainResult<T>;

    fn with_context<C, F>(self, f: F) -> DomainResult<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> ResultExt<T> for DomainResult<T> {
    fn context(self, context: impl Into<String>) -> DomainResult<T> {
        self.map_err(|source| DomainError::Context {
            context: context.into(),
            source: Box::new(source),
        })
    }

    fn with_context<C, F>(self, f: F) -> DomainResult<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|source| DomainError::Context {
            context: f().into(),
            source: Box::new(source),
        })
    }
}
