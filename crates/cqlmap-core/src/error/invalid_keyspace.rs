use super::Error;

/// Error when a keyspace name cannot be used as an identifier.
#[derive(Debug)]
pub(super) struct InvalidKeyspace {
    name: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidKeyspace {}

impl core::fmt::Display for InvalidKeyspace {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid keyspace `{}`: {}", self.name, self.message)
    }
}

impl Error {
    /// Creates an invalid keyspace error.
    pub fn invalid_keyspace(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidKeyspace(InvalidKeyspace {
            name: name.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid keyspace error.
    pub fn is_invalid_keyspace(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidKeyspace(_))
    }
}
