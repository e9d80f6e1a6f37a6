pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid diagram at `{path}`: {message}")]
    Schema { path: String, message: String },
}

impl Error {
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The JSON path of the offending location, e.g. `nodes[2].shape`.
    pub fn path(&self) -> &str {
        match self {
            Self::Schema { path, .. } => path,
        }
    }

    /// The reason alone, without the path prefix of the `Display` form.
    pub fn message(&self) -> &str {
        match self {
            Self::Schema { message, .. } => message,
        }
    }
}
