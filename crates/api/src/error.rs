use crate::model::BoxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("no project path could be located for namespace `{namespace}`")]
    NamespaceNotFound { namespace: String },
    #[error("type `{fqn}` could not be loaded")]
    NotLoadable {
        fqn: String,
        #[source]
        source: BoxError,
    },
    #[error("type `{fqn}` could not be instantiated")]
    Instantiation {
        fqn: String,
        #[source]
        source: BoxError,
    },
    #[error("assignment to field `{field}` was rejected")]
    FieldAccess {
        field: String,
        #[source]
        source: BoxError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, RegistrarError>;
