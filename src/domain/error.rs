use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("unknown resource `{slug}`")]
    UnknownResource { slug: String },
    #[error("column `{id}` is declared more than once")]
    DuplicateColumn { id: String },
}

impl DomainError {
    pub fn unknown_resource(slug: impl Into<String>) -> Self {
        Self::UnknownResource { slug: slug.into() }
    }

    pub fn duplicate_column(id: impl Into<String>) -> Self {
        Self::DuplicateColumn { id: id.into() }
    }
}
