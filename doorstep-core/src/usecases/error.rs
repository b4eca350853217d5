use crate::{
    address_book::InvalidSelection,
    gateways::location::LocationError,
    repositories::PersistenceError,
    store::StoreError,
    usecases::ResolveError,
    util::validate::ValidationError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Selection(#[from] InvalidSelection),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Whether repeating the same operation later might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Location(err) => matches!(
                err,
                LocationError::Timeout | LocationError::PositionUnavailable
            ),
            Self::Resolve(_) => true,
            Self::Persistence(err) => matches!(err, PersistenceError::NetworkFailure(_)),
            Self::Validation(_) | Self::Selection(_) | Self::Store(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AddressField, SlotType};

    #[test]
    fn retryable_errors() {
        assert!(Error::from(PersistenceError::NetworkFailure("reset".into())).is_retryable());
        assert!(!Error::from(PersistenceError::Unauthenticated).is_retryable());
        assert!(Error::from(LocationError::Timeout).is_retryable());
        assert!(!Error::from(LocationError::PermissionDenied).is_retryable());
        assert!(Error::from(ResolveError::AllProvidersExhausted(None)).is_retryable());
        assert!(!Error::from(ValidationError(vec![AddressField::City])).is_retryable());
        assert!(!Error::from(InvalidSelection(SlotType::Home)).is_retryable());
    }
}
