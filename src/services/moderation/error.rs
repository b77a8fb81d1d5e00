use serenity::all::RoleId;
use thiserror::Error;

/// Why an actor may not act on a target. Checked before any side effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("You cannot jail yourself.")]
    SelfTarget,

    #[error("You cannot jail a user with a higher or equal role.")]
    InsufficientRank,

    #[error("You cannot jail the server owner.")]
    OwnerProtected,

    #[error("This command requires permission level {required} (you have {actual}).")]
    InsufficientPermission { required: u8, actual: u8 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No jail role has been set up for this server.")]
    MissingJailRole,

    #[error("The jail role {0} has been deleted.")]
    JailRoleDeleted(RoleId),

    #[error("No jail channel has been set up for this server.")]
    MissingJailChannel,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalApiError {
    /// Worth retrying later: rate limits, 5xx, network trouble
    #[error("Discord is temporarily unavailable: {0}")]
    Transient(String),

    #[error("Discord rejected the request: {0}")]
    Permanent(String),

    /// Roles were removed but the jail role could not be added
    #[error("Removed {} role(s) but failed to add the jail role: {reason}", .removed.len())]
    PartialFailure { removed: Vec<RoleId>, reason: String },
}

impl ExternalApiError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ExternalApiError::Transient(_))
    }

    /// Classify a serenity error by whether the request could succeed if repeated
    pub fn from_serenity(error: &serenity::Error) -> Self {
        use serenity::http::HttpError;

        match error {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                let status = response.status_code;
                if status.is_server_error() || status.as_u16() == 429 {
                    ExternalApiError::Transient(error.to_string())
                } else {
                    ExternalApiError::Permanent(error.to_string())
                }
            }
            serenity::Error::Http(HttpError::Request(_)) | serenity::Error::Io(_) => {
                ExternalApiError::Transient(error.to_string())
            }
            _ => ExternalApiError::Permanent(error.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Failed to write case: {0}")]
    WriteFailed(String),

    #[error("Failed to read guild configuration: {0}")]
    ReadFailed(String),
}

/// Every way a jail can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JailError {
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    ExternalApi(#[from] ExternalApiError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("This user is already jailed.")]
    AlreadyJailed,
}

impl JailError {
    /// True when the member's roles were changed before the failure
    pub fn mutated_roles(&self) -> bool {
        matches!(
            self,
            JailError::ExternalApi(ExternalApiError::PartialFailure { .. })
                | JailError::Persistence(PersistenceError::WriteFailed(_))
        )
    }
}
