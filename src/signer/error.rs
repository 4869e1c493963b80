use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningClientError {
    #[error("SigningClientError - UserCancelled: signing was rejected in the wallet")]
    UserCancelled,
    #[error("SigningClientError - CouldNotConnect: {0}")]
    CouldNotConnect(String),
    #[error("SigningClientError - RemoteCallFailure: {0}")]
    RemoteCallFailure(String),
}
