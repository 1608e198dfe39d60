use thiserror::Error;

#[derive(Debug, Error)]
pub enum AwsError {
    /// ECR refused or failed to issue an authorization token (network,
    /// permissions, throttling). Never retried.
    #[error("unable to get docker password from AWS: {0}")]
    TokenFetchFailed(String),

    /// The token did not decode to `username:password`. The ECR API is
    /// trusted to return well-formed tokens, so this is a contract
    /// violation rather than a user error.
    #[error("malformed ECR authorization token: {0}")]
    MalformedToken(String),

    #[error("unable to login to docker: {0}")]
    LoginFailed(#[from] netsells_process::ProcessError),
}

pub type Result<T> = std::result::Result<T, AwsError>;
