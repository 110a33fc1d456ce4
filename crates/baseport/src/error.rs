#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Basecamp API credentials are not configured")]
    AuthenticationMissing,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Basecamp API error [{status}]: {body}")]
    RemoteApi { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(String),
}
