use thiserror::Error;

pub type ColdkeyResult<T> = Result<T, ColdkeyError>;

#[derive(Debug, Error)]
pub enum ColdkeyError {
    /// Malformed key record: bad Base58Check wrapper, wrong version or
    /// record-type byte, or wrong decoded length.
    #[error("malformed key record: {0}")]
    Format(String),

    /// A record feature this implementation deliberately does not handle.
    #[error("unsupported feature: {0}")]
    Unsupported(&'static str),

    /// The recomputed address checksum did not match the record. The format
    /// carries no other integrity channel, so a corrupted payload reports
    /// the same way as a wrong passphrase.
    #[error("wrong passphrase (or corrupted payload)")]
    WrongPassphrase,

    /// Address derivation failed for the requested network parameters.
    #[error("address derivation failed: {0}")]
    Network(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
