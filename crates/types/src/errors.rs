use displaydoc::Display;

#[derive(Debug, Display)]
pub enum Error {
    /// invalid amount: `{0}`
    InvalidAmount(String),
    /// invalid denomination: `{denom}`
    InvalidDenom { denom: String },
    /// invalid coin: `{coin}`
    InvalidCoin { coin: String },
    /// duplicate denomination `{denom}` in coin set
    DuplicateDenom { denom: String },
    /// invalid bech32 prefix `{prefix}`: `{reason}`
    InvalidAddressPrefix { prefix: String, reason: String },
    /// invalid bech32 address `{address}`: `{reason}`
    InvalidAddress { address: String, reason: String },
    /// account address must be `{expected}` bytes, got `{actual}`
    InvalidAddressLength { expected: usize, actual: usize },
}

impl std::error::Error for Error {}
