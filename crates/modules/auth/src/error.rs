use crate::module_account::ModuleAccountKind;
use displaydoc::Display;
use modacc_types::{AccAddress, Error as TypesError};

#[derive(Debug, Display)]
pub enum Error {
    /// `{operation}` is not supported for module accounts
    NotSupported { operation: &'static str },
    /// module name must not be empty
    EmptyModuleName,
    /// module account `{name}` is already registered
    DuplicateModuleName { name: String },
    /// address `{address}` derived for module `{name}` is already held by module `{existing}`
    AddressInUse {
        name: String,
        address: AccAddress,
        existing: String,
    },
    /// module account `{name}` is a {found} account, expected a {expected} account
    ModuleKindMismatch {
        name: String,
        expected: ModuleAccountKind,
        found: ModuleAccountKind,
    },
    /// account number {number} of module `{name}` is already held by module `{existing}`
    AccountNumberInUse {
        name: String,
        number: u64,
        existing: String,
    },
    /// no account found at address `{address}`
    AccountNotFound { address: AccAddress },
    /// address `{address}` is not the address derived from module name `{name}`
    AddressMismatch { name: String, address: AccAddress },
    /// module account `{name}` must not carry a `{field}`
    SignerStateOnModuleAccount { name: String, field: &'static str },
    /// {0}
    Types(TypesError),
    /// io error: {0}
    Io(std::io::Error),
    /// invalid genesis config: {0}
    Toml(toml::de::Error),
    /// json encoding error: {0}
    Json(serde_json::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Types(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TypesError> for Error {
    fn from(e: TypesError) -> Self {
        Self::Types(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
