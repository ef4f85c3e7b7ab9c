pub mod secret_resolver;

pub use secret_resolver::{
    CREDENTIAL_PLACEHOLDER, DEFAULT_PASSWORD_SECRET_KEY, SecretStore, redact_credential,
};
