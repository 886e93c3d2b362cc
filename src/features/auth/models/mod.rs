mod credentials;

pub use credentials::{CredentialEntry, CredentialTree, Credentials};
