/// Server services
pub mod credentials;

pub use credentials::CredentialService;
