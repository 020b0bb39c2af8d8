mod service_account;
pub use service_account::ServiceAccountTokenProvider;

mod authorized_user;
pub use authorized_user::{AuthorizationCodeCallback, AuthorizationUrl, OAuth2TokenProvider};

mod static_provider;
pub use static_provider::StaticTokenProvider;
