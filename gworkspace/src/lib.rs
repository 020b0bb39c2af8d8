#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use gworkspace_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;
#[cfg(feature = "default-context")]
pub use gworkspace_file_read_tokio::TokioFileRead;
#[cfg(feature = "default-context")]
pub use gworkspace_http_send_reqwest::ReqwestHttpSend;
#[cfg(feature = "default-context")]
pub use gworkspace_token_store_tokio::TokioFileTokenStore;

pub mod auth {
    pub use gworkspace_auth::*;
}

#[cfg(feature = "calendar")]
pub mod calendar {
    pub use gworkspace_calendar::*;
}

#[cfg(feature = "docs")]
pub mod docs {
    pub use gworkspace_docs::*;
}

#[cfg(feature = "drive")]
pub mod drive {
    pub use gworkspace_drive::*;
}

#[cfg(feature = "gmail")]
pub mod gmail {
    pub use gworkspace_gmail::*;
}

#[cfg(feature = "sheets")]
pub mod sheets {
    pub use gworkspace_sheets::*;
}

#[cfg(feature = "slides")]
pub mod slides {
    pub use gworkspace_slides::*;
}
