use gworkspace_core::{Context, OsEnv};
use gworkspace_file_read_tokio::TokioFileRead;
use gworkspace_http_send_reqwest::ReqwestHttpSend;

/// Create a context backed by tokio file reads, a default reqwest client and the OS
/// environment.
///
/// Build the [`Context`] by hand to replace one of the parts, e.g. to pin the
/// environment in tests:
///
/// ```no_run
/// use std::collections::HashMap;
/// use gworkspace::{Context, ReqwestHttpSend, StaticEnv, TokioFileRead};
///
/// let ctx = Context::new()
///     .with_file_read(TokioFileRead)
///     .with_http_send(ReqwestHttpSend::default())
///     .with_env(StaticEnv {
///         home_dir: None,
///         envs: HashMap::from([("GOOGLE_SERVICE_ACCOUNT_PATH".to_string(), "/etc/sa.json".to_string())]),
///     });
/// ```
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}
