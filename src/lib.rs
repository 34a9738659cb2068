//! Shared foundation for the agent web UI: the configuration and callback
//! contracts its confirmation and input dialogs consume, and the HTTP
//! helpers for the local agent API.

pub mod api;
pub mod dialogs;

pub use api::{get_request, post_request, ApiClient, API_BASE_URL};
pub use dialogs::{
    input_submit, shell_confirm_submit, DialogError, DialogId, DialogResult, DialogTracker,
    InputArg, InputDialogConfig, InputSubmit, InputValues, ShellConfirmDialogConfig,
    ShellConfirmSubmit,
};
