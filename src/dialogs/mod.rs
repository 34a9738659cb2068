pub mod types;
pub mod tracker;

pub use types::{
    DialogError, DialogId, DialogResult, InputArg, InputDialogConfig, InputSubmit, InputValues,
    ShellConfirmDialogConfig, ShellConfirmSubmit,
};
pub use tracker::{input_submit, shell_confirm_submit, DialogTracker};
