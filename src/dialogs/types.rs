use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier correlating a dialog instance to its originating request
pub type DialogId = String;

/// Configuration for the shell command confirmation dialog
///
/// The `id` stays stable for one confirmation round-trip: it is minted when
/// the confirmation is requested and the config is replaced once the
/// decision is resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfirmDialogConfig {
    /// Shell command awaiting confirmation
    pub command: String,
    /// Identifier of this dialog instance
    pub id: DialogId,
    /// Visibility flag
    pub show: bool,
}

impl ShellConfirmDialogConfig {
    /// Create a visible confirmation dialog for `command` with a fresh id
    pub fn new(command: impl Into<String>) -> Self {
        ShellConfirmDialogConfig {
            command: command.into(),
            id: Uuid::new_v4().to_string(),
            show: true,
        }
    }
}

/// Callback reporting the user's decision for the dialog identified by `id`
///
/// Invoked once per decision; resolving whatever is pending on that decision
/// is the receiver's responsibility.
pub type ShellConfirmSubmit = Box<dyn Fn(DialogId, bool) + Send + Sync>;

/// A single input field requested from the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputArg {
    /// Semantic input type tag, interpreted by the rendering layer
    #[serde(rename = "type")]
    pub arg_type: String,
    /// Key under which the entered value is reported
    pub name: String,
    /// Optional human-readable hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InputArg {
    /// Create an argument without a description
    pub fn new(arg_type: impl Into<String>, name: impl Into<String>) -> Self {
        InputArg {
            arg_type: arg_type.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Attach a human-readable hint
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Values collected from the user, keyed by argument name
///
/// Keys are unique, one entry per requested `InputArg` name.
pub type InputValues = HashMap<String, String>;

/// Callback delivering the collected values for the dialog identified by `id`
pub type InputSubmit = Box<dyn Fn(DialogId, InputValues) + Send + Sync>;

/// Configuration for the generic input collection dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDialogConfig {
    /// Visibility flag
    pub show: bool,
    /// Identifier of this dialog instance
    pub id: DialogId,
    /// Dialog title
    pub title: String,
    /// Optional display text under the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered fields to render and collect
    pub input_arguments: Vec<InputArg>,
}

impl InputDialogConfig {
    /// Create a visible input dialog with a fresh id
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        input_arguments: Vec<InputArg>,
    ) -> Self {
        InputDialogConfig {
            show: true,
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description,
            input_arguments,
        }
    }

    /// Check that every key in `values` names a declared argument
    ///
    /// Advisory only; what to do about a mismatch is the consumer's call.
    pub fn matches_arguments(&self, values: &InputValues) -> bool {
        values
            .keys()
            .all(|key| self.input_arguments.iter().any(|arg| arg.name == *key))
    }
}

/// Errors from dialog lifecycle tracking
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("no pending dialog with id {0}")]
    UnknownDialog(DialogId),

    #[error("decision receiver for dialog {0} was dropped")]
    ReceiverDropped(DialogId),
}

pub type DialogResult<T> = Result<T, DialogError>;
