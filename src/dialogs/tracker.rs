use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use tokio::sync::oneshot;

use super::types::{
    DialogError, DialogId, DialogResult, InputArg, InputDialogConfig, InputSubmit, InputValues,
    ShellConfirmDialogConfig, ShellConfirmSubmit,
};

/// Registry of dialogs still waiting for a user decision
///
/// Owns the id and lifecycle policy: ids are minted when a dialog is opened
/// and stay stable until the decision arrives; resolving removes the pending
/// entry and completes its decision channel. Opening hands back the config
/// for the rendering collaborator together with the receiver the requesting
/// side awaits.
#[derive(Debug, Default)]
pub struct DialogTracker {
    pending_confirms: HashMap<DialogId, PendingDialog<bool>>,
    pending_inputs: HashMap<DialogId, PendingDialog<InputValues>>,
}

#[derive(Debug)]
struct PendingDialog<T> {
    opened_at: DateTime<Utc>,
    decision: oneshot::Sender<T>,
}

impl<T> PendingDialog<T> {
    fn new(decision: oneshot::Sender<T>) -> Self {
        PendingDialog {
            opened_at: Utc::now(),
            decision,
        }
    }
}

impl DialogTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a confirmation dialog for `command`
    ///
    /// Returns the dialog config and the receiver that resolves with the
    /// user's decision once the dialog is submitted.
    pub fn open_shell_confirm(
        &mut self,
        command: impl Into<String>,
    ) -> (ShellConfirmDialogConfig, oneshot::Receiver<bool>) {
        let config = ShellConfirmDialogConfig::new(command);
        let (tx, rx) = oneshot::channel();
        self.pending_confirms
            .insert(config.id.clone(), PendingDialog::new(tx));

        debug!("Opened shell confirm dialog: {}", config.id);
        (config, rx)
    }

    /// Open an input collection dialog
    pub fn open_input(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        input_arguments: Vec<InputArg>,
    ) -> (InputDialogConfig, oneshot::Receiver<InputValues>) {
        let config = InputDialogConfig::new(title, description, input_arguments);
        let (tx, rx) = oneshot::channel();
        self.pending_inputs
            .insert(config.id.clone(), PendingDialog::new(tx));

        debug!("Opened input dialog: {}", config.id);
        (config, rx)
    }

    /// Deliver the user's decision for a pending confirmation dialog
    ///
    /// The pending entry is removed; a second resolution for the same id
    /// reports `UnknownDialog`.
    pub fn resolve_shell_confirm(&mut self, id: &str, approved: bool) -> DialogResult<()> {
        let pending = self
            .pending_confirms
            .remove(id)
            .ok_or_else(|| DialogError::UnknownDialog(id.to_string()))?;

        debug!("Resolved shell confirm dialog {} (approved: {})", id, approved);
        pending
            .decision
            .send(approved)
            .map_err(|_| DialogError::ReceiverDropped(id.to_string()))
    }

    /// Deliver the collected values for a pending input dialog
    pub fn resolve_input(&mut self, id: &str, values: InputValues) -> DialogResult<()> {
        let pending = self
            .pending_inputs
            .remove(id)
            .ok_or_else(|| DialogError::UnknownDialog(id.to_string()))?;

        debug!("Resolved input dialog: {}", id);
        pending
            .decision
            .send(values)
            .map_err(|_| DialogError::ReceiverDropped(id.to_string()))
    }

    /// Number of dialogs still waiting for a decision
    pub fn pending_count(&self) -> usize {
        self.pending_confirms.len() + self.pending_inputs.len()
    }

    /// Drop pending dialogs older than `max_age_seconds`
    ///
    /// Closing the decision channel wakes any task still waiting on an
    /// abandoned dialog. Returns how many entries were dropped.
    pub fn cleanup_expired(&mut self, max_age_seconds: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(max_age_seconds);
        let before = self.pending_count();
        self.pending_confirms.retain(|_, p| p.opened_at > cutoff);
        self.pending_inputs.retain(|_, p| p.opened_at > cutoff);
        before - self.pending_count()
    }
}

/// Adapt a shared tracker into the confirmation callback shape
///
/// A rendering collaborator written against `ShellConfirmSubmit` resolves
/// tracker-managed dialogs without knowing about the tracker.
pub fn shell_confirm_submit(tracker: Arc<Mutex<DialogTracker>>) -> ShellConfirmSubmit {
    Box::new(move |id, approved| {
        if let Err(e) = tracker.lock().unwrap().resolve_shell_confirm(&id, approved) {
            warn!("Shell confirm submit for {} failed: {}", id, e);
        }
    })
}

/// Adapt a shared tracker into the input callback shape
pub fn input_submit(tracker: Arc<Mutex<DialogTracker>>) -> InputSubmit {
    Box::new(move |id, values| {
        if let Err(e) = tracker.lock().unwrap().resolve_input(&id, values) {
            warn!("Input submit for {} failed: {}", id, e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_resolve_shell_confirm() {
        let mut tracker = DialogTracker::new();
        let (config, rx) = tracker.open_shell_confirm("ls -la");

        assert_eq!(config.command, "ls -la");
        assert!(config.show);
        assert_eq!(tracker.pending_count(), 1);

        tracker.resolve_shell_confirm(&config.id, true).unwrap();
        assert_eq!(tracker.pending_count(), 0);
        assert!(tokio_test::block_on(rx).unwrap());
    }

    #[test]
    fn test_open_and_resolve_input() {
        let mut tracker = DialogTracker::new();
        let (config, rx) = tracker.open_input(
            "Save file",
            Some("Pick a destination".to_string()),
            vec![InputArg::new("string", "filename")],
        );

        let mut values = InputValues::new();
        values.insert("filename".to_string(), "x".to_string());
        assert!(config.matches_arguments(&values));

        tracker.resolve_input(&config.id, values.clone()).unwrap();
        assert_eq!(tokio_test::block_on(rx).unwrap(), values);
    }

    #[test]
    fn test_resolve_unknown_id() {
        let mut tracker = DialogTracker::new();

        let err = tracker.resolve_shell_confirm("missing", true).unwrap_err();
        assert!(matches!(err, DialogError::UnknownDialog(id) if id == "missing"));
    }

    #[test]
    fn test_resolve_twice_fails() {
        let mut tracker = DialogTracker::new();
        let (config, _rx) = tracker.open_shell_confirm("pwd");

        tracker.resolve_shell_confirm(&config.id, false).unwrap();
        let err = tracker
            .resolve_shell_confirm(&config.id, false)
            .unwrap_err();
        assert!(matches!(err, DialogError::UnknownDialog(_)));
    }

    #[test]
    fn test_dropped_receiver_is_reported() {
        let mut tracker = DialogTracker::new();
        let (config, rx) = tracker.open_shell_confirm("pwd");
        drop(rx);

        let err = tracker.resolve_shell_confirm(&config.id, true).unwrap_err();
        assert!(matches!(err, DialogError::ReceiverDropped(_)));
        assert_eq!(tracker.pending_count(), 0);
    }

    #[test]
    fn test_minted_ids_are_unique() {
        let mut tracker = DialogTracker::new();
        let (a, _rx_a) = tracker.open_shell_confirm("pwd");
        let (b, _rx_b) = tracker.open_shell_confirm("pwd");

        assert_ne!(a.id, b.id);
        assert_eq!(tracker.pending_count(), 2);
    }

    #[test]
    fn test_cleanup_expired() {
        let mut tracker = DialogTracker::new();
        let (config, rx) = tracker.open_shell_confirm("pwd");
        let (_fresh, _rx_fresh) = tracker.open_shell_confirm("pwd");

        // Backdate the first entry past the cutoff
        tracker
            .pending_confirms
            .get_mut(&config.id)
            .unwrap()
            .opened_at = Utc::now() - chrono::Duration::seconds(400);

        let removed = tracker.cleanup_expired(300);
        assert_eq!(removed, 1);
        assert_eq!(tracker.pending_count(), 1);

        // The waiting side observes the closed channel
        assert!(tokio_test::block_on(rx).is_err());
    }

    #[tokio::test]
    async fn test_submit_callbacks_resolve_tracker_dialogs() {
        let tracker = Arc::new(Mutex::new(DialogTracker::new()));

        let (confirm, confirm_rx) = tracker.lock().unwrap().open_shell_confirm("rm target");
        let (input, input_rx) = tracker.lock().unwrap().open_input(
            "Save file",
            None,
            vec![InputArg::new("string", "filename")],
        );

        let on_confirm = shell_confirm_submit(tracker.clone());
        let on_input = input_submit(tracker.clone());

        on_confirm(confirm.id.clone(), false);

        let mut values = InputValues::new();
        values.insert("filename".to_string(), "x".to_string());
        on_input(input.id.clone(), values.clone());

        assert!(!confirm_rx.await.unwrap());
        assert_eq!(input_rx.await.unwrap(), values);
        assert_eq!(tracker.lock().unwrap().pending_count(), 0);
    }

    #[test]
    fn test_submit_callback_ignores_unknown_dialog() {
        let tracker = Arc::new(Mutex::new(DialogTracker::new()));
        let on_confirm = shell_confirm_submit(tracker.clone());

        // Logs a warning, never panics
        on_confirm("missing".to_string(), true);
        assert_eq!(tracker.lock().unwrap().pending_count(), 0);
    }
}
