//! Session teardown
//!
//! Undoes everything a session set up: the bubble, the editable flag, the
//! listeners it registered, and the selection it left in the source. A second
//! call on the same session does nothing.

use super::host::EditHost;
use super::session::{EditSession, SessionPhase};
use log::{debug, info};

/// End `session`. Returns `false` if it had already ended.
pub fn teardown(session: &mut EditSession, host: &mut EditHost<'_>) -> bool {
    if session.is_removed() {
        debug!("Session on {} already removed", session.target);
        return false;
    }

    if let Some(bubble) = host.bubble.as_mut() {
        bubble.hide();
        bubble.clear_input();
    }

    host.preview.set_editable(session.target, false);

    for (kind, id) in session.listeners.take_all() {
        if !host.preview.remove_listener(session.target, id) {
            debug!(
                "{:?} listener {:?} on {} was already detached",
                kind, id, session.target
            );
        }
    }

    let cursor = host.editor.cursor();
    host.editor.set_selection(cursor, cursor);

    session.advance(SessionPhase::Removed);
    info!("Ended list edit session on {}", session.target);
    true
}
