//! In-process message channel between the watch app and the simulated companion.
//!
//! Stands in for the phone connection. Both directions are FIFO queues of
//! [`Dictionary`] messages; the watch side sends through the [`Outbox`] trait
//! exactly as it would on hardware. A disconnect switch makes every transport
//! operation fail so error paths can be exercised from the keyboard.

use std::collections::VecDeque;

use visibility_common::message::{AppMessageResult, Dictionary, DictionaryResult, MessageKey, OUTBOX_SIZE, Outbox};

/// Bidirectional message queue.
#[derive(Debug)]
pub struct Bridge {
    to_watch: VecDeque<Dictionary>,
    to_companion: VecDeque<Dictionary>,
    /// Outgoing message between `begin` and `send`.
    pending: Option<Dictionary>,
    connected: bool,
}

impl Bridge {
    pub const fn new() -> Self {
        Self {
            to_watch: VecDeque::new(),
            to_companion: VecDeque::new(),
            pending: None,
            connected: true,
        }
    }

    #[inline]
    pub const fn is_connected(&self) -> bool { self.connected }

    /// Flip the connection state. Returns the new state.
    pub fn toggle_connected(&mut self) -> bool {
        self.connected = !self.connected;
        self.pending = None;
        self.connected
    }

    /// Queue a companion message for the watch. Dropped while disconnected.
    pub fn post_to_watch(
        &mut self,
        dict: Dictionary,
    ) -> bool {
        if !self.connected {
            return false;
        }
        self.to_watch.push_back(dict);
        true
    }

    /// Next message waiting for the watch.
    pub fn next_for_watch(&mut self) -> Option<Dictionary> { self.to_watch.pop_front() }

    /// Next message waiting for the companion.
    pub fn next_for_companion(&mut self) -> Option<Dictionary> { self.to_companion.pop_front() }
}

impl Default for Bridge {
    fn default() -> Self { Self::new() }
}

impl Outbox for Bridge {
    fn begin(&mut self) -> AppMessageResult {
        if !self.connected {
            return AppMessageResult::NotConnected;
        }
        self.pending = Some(Dictionary::with_capacity(OUTBOX_SIZE));
        AppMessageResult::Ok
    }

    fn write_cstring(
        &mut self,
        key: MessageKey,
        value: &str,
    ) -> DictionaryResult {
        match self.pending.as_mut() {
            Some(dict) => dict.write_cstring(key, value),
            None => DictionaryResult::InvalidArgs,
        }
    }

    fn send(&mut self) -> AppMessageResult {
        if !self.connected {
            self.pending = None;
            return AppMessageResult::NotConnected;
        }
        match self.pending.take() {
            Some(dict) => {
                self.to_companion.push_back(dict);
                AppMessageResult::Ok
            }
            None => AppMessageResult::InvalidState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visibility_common::message::{OutboundRequest, send_update_all};

    #[test]
    fn test_update_all_reaches_companion() {
        let mut bridge = Bridge::new();
        assert_eq!(send_update_all(&mut bridge), Ok(()));

        let sent = bridge.next_for_companion();
        assert_eq!(sent.as_ref().and_then(OutboundRequest::parse), Some(OutboundRequest::UpdateAll));
        assert!(bridge.next_for_companion().is_none());
    }

    #[test]
    fn test_disconnected_fails_begin() {
        let mut bridge = Bridge::new();
        assert!(!bridge.toggle_connected());
        assert_eq!(bridge.begin(), AppMessageResult::NotConnected);
        assert!(send_update_all(&mut bridge).is_err());
        assert!(bridge.next_for_companion().is_none());
    }

    #[test]
    fn test_write_and_send_without_begin() {
        let mut bridge = Bridge::new();
        assert_eq!(bridge.write_cstring(MessageKey::Type, "update_all"), DictionaryResult::InvalidArgs);
        assert_eq!(bridge.send(), AppMessageResult::InvalidState);
    }

    #[test]
    fn test_messages_to_watch_are_fifo() {
        let mut bridge = Bridge::new();
        let mut first = Dictionary::new();
        first.write_cstring(MessageKey::Type, "ready");
        let mut second = Dictionary::new();
        second.write_cstring(MessageKey::Type, "new_scores");

        assert!(bridge.post_to_watch(first));
        assert!(bridge.post_to_watch(second));
        assert_eq!(bridge.next_for_watch().as_ref().and_then(Dictionary::message_type), Some("ready"));
        assert_eq!(bridge.next_for_watch().as_ref().and_then(Dictionary::message_type), Some("new_scores"));
    }

    #[test]
    fn test_messages_dropped_while_disconnected() {
        let mut bridge = Bridge::new();
        bridge.toggle_connected();
        assert!(!bridge.post_to_watch(Dictionary::new()));
        assert!(bridge.next_for_watch().is_none());
    }
}
