//! Property-based tests for the wire protocol
//!
//! Checks the parts of the framing clients depend on: the event names
//! stay kebab-case, payload keys stay camelCase, and arbitrary text
//! survives the JSON encoding.

use proptest::prelude::*;
use uuid::Uuid;

use opencircle::backend::ws::{ClientEvent, ServerEvent};
use opencircle::shared::ChatMessage;

proptest! {
    #[test]
    fn test_send_message_text_survives_encoding(text in ".*") {
        let event = ClientEvent::SendMessage {
            sender_id: Uuid::new_v4().to_string(),
            receiver_id: Uuid::new_v4().to_string(),
            text: text.clone(),
        };

        let json = serde_json::to_string(&event).unwrap();
        let parsed: ClientEvent = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, event);
    }

    #[test]
    fn test_server_events_always_carry_event_and_data(user in any::<u128>()) {
        let id = Uuid::from_u128(user);
        let events = vec![
            ServerEvent::UserOnline(id),
            ServerEvent::UserOffline(id),
            ServerEvent::OnlineUsers(vec![id]),
            ServerEvent::ReceiveMessage(ChatMessage::new(id, id, "x")),
        ];

        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            prop_assert!(value.get("event").is_some());
            prop_assert!(value.get("data").is_some());
            // Event names are kebab-case on the wire
            let name = value["event"].as_str().unwrap();
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
        }
    }

    #[test]
    fn test_message_payload_keys_are_camel_case(text in "[^\\x00]{0,64}") {
        let message = ChatMessage::new(Uuid::new_v4(), Uuid::new_v4(), text);
        let value = serde_json::to_value(ServerEvent::ReceiveMessage(message)).unwrap();
        let data = value["data"].as_object().unwrap();

        prop_assert!(data.contains_key("senderId"));
        prop_assert!(data.contains_key("receiverId"));
        prop_assert!(data.contains_key("createdAt"));
        prop_assert!(!data.contains_key("sender_id"));
    }
}
