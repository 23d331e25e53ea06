use hostbridge_frame::{IncomingMessage, OutgoingMessage};

/// Marker query attached to responses that relay named-pipe lines, so the
/// extension can tell agent notifications apart from query replies.
pub const PIPE_QUERY: &str = "hello";

/// Build the reply to a browser query. Pure; the only place business logic
/// would grow if the host were extended.
pub fn respond(msg: &IncomingMessage) -> OutgoingMessage {
    OutgoingMessage {
        query: msg.query.clone(),
        response: format!(
            "This is the native host responding to your query of: {}",
            msg.query
        ),
    }
}

/// Wrap a line received on the named pipe for delivery to the browser.
pub fn pipe_notification(line: &str) -> OutgoingMessage {
    OutgoingMessage {
        query: PIPE_QUERY.to_string(),
        response: line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_echoes_query() {
        let out = respond(&IncomingMessage {
            query: "ping".to_string(),
        });
        assert_eq!(out.query, "ping");
        assert!(out.response.contains("ping"));
    }

    #[test]
    fn empty_query_still_produces_a_response() {
        let out = respond(&IncomingMessage::default());
        assert_eq!(out.query, "");
        assert!(!out.response.is_empty());
    }

    #[test]
    fn pipe_notification_carries_marker_and_line() {
        let out = pipe_notification("disk almost full");
        assert_eq!(out.query, PIPE_QUERY);
        assert_eq!(out.response, "disk almost full");
    }
}
