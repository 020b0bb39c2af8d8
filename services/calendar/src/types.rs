use gworkspace_core::time::DateTime;
use serde::{Deserialize, Serialize};

/// A calendar event.
///
/// Built with [`Event::new`] for `events.insert`. Server assigned fields (`id`,
/// `status`, `html_link`) are only present on responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub start: EventDateTime,
    #[serde(default)]
    pub end: EventDateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<EventAttendee>,
}

impl Event {
    /// Create a timed event running from `start` to `end`.
    pub fn new(summary: impl Into<String>, start: DateTime, end: DateTime) -> Self {
        Self {
            summary: summary.into(),
            start: EventDateTime::at(start),
            end: EventDateTime::at(end),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Invite `emails`.
    ///
    /// Service accounts can only invite attendees under domain-wide delegation, see
    /// `ServiceAccountTokenProvider::with_subject`.
    pub fn with_attendees<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendees = emails
            .into_iter()
            .map(|email| EventAttendee {
                email: email.into(),
                response_status: None,
            })
            .collect();
        self
    }
}

/// Start or end of an event: `date_time` for timed events, `date` (`yyyy-mm-dd`) for
/// all-day ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    pub fn at(date_time: DateTime) -> Self {
        Self {
            date_time: Some(date_time),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendee {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
}

/// Who gets notified about a new event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SendUpdates {
    /// Notify every guest.
    #[default]
    All,
    /// Notify non-Google Calendar guests only.
    ExternalOnly,
    None,
}

impl SendUpdates {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendUpdates::All => "all",
            SendUpdates::ExternalOnly => "externalOnly",
            SendUpdates::None => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_send_updates_wire_format() {
        for v in [SendUpdates::All, SendUpdates::ExternalOnly, SendUpdates::None] {
            assert_eq!(serde_json::to_value(v).unwrap(), v.as_str());
        }
        assert_eq!(SendUpdates::default(), SendUpdates::All);
    }

    #[test]
    fn test_event_response() {
        let event: Event = serde_json::from_str(
            r#"{"id":"evt1","status":"confirmed","htmlLink":"https://www.google.com/calendar/event?eid=evt1",
                "summary":"All hands","start":{"date":"2025-03-01"},"end":{"date":"2025-03-02"}}"#,
        )
        .unwrap();
        assert_eq!(event.id.as_deref(), Some("evt1"));
        assert_eq!(event.start.date.as_deref(), Some("2025-03-01"));
        assert!(event.start.date_time.is_none());
        assert!(event.attendees.is_empty());
    }
}
