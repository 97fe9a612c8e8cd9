/// Outbound notification message contract
use bytes::Bytes;
use typed_builder::TypedBuilder;

/// Composed announcement notification, before transport encoding
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Notification {
    #[builder(setter(into))]
    pub subject: String,
    #[builder(setter(into))]
    pub body: String,
    #[builder(setter(into))]
    pub from: String,
    #[builder(default)]
    pub to: Vec<String>,
    #[builder(default)]
    pub attachments: Vec<NotificationAttachment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl Notification {
    pub fn total_attachment_size(&self) -> usize {
        self.attachments.iter().map(|a| a.data.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let notification = Notification::builder()
            .subject("New Announcement")
            .body("body")
            .from("sender@example.com")
            .build();

        assert!(notification.to.is_empty());
        assert!(notification.attachments.is_empty());
        assert_eq!(notification.total_attachment_size(), 0);
    }
}
