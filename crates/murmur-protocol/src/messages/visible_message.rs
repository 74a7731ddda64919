//! Chat messages with text, attachments, quotes and link previews.

use serde::{Deserialize, Serialize};

use crate::wire::{data_message, AttachmentPointer, Content};

/// Reference to an attachment hosted on the file server.
///
/// The receiver keeps the wire reference as-is; downloading and storing the
/// attachment is left to downstream jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Server id.
    pub id: u64,
    /// MIME type.
    pub content_type: Option<String>,
    /// Decryption key for the attachment body.
    pub key: Vec<u8>,
    /// Plaintext size in bytes.
    pub size: Option<u32>,
    /// Digest of the encrypted body.
    pub digest: Vec<u8>,
    /// Original file name.
    pub file_name: Option<String>,
    /// Attachment flags.
    pub flags: u32,
    /// Image width.
    pub width: Option<u32>,
    /// Image height.
    pub height: Option<u32>,
    /// User caption.
    pub caption: Option<String>,
    /// Download URL.
    pub url: Option<String>,
}

impl From<&AttachmentPointer> for Attachment {
    fn from(pointer: &AttachmentPointer) -> Self {
        Self {
            id: pointer.id.unwrap_or(0),
            content_type: pointer.content_type.clone(),
            key: pointer.key.clone().unwrap_or_default(),
            size: pointer.size,
            digest: pointer.digest.clone().unwrap_or_default(),
            file_name: pointer.file_name.clone(),
            flags: pointer.flags.unwrap_or(0),
            width: pointer.width,
            height: pointer.height,
            caption: pointer.caption.clone(),
            url: pointer.url.clone(),
        }
    }
}

/// Quoted reply context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Sent timestamp of the quoted message.
    pub timestamp: u64,
    /// Session id of the quoted message's author.
    pub author: String,
    /// Quoted text.
    pub text: Option<String>,
    /// Local ids of quoted attachments, assigned after download.
    pub attachment_ids: Vec<String>,
}

impl Quote {
    fn from_wire(quote: &data_message::Quote) -> Option<Self> {
        Some(Self {
            timestamp: quote.id?,
            author: quote.author.clone()?,
            text: quote.text.clone(),
            attachment_ids: Vec::new(),
        })
    }
}

/// Link preview shown under the message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreview {
    /// Previewed URL.
    pub url: String,
    /// Page title.
    pub title: Option<String>,
    /// Whether a preview image was attached.
    pub has_image: bool,
}

impl LinkPreview {
    fn from_wire(preview: &data_message::Preview) -> Option<Self> {
        Some(Self {
            url: preview.url.clone()?,
            title: preview.title.clone(),
            has_image: preview.image.is_some(),
        })
    }
}

/// Sender profile carried alongside a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub display_name: String,
    /// Profile picture URL.
    pub profile_picture_url: Option<String>,
    /// Key for the encrypted profile picture.
    pub profile_key: Option<Vec<u8>>,
}

impl Profile {
    fn from_wire(data: &crate::wire::DataMessage) -> Option<Self> {
        let profile = data.profile.as_ref()?;
        Some(Self {
            display_name: profile.display_name.clone()?,
            profile_picture_url: profile.profile_picture.clone(),
            profile_key: data.profile_key.clone(),
        })
    }
}

/// A message shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleMessage {
    /// Message body.
    pub text: Option<String>,
    /// Attachment references as received.
    pub attachments: Vec<Attachment>,
    /// Local attachment ids. Empty until downstream storage assigns them.
    pub attachment_ids: Vec<String>,
    /// Quoted reply context.
    pub quote: Option<Quote>,
    /// First link preview.
    pub link_preview: Option<LinkPreview>,
    /// Sender profile.
    pub profile: Option<Profile>,
}

impl VisibleMessage {
    /// Extract from any content carrying a data message.
    ///
    /// Malformed quotes, previews and profiles are dropped rather than
    /// failing the whole message.
    pub fn from_content(content: &Content) -> Option<Self> {
        let data = content.data_message.as_ref()?;
        Some(Self {
            text: data.body.clone(),
            attachments: data.attachments.iter().map(Attachment::from).collect(),
            attachment_ids: Vec::new(),
            quote: data.quote.as_ref().and_then(Quote::from_wire),
            link_preview: data.preview.first().and_then(LinkPreview::from_wire),
            profile: Profile::from_wire(data),
        })
    }

    /// Valid when it has stored attachments or non-blank text.
    pub fn is_valid(&self) -> bool {
        if !self.attachment_ids.is_empty() {
            return true;
        }
        self.text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Whether the message carries any attachment reference.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::DataMessage;

    fn content(data: DataMessage) -> Content {
        Content {
            data_message: Some(data),
            ..Default::default()
        }
    }

    #[test]
    fn test_text_message() {
        let message = VisibleMessage::from_content(&content(DataMessage {
            body: Some("hello".into()),
            ..Default::default()
        }))
        .unwrap();

        assert_eq!(message.text.as_deref(), Some("hello"));
        assert!(message.is_valid());
        assert!(!message.has_attachments());
    }

    #[test]
    fn test_blank_text_is_invalid() {
        let message = VisibleMessage::from_content(&content(DataMessage {
            body: Some(" \n\t ".into()),
            ..Default::default()
        }))
        .unwrap();
        assert!(!message.is_valid());

        let empty = VisibleMessage::from_content(&content(DataMessage::default())).unwrap();
        assert!(!empty.is_valid());
    }

    #[test]
    fn test_attachment_references_are_kept() {
        let message = VisibleMessage::from_content(&content(DataMessage {
            attachments: vec![AttachmentPointer {
                id: Some(77),
                content_type: Some("image/png".into()),
                key: Some(vec![1; 64]),
                url: Some("https://files.example/77".into()),
                ..Default::default()
            }],
            ..Default::default()
        }))
        .unwrap();

        assert!(message.has_attachments());
        assert_eq!(message.attachments[0].id, 77);
        assert_eq!(message.attachments[0].content_type.as_deref(), Some("image/png"));
        // References alone do not satisfy the message's own predicate.
        assert!(!message.is_valid());
    }

    #[test]
    fn test_stored_attachment_ids_make_it_valid() {
        let message = VisibleMessage {
            attachment_ids: vec!["a1".into()],
            ..Default::default()
        };
        assert!(message.is_valid());
    }

    #[test]
    fn test_quote_preview_and_profile() {
        let message = VisibleMessage::from_content(&content(DataMessage {
            body: Some("see above".into()),
            profile_key: Some(vec![9; 32]),
            quote: Some(data_message::Quote {
                id: Some(1234),
                author: Some("05aa".into()),
                text: Some("original".into()),
                attachments: vec![],
            }),
            preview: vec![
                data_message::Preview {
                    url: Some("https://example.org".into()),
                    title: Some("Example".into()),
                    image: None,
                },
                data_message::Preview {
                    url: Some("https://second.example".into()),
                    ..Default::default()
                },
            ],
            profile: Some(data_message::LokiProfile {
                display_name: Some("Alice".into()),
                profile_picture: Some("https://files.example/avatar".into()),
            }),
            ..Default::default()
        }))
        .unwrap();

        let quote = message.quote.unwrap();
        assert_eq!(quote.timestamp, 1234);
        assert_eq!(quote.author, "05aa");

        let preview = message.link_preview.unwrap();
        assert_eq!(preview.url, "https://example.org");
        assert!(!preview.has_image);

        let profile = message.profile.unwrap();
        assert_eq!(profile.display_name, "Alice");
        assert_eq!(profile.profile_key, Some(vec![9; 32]));
    }

    #[test]
    fn test_incomplete_quote_is_dropped() {
        let message = VisibleMessage::from_content(&content(DataMessage {
            body: Some("hi".into()),
            quote: Some(data_message::Quote {
                id: Some(1),
                ..Default::default()
            }),
            profile: Some(data_message::LokiProfile::default()),
            ..Default::default()
        }))
        .unwrap();

        assert!(message.quote.is_none());
        assert!(message.profile.is_none());
    }
}
