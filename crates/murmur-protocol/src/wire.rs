//! Protobuf wire schema.
//!
//! Field numbers are byte-compatible with the deployed messenger clients.
//! Every field is proto2 `optional` so presence is observable after decoding.

#![allow(missing_docs)]

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Envelope {
    #[prost(enumeration = "envelope::Type", optional, tag = "1")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub source: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(uint64, optional, tag = "5")]
    pub timestamp: ::core::option::Option<u64>,
    #[prost(uint32, optional, tag = "7")]
    pub source_device: ::core::option::Option<u32>,
    /// Contains an encrypted, padded `Content`.
    #[prost(bytes = "vec", optional, tag = "8")]
    pub content: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(uint64, optional, tag = "10")]
    pub server_timestamp: ::core::option::Option<u64>,
}
/// Nested message and enum types in `Envelope`.
pub mod envelope {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        UnidentifiedSender = 6,
        ClosedGroupCiphertext = 7,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Content {
    #[prost(message, optional, tag = "1")]
    pub data_message: ::core::option::Option<DataMessage>,
    #[prost(message, optional, tag = "5")]
    pub receipt_message: ::core::option::Option<ReceiptMessage>,
    #[prost(message, optional, tag = "6")]
    pub typing_message: ::core::option::Option<TypingMessage>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TypingMessage {
    #[prost(uint64, optional, tag = "1")]
    pub timestamp: ::core::option::Option<u64>,
    #[prost(enumeration = "typing_message::Action", optional, tag = "2")]
    pub action: ::core::option::Option<i32>,
}
/// Nested message and enum types in `TypingMessage`.
pub mod typing_message {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Action {
        Started = 0,
        Stopped = 1,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReceiptMessage {
    #[prost(enumeration = "receipt_message::Type", optional, tag = "1")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(uint64, repeated, packed = "false", tag = "2")]
    pub timestamp: ::prost::alloc::vec::Vec<u64>,
}
/// Nested message and enum types in `ReceiptMessage`.
pub mod receipt_message {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Delivery = 0,
        Read = 1,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AttachmentPointer {
    #[prost(fixed64, optional, tag = "1")]
    pub id: ::core::option::Option<u64>,
    #[prost(string, optional, tag = "2")]
    pub content_type: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(uint32, optional, tag = "4")]
    pub size: ::core::option::Option<u32>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub thumbnail: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub digest: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(string, optional, tag = "7")]
    pub file_name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(uint32, optional, tag = "8")]
    pub flags: ::core::option::Option<u32>,
    #[prost(uint32, optional, tag = "9")]
    pub width: ::core::option::Option<u32>,
    #[prost(uint32, optional, tag = "10")]
    pub height: ::core::option::Option<u32>,
    #[prost(string, optional, tag = "11")]
    pub caption: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "101")]
    pub url: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataMessage {
    #[prost(string, optional, tag = "1")]
    pub body: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "2")]
    pub attachments: ::prost::alloc::vec::Vec<AttachmentPointer>,
    #[prost(uint32, optional, tag = "4")]
    pub flags: ::core::option::Option<u32>,
    #[prost(uint32, optional, tag = "5")]
    pub expire_timer: ::core::option::Option<u32>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub profile_key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(uint64, optional, tag = "7")]
    pub timestamp: ::core::option::Option<u64>,
    #[prost(message, optional, tag = "8")]
    pub quote: ::core::option::Option<data_message::Quote>,
    #[prost(message, repeated, tag = "10")]
    pub preview: ::prost::alloc::vec::Vec<data_message::Preview>,
    #[prost(message, optional, tag = "101")]
    pub profile: ::core::option::Option<data_message::LokiProfile>,
    #[prost(message, optional, tag = "103")]
    pub closed_group_update: ::core::option::Option<data_message::ClosedGroupUpdate>,
}
/// Nested message and enum types in `DataMessage`.
pub mod data_message {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Quote {
        #[prost(uint64, optional, tag = "1")]
        pub id: ::core::option::Option<u64>,
        #[prost(string, optional, tag = "2")]
        pub author: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(string, optional, tag = "3")]
        pub text: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(message, repeated, tag = "4")]
        pub attachments: ::prost::alloc::vec::Vec<quote::QuotedAttachment>,
    }
    /// Nested message and enum types in `Quote`.
    pub mod quote {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct QuotedAttachment {
            #[prost(string, optional, tag = "1")]
            pub content_type: ::core::option::Option<::prost::alloc::string::String>,
            #[prost(string, optional, tag = "2")]
            pub file_name: ::core::option::Option<::prost::alloc::string::String>,
            #[prost(message, optional, tag = "3")]
            pub thumbnail: ::core::option::Option<super::super::AttachmentPointer>,
        }
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Preview {
        #[prost(string, optional, tag = "1")]
        pub url: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(string, optional, tag = "2")]
        pub title: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(message, optional, tag = "3")]
        pub image: ::core::option::Option<super::AttachmentPointer>,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct LokiProfile {
        #[prost(string, optional, tag = "1")]
        pub display_name: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(string, optional, tag = "2")]
        pub profile_picture: ::core::option::Option<::prost::alloc::string::String>,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ClosedGroupUpdate {
        #[prost(string, optional, tag = "1")]
        pub name: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(bytes = "vec", optional, tag = "2")]
        pub group_public_key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        #[prost(bytes = "vec", optional, tag = "3")]
        pub group_private_key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        #[prost(message, repeated, tag = "4")]
        pub sender_keys: ::prost::alloc::vec::Vec<closed_group_update::SenderKey>,
        #[prost(bytes = "vec", repeated, tag = "5")]
        pub members: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
        #[prost(bytes = "vec", repeated, tag = "6")]
        pub admins: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
        #[prost(enumeration = "closed_group_update::Type", optional, tag = "7")]
        pub r#type: ::core::option::Option<i32>,
    }
    /// Nested message and enum types in `ClosedGroupUpdate`.
    pub mod closed_group_update {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct SenderKey {
            #[prost(bytes = "vec", optional, tag = "1")]
            pub chain_key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
            #[prost(uint32, optional, tag = "2")]
            pub key_index: ::core::option::Option<u32>,
            #[prost(bytes = "vec", optional, tag = "3")]
            pub public_key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        }
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum Type {
            New = 0,
            Info = 1,
            SenderKeyRequest = 2,
            SenderKey = 3,
        }
    }
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Flags {
        ExpirationTimerUpdate = 2,
    }
}
