//! Slack message attachments: data model and a presence-preserving JSON codec.
//!
//! ```no_run
//! use slack_attachments::codec;
//!
//! let attachment = codec::decode_str(r#"{"id": 1, "text": ""}"#)?;
//! assert_eq!(attachment.text.as_deref(), Some(""));
//! let bytes = codec::encode(&attachment)?;
//! # Ok::<(), slack_attachments::error::AttachmentError>(())
//! ```

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{decode, decode_with, encode, DecodeOptions};
pub use error::{AttachmentError, Result};
pub use types::Attachment;
