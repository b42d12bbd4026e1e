mod action;
mod attachment;
mod block;
mod composition;
mod element;
mod tagged;

pub use action::{ActionOption, ActionOptionGroup, ActionType, AttachmentAction, ConfirmationField};
pub use attachment::{Attachment, AttachmentField, ContentMode, Timestamp};
pub use block::{
    ActionsBlock, Block, ContextBlock, DividerBlock, HeaderBlock, ImageBlock, SectionBlock,
};
pub use composition::{OptionGroup, OptionObject, TextKind, TextObject};
pub use element::{BlockElement, ButtonElement, ImageElement, StaticSelectElement};
pub use tagged::Opaque;
