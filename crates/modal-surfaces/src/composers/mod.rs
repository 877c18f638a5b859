//! Mail and text message composers

pub mod mail;
pub mod message;

pub use mail::{
    mail_composer, MailAttachment, MailComposeDelegate, MailComposeResult, MailComposerHost,
    MailDraft,
};
pub use message::{
    message_composer, MessageComposeDelegate, MessageComposeResult, MessageComposerHost,
    MessageDraft,
};
