//! Dialog text fields and their input presets

/// Semantic content of a text field, used by hosts for autofill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextContentType {
    /// E-mail address
    EmailAddress,
    /// Password
    Password,
    /// Telephone number
    TelephoneNumber,
}

/// Keyboard layout requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyboardType {
    /// Host default
    #[default]
    Default,
    /// Layout for e-mail addresses
    EmailAddress,
    /// Digits-only phone pad
    PhonePad,
}

/// Automatic capitalization behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Autocapitalization {
    /// Capitalize the first letter of each sentence
    #[default]
    Sentences,
    /// Never capitalize
    None,
}

/// Input behaviour of a text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInputTraits {
    /// Autofill hint
    pub content_type: Option<TextContentType>,
    /// Keyboard layout
    pub keyboard: KeyboardType,
    /// Mask the entered text
    pub secure_entry: bool,
    /// Capitalization behaviour
    pub autocapitalization: Autocapitalization,
    /// Allow autocorrection
    pub autocorrection: bool,
    /// Allow spell checking
    pub spell_checking: bool,
}

impl Default for TextInputTraits {
    fn default() -> Self {
        Self {
            content_type: None,
            keyboard: KeyboardType::Default,
            secure_entry: false,
            autocapitalization: Autocapitalization::Sentences,
            autocorrection: true,
            spell_checking: true,
        }
    }
}

/// Text field shown inside a dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogTextField {
    /// Placeholder shown while empty
    pub placeholder: Option<String>,
    /// Initial text
    pub text: Option<String>,
    /// Input behaviour
    pub traits: TextInputTraits,
}

impl DialogTextField {
    /// Free-form text field
    pub fn plain() -> Self {
        Self::default()
    }

    /// Field tuned for e-mail addresses
    pub fn email() -> Self {
        Self::with_traits(TextInputTraits {
            content_type: Some(TextContentType::EmailAddress),
            keyboard: KeyboardType::EmailAddress,
            autocapitalization: Autocapitalization::None,
            spell_checking: false,
            ..TextInputTraits::default()
        })
    }

    /// Masked field for passwords
    pub fn password() -> Self {
        Self::with_traits(TextInputTraits {
            content_type: Some(TextContentType::Password),
            secure_entry: true,
            autocapitalization: Autocapitalization::None,
            autocorrection: false,
            spell_checking: false,
            ..TextInputTraits::default()
        })
    }

    /// Field tuned for phone numbers
    pub fn phone_number() -> Self {
        Self::with_traits(TextInputTraits {
            content_type: Some(TextContentType::TelephoneNumber),
            keyboard: KeyboardType::PhonePad,
            autocapitalization: Autocapitalization::None,
            autocorrection: false,
            spell_checking: false,
            ..TextInputTraits::default()
        })
    }

    /// Field with explicit input traits
    pub fn with_traits(traits: TextInputTraits) -> Self {
        Self {
            placeholder: None,
            text: None,
            traits,
        }
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the initial text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_preset() {
        let field = DialogTextField::password().placeholder("password");
        assert!(field.traits.secure_entry);
        assert!(!field.traits.autocorrection);
        assert_eq!(field.traits.content_type, Some(TextContentType::Password));
        assert_eq!(field.placeholder.as_deref(), Some("password"));
    }

    #[test]
    fn test_email_preset_keeps_autocorrection() {
        let field = DialogTextField::email();
        assert_eq!(field.traits.keyboard, KeyboardType::EmailAddress);
        assert!(field.traits.autocorrection);
        assert!(!field.traits.spell_checking);
    }

    #[test]
    fn test_phone_preset() {
        let field = DialogTextField::phone_number().text("+33");
        assert_eq!(field.traits.keyboard, KeyboardType::PhonePad);
        assert_eq!(field.text.as_deref(), Some("+33"));
    }
}
