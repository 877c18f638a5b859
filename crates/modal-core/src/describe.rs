//! Short descriptions of modal outcomes
//!
//! Result and status enums render as `.cancelled`, `.sent`, `.authorized` and
//! so on, which keeps transcripts of presented flows compact.

/// Compact, stable description of an outcome value
pub trait ModalDescribe {
    /// Description such as `.cancelled`
    fn modal_description(&self) -> String;
}

impl ModalDescribe for String {
    fn modal_description(&self) -> String {
        format!("{self:?}")
    }
}

impl ModalDescribe for () {
    fn modal_description(&self) -> String {
        "()".to_string()
    }
}

impl<T: ModalDescribe> ModalDescribe for Option<T> {
    fn modal_description(&self) -> String {
        match self {
            Some(value) => value.modal_description(),
            None => "nil".to_string(),
        }
    }
}

impl<T: ModalDescribe> ModalDescribe for Vec<T> {
    fn modal_description(&self) -> String {
        let items: Vec<String> = self.iter().map(ModalDescribe::modal_description).collect();
        format!("[{}]", items.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_descriptions() {
        assert_eq!(Some("a".to_string()).modal_description(), "\"a\"");
        assert_eq!(None::<String>.modal_description(), "nil");
        assert_eq!(
            vec!["a".to_string(), "b".to_string()].modal_description(),
            "[\"a\", \"b\"]"
        );
    }
}
