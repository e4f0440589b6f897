use crate::document::Document;

pub const MAX_TITLE_CHARS: usize = 512;
pub const MAX_AUTHOR_CHARS: usize = 256;
pub const MAX_CONCEPT_CHARS: usize = 128;

/// true if the string has no leading or trailing whitespace, no control
/// characters anywhere, and no more than `max_chars` characters.
pub fn check_control_leading_trailing<G>(
    given: G,
    max_chars: Option<usize>
) -> bool
where
    G: AsRef<str>
{
    let given_ref = given.as_ref();

    if let Some(ch) = given_ref.chars().next() {
        if ch.is_whitespace() {
            return false;
        }
    }

    if let Some(ch) = given_ref.chars().next_back() {
        if ch.is_whitespace() {
            return false;
        }
    }

    let mut char_count = 0;

    for ch in given_ref.chars() {
        if ch.is_control() {
            return false;
        }

        char_count += 1;

        if let Some(max) = max_chars {
            if char_count > max {
                return false;
            }
        }
    }

    true
}

pub fn title_valid(given: &str) -> bool {
    !given.is_empty() && check_control_leading_trailing(given, Some(MAX_TITLE_CHARS))
}

pub fn author_valid(given: &str) -> bool {
    !given.is_empty() && check_control_leading_trailing(given, Some(MAX_AUTHOR_CHARS))
}

pub fn concept_valid(given: &str) -> bool {
    check_control_leading_trailing(given, Some(MAX_CONCEPT_CHARS))
}

pub fn url_valid(given: &str) -> bool {
    url::Url::parse(given).is_ok()
}

/// reason a document was rejected before being sent to the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalid {
    Title,
    Author,
    Url,
    Concept1,
    Concept2,
}

impl std::fmt::Display for Invalid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Invalid::Title => write!(f, "invalid document title"),
            Invalid::Author => write!(f, "invalid document author"),
            Invalid::Url => write!(f, "invalid document url"),
            Invalid::Concept1 => write!(f, "invalid document concept1"),
            Invalid::Concept2 => write!(f, "invalid document concept2"),
        }
    }
}

impl std::error::Error for Invalid {}

pub fn document_valid(doc: &Document) -> Result<(), Invalid> {
    if !title_valid(&doc.title) {
        return Err(Invalid::Title);
    }

    if !author_valid(&doc.author) {
        return Err(Invalid::Author);
    }

    if !url_valid(&doc.url) {
        return Err(Invalid::Url);
    }

    if !concept_valid(&doc.concept1) {
        return Err(Invalid::Concept1);
    }

    if !concept_valid(&doc.concept2) {
        return Err(Invalid::Concept2);
    }

    Ok(())
}
