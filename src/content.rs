// Message classification. The checks run in a fixed order: an existing
// file wins over URL shape, URL shape wins over plain text. A file whose
// path happens to look like a URL is therefore pushed as a file.

use std::path::Path;

/// What kind of push a message turns into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    File,
    Link,
    Note,
}

/// Classify a command-line message. Messages read from standard input
/// never go through this; they are always notes.
pub fn classify(arg: &str) -> ContentKind {
    if Path::new(arg).is_file() {
        ContentKind::File
    } else if looks_like_url(arg) {
        ContentKind::Link
    } else {
        ContentKind::Note
    }
}

/// `<scheme>://<rest>` where the scheme is one or more ASCII letters and
/// the rest is non-empty. Deliberately shallow; anything stricter would
/// reject URLs the service happily accepts.
fn looks_like_url(arg: &str) -> bool {
    match arg.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphabetic())
                && !rest.is_empty()
        }
        None => false,
    }
}
