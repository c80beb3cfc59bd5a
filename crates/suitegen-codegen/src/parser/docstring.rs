//! Recovery of doc string media types from feature source.
//!
//! The grammar parser keeps the content of a doc string but drops the media
//! type written after its opening delimiter, so the delimiter line is found
//! again in the source text.

const DELIMITERS: [&str; 2] = ["\"\"\"", "```"];

/// Media type written after the first doc string delimiter found on a line
/// following byte offset `start_from`, if any.
pub(super) fn content_type_after(source: &str, start_from: usize) -> Option<String> {
    let tail = source.get(start_from.min(source.len())..)?;
    let (_, rest) = tail.split_once('\n')?;
    rest.lines().find_map(|line| {
        let trimmed = line.trim_start();
        DELIMITERS
            .iter()
            .find_map(|delimiter| trimmed.strip_prefix(delimiter))
            .map(|after| after.trim().to_string())
    })
    .filter(|content_type| !content_type.is_empty())
}
