//! Entity slicing over UTF-16 offsets
//!
//! Telegram reports entity offsets and lengths in UTF-16 code units, while
//! Rust strings index by byte. Characters outside the BMP (most emoji) take
//! two code units, CJK characters take one code unit but three bytes.

use super::types::MessageEntity;

/// Convert a UTF-16 offset into a byte offset within `text`
///
/// Returns `None` if the offset is past the end or falls inside a surrogate
/// pair.
#[must_use]
pub fn utf16_to_byte_offset(text: &str, utf16_offset: usize) -> Option<usize> {
    let mut units = 0;
    for (byte_idx, ch) in text.char_indices() {
        if units == utf16_offset {
            return Some(byte_idx);
        }
        if units > utf16_offset {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == utf16_offset).then_some(text.len())
}

/// Slice `text` by a UTF-16 offset and length
#[must_use]
pub fn slice_utf16(text: &str, offset: usize, length: usize) -> Option<&str> {
    let start = utf16_to_byte_offset(text, offset)?;
    let end = utf16_to_byte_offset(text, offset.checked_add(length)?)?;
    text.get(start..end)
}

/// Text covered by an entity
#[must_use]
pub fn entity_text<'a>(text: &'a str, entity: &MessageEntity) -> Option<&'a str> {
    slice_utf16(text, entity.offset, entity.length)
}

/// Find the first `mention` entity that names `@username`
#[must_use]
pub fn find_mention<'a>(
    text: &str,
    entities: &'a [MessageEntity],
    username: &str,
) -> Option<&'a MessageEntity> {
    let needle = format!("@{username}");
    entities
        .iter()
        .filter(|e| e.kind == "mention")
        .find(|e| entity_text(text, e) == Some(needle.as_str()))
}

/// Text following an entity, trimmed
#[must_use]
pub fn text_after<'a>(text: &'a str, entity: &MessageEntity) -> &'a str {
    entity
        .offset
        .checked_add(entity.length)
        .and_then(|end| utf16_to_byte_offset(text, end))
        .map_or("", |start| text[start..].trim())
}
