//! Cockatrice `.cod` deck file writer.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <cockatrice_deck version="1">
//!   <deckname>Atraxa Superfriends</deckname>
//!   <bannerCard providerId="">Atraxa, Praetors' Voice</bannerCard>
//!   <comments></comments>
//!   <tags>
//!     <tag>deck2trice</tag>
//!     <tag>Commander</tag>
//!   </tags>
//!   <zone name="main">
//!     <card number="1" name="Sol Ring" setShortName="LEA"/>
//!   </zone>
//!   <zone name="side">
//!     <card number="1" name="Atraxa, Praetors&apos; Voice"/>
//!   </zone>
//! </cockatrice_deck>
//! ```
//!
//! Optional card attributes are left out entirely when empty, and
//! `bannerCard` only appears for decks with a commander. Characters XML 1.0
//! does not allow (most C0 controls, U+FFFE, U+FFFF) are dropped from every
//! text and attribute value.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::DECK_EXTENSION;
use crate::error::{Deck2TriceError, Result};
use crate::models::{CardRecord, DeckModel, ExportDeck};
use crate::normalize::normalize_name;

pub const ROOT_ELEMENT: &str = "cockatrice_deck";
pub const FORMAT_VERSION: &str = "1";

type XmlWriter = Writer<Vec<u8>>;

/// Render the export view of a deck as an indented UTF-8 document.
pub fn render(export: &ExportDeck<'_>) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(ROOT_ELEMENT);
    root.push_attribute(("version", FORMAT_VERSION));
    writer.write_event(Event::Start(root))?;

    text_element(&mut writer, BytesStart::new("deckname"), &export.deck.name)?;
    if let Some(banner) = export.banner_card() {
        let mut element = BytesStart::new("bannerCard");
        element.push_attribute(("providerId", ""));
        text_element(&mut writer, element, banner)?;
    }
    text_element(&mut writer, BytesStart::new("comments"), &export.deck.description)?;

    writer.write_event(Event::Start(BytesStart::new("tags")))?;
    for tag in export.tags() {
        text_element(&mut writer, BytesStart::new("tag"), &tag)?;
    }
    writer.write_event(Event::End(BytesEnd::new("tags")))?;

    zone(&mut writer, "main", export.main().iter())?;
    zone(&mut writer, "side", export.side.iter().copied())?;

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Start tag, text and end tag on one line, even for empty text. Only `<`,
/// `>` and `&` are escaped in text so names like `Praetors' Voice` stay
/// readable.
fn text_element(writer: &mut XmlWriter, start: BytesStart<'_>, text: &str) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    let text = xml_chars(text);
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(&*text))))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
}

/// `text` without the characters an XML 1.0 document cannot contain.
pub fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

fn zone<'c>(
    writer: &mut XmlWriter,
    name: &str,
    cards: impl ExactSizeIterator<Item = &'c CardRecord>,
) -> Result<()> {
    let mut element = BytesStart::new("zone");
    element.push_attribute(("name", name));
    if cards.len() == 0 {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    for card in cards {
        writer.write_event(Event::Empty(card_element(card)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("zone")))?;
    Ok(())
}

fn card_element(card: &CardRecord) -> BytesStart<'static> {
    let mut element = BytesStart::new("card");
    element.push_attribute(("number", card.quantity.to_string().as_str()));
    element.push_attribute(("name", &*xml_chars(&card.name)));
    for (key, value) in [
        ("setShortName", &card.set_code),
        ("collectorNumber", &card.collector_number),
        ("uuid", &card.uuid),
    ] {
        let value = xml_chars(value);
        if !value.is_empty() {
            element.push_attribute((key, &*value));
        }
    }
    element
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Where [`export`] writes `deck` inside `dir`.
pub fn deck_path(deck: &DeckModel, dir: &Path) -> PathBuf {
    dir.join(format!("{}.{}", normalize_name(&deck.name), DECK_EXTENSION))
}

/// Write `deck` as `<dir>/<normalized name>.cod`, creating `dir` if needed.
///
/// The side zone holds the sideboard plus every commander; the deck itself is
/// left untouched, so exporting twice produces the same file. Decks whose
/// names normalize to the same filename overwrite each other.
pub fn export<P: AsRef<Path>>(deck: &DeckModel, dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| Deck2TriceError::filesystem(dir, e))?;

    let bytes = render(&deck.export_view())?;
    let path = deck_path(deck, dir);
    debug!("Writing to {}", path.display());

    // A failed write must never leave a truncated deck at `path`.
    let tmp_path = path.with_file_name(format!(
        ".{}.tmp",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("deck")
    ));
    let result = fs::write(&tmp_path, &bytes).and_then(|()| fs::rename(&tmp_path, &path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(Deck2TriceError::filesystem(&path, e));
    }

    Ok(path)
}
