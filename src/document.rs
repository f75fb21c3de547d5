use log::info;
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One element of the reference table carrying an `id`.
///
/// Fields are keyed by the class names found on its descendants. When several
/// descendants share a class, the first one in document order wins.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    fn from_element(element: ElementRef<'_>) -> Self {
        let mut fields = HashMap::new();
        // skip the record element itself, fields live below it
        for child in element.descendants().skip(1).filter_map(ElementRef::wrap) {
            let classes = child.value().classes().collect::<Vec<_>>();
            if classes.is_empty() {
                continue;
            }
            let text = leading_text(child);
            for class in classes {
                fields
                    .entry(class.to_owned())
                    .or_insert_with(|| text.clone());
            }
        }
        Self { fields }
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields.get(label).map(String::as_str)
    }
}

/// Text of the first child node, empty if that is not a text node.
fn leading_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .next()
        .and_then(|node| node.value().as_text())
        .map(|text| String::from(&**text))
        .unwrap_or_default()
}

/// Parsed reference table, indexed by element id.
#[derive(Debug, Clone, Default)]
pub struct Document {
    records: HashMap<String, Record>,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        let mut records = HashMap::new();
        for element in html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
        {
            if let Some(id) = element.value().id()
                && !records.contains_key(id)
            {
                records.insert(id.to_owned(), Record::from_element(element));
            }
        }
        Self { records }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        info!("Loading reference table {}", path.display());
        let markup = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse(&markup);
        info!("Indexed {} records", document.len());
        Ok(document)
    }

    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"<html><body><table>
        <tr>
          <td id="op-00">NOP<br><span class="bytes">1</span> <span class="cycles">4</span></td>
          <td id="op-01">LD BC,d16<br><span class="bytes">3</span></td>
          <td id="op-02"><span class="bytes"><b>1</b></span><span class="cycles">8</span></td>
          <td id="op-00"><span class="bytes">9</span></td>
        </tr>
    </table></body></html>"#;

    #[test]
    fn test_lookup_present_record() {
        let doc = Document::parse(TABLE);
        let record = doc.record("op-00").unwrap();
        assert_eq!(record.field("bytes"), Some("1"));
        assert_eq!(record.field("cycles"), Some("4"));
    }

    #[test]
    fn test_missing_record_and_field() {
        let doc = Document::parse(TABLE);
        assert!(doc.record("op-03").is_none());
        assert_eq!(doc.record("op-01").unwrap().field("cycles"), None);
    }

    #[test]
    fn test_first_record_with_id_wins() {
        let doc = Document::parse(TABLE);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.record("op-00").unwrap().field("bytes"), Some("1"));
    }

    #[test]
    fn test_non_text_first_child_is_empty() {
        let doc = Document::parse(TABLE);
        assert_eq!(doc.record("op-02").unwrap().field("bytes"), Some(""));
    }

    #[test]
    fn test_open_missing_file() {
        let err = Document::open("does/not/exist.html").unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }
}
