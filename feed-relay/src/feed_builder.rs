use crate::rss_utils::time::{format_rss_date, parse_created_at};
use crate::store::write_atomic;
use crate::types::{Entry, RelayError, Result, SiteMetadata};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Outbound RSS 2.0 document, rebuilt from scratch on every run.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub description: String,
    pub last_build_date: Option<String>,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub description: String,
    pub categories: Vec<String>,
}

/// Newest-first document of every entry with a readable creation time.
pub fn build(site: &SiteMetadata, entries: &[Entry]) -> FeedDocument {
    let mut dated: Vec<_> = entries
        .iter()
        .filter_map(|entry| match parse_created_at(&entry.created_at) {
            Some(created) => Some((created, entry)),
            None => {
                debug!("Leaving out entry {} with unreadable created_at {:?}", entry.id, entry.created_at);
                None
            }
        })
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let last_build_date = dated.first().map(|(created, _)| format_rss_date(*created));
    let items = dated
        .into_iter()
        .map(|(created, entry)| FeedItem {
            id: entry.id.clone(),
            title: entry.title.clone(),
            link: entry.link.clone(),
            pub_date: format_rss_date(created),
            description: entry.content.clone(),
            categories: entry.categories.clone(),
        })
        .collect();

    FeedDocument {
        title: site.title.clone(),
        link: site.link.clone(),
        description: site.description.clone(),
        last_build_date,
        items,
    }
}

impl FeedDocument {
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;

        let mut rss_start = BytesStart::new("rss");
        rss_start.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss_start)).map_err(xml_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("channel")))
            .map_err(xml_error)?;

        write_text_element(&mut writer, "title", &self.title)?;
        write_text_element(&mut writer, "link", &self.link)?;
        write_text_element(&mut writer, "description", &self.description)?;
        if let Some(date) = &self.last_build_date {
            write_text_element(&mut writer, "lastBuildDate", date)?;
        }

        for item in &self.items {
            writer
                .write_event(Event::Start(BytesStart::new("item")))
                .map_err(xml_error)?;
            write_text_element(&mut writer, "id", &item.id)?;
            write_text_element(&mut writer, "title", &item.title)?;
            write_text_element(&mut writer, "link", &item.link)?;
            write_text_element(&mut writer, "pubDate", &item.pub_date)?;
            write_text_element(&mut writer, "description", &item.description)?;
            for category in &item.categories {
                write_text_element(&mut writer, "category", category)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("item")))
                .map_err(xml_error)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("channel")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("rss")))
            .map_err(xml_error)?;

        let mut out = writer.into_inner();
        out.push(b'\n');
        String::from_utf8(out).map_err(|e| RelayError::Xml(e.to_string()))
    }

    /// Render and atomically replace the file at `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml()?;
        write_atomic(path, xml.as_bytes())?;
        info!("Wrote feed with {} items to {}", self.items.len(), path.display());
        Ok(())
    }
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)?;
    Ok(())
}

fn xml_error<E: std::fmt::Display>(e: E) -> RelayError {
    RelayError::Xml(e.to_string())
}
