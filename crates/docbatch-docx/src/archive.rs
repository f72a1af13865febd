use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{DocxError, Result};

pub const CONTENT_TYPES: &str = "[Content_Types].xml";
pub const DOCUMENT_XML: &str = "word/document.xml";

const MINIMAL_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const MINIMAL_ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    name: String,
    data: Vec<u8>,
    stored: bool,
}

/// An OOXML package held in memory, parts kept in archive order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::read(BufReader::new(file))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::read(Cursor::new(bytes))
    }

    /// The smallest package Word opens: content types, root relationships
    /// and the given main document.
    pub fn minimal(document_xml: &str) -> Self {
        let mut package = Self::default();
        package.set_part(CONTENT_TYPES, MINIMAL_CONTENT_TYPES.as_bytes().to_vec());
        package.set_part("_rels/.rels", MINIMAL_ROOT_RELS.as_bytes().to_vec());
        package.set_part(DOCUMENT_XML, document_xml.as_bytes().to_vec());
        package
    }

    fn read<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());
        for idx in 0..archive.len() {
            let mut entry = archive.by_index(idx)?;
            if entry.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            parts.push(Part {
                name: entry.name().to_string(),
                data,
                stored: entry.compression() == CompressionMethod::Stored,
            });
        }
        if !parts.iter().any(|part| part.name == DOCUMENT_XML) {
            return Err(DocxError::MissingPart(DOCUMENT_XML.to_string()));
        }
        Ok(Self { parts })
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .map(|part| part.data.as_slice())
    }

    /// Replace the content of `name`, appending the part when it is new.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|part| part.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
                stored: false,
            }),
        }
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|part| part.name.as_str())
    }

    /// Parts whose text runs carry placeholders: the body, headers and footers.
    pub fn text_part_names(&self) -> Vec<String> {
        self.part_names()
            .filter(|name| is_text_part(name))
            .map(str::to_string)
            .collect()
    }

    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        for part in &self.parts {
            let method = if part.stored {
                CompressionMethod::Stored
            } else {
                CompressionMethod::Deflated
            };
            let options = SimpleFileOptions::default().compression_method(method);
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(&part.data)?;
        }
        Ok(zip.finish()?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write(Cursor::new(Vec::new()))?.into_inner())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = self.write(BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }
}

fn is_text_part(name: &str) -> bool {
    if name == DOCUMENT_XML {
        return true;
    }
    let Some(file) = name.strip_prefix("word/") else {
        return false;
    };
    !file.contains('/')
        && file.ends_with(".xml")
        && (file.starts_with("header") || file.starts_with("footer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_package_round_trips_through_zip() {
        let mut package = Package::minimal("<w:document/>");
        package.set_part("word/media/image1.png", vec![0x89, b'P', b'N', b'G', 0, 1, 2]);

        let bytes = package.to_bytes().expect("write package");
        let reread = Package::from_bytes(bytes).expect("read package");

        assert_eq!(reread.part(DOCUMENT_XML), Some("<w:document/>".as_bytes()));
        assert_eq!(
            reread.part("word/media/image1.png"),
            Some([0x89, b'P', b'N', b'G', 0, 1, 2].as_slice())
        );
        assert_eq!(reread.part_names().count(), 4);
    }

    #[test]
    fn archive_without_main_document_is_rejected() {
        let mut package = Package::default();
        package.set_part(CONTENT_TYPES, b"<Types/>".to_vec());
        let bytes = package.to_bytes().expect("write package");

        let err = Package::from_bytes(bytes).expect_err("missing document.xml");
        assert!(matches!(err, DocxError::MissingPart(_)));
    }

    #[test]
    fn headers_and_footers_are_text_parts() {
        assert!(is_text_part("word/document.xml"));
        assert!(is_text_part("word/header1.xml"));
        assert!(is_text_part("word/footer2.xml"));
        assert!(!is_text_part("word/styles.xml"));
        assert!(!is_text_part("word/_rels/header1.xml.rels"));
        assert!(!is_text_part("customXml/header.xml"));
    }
}
