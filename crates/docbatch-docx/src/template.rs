use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::archive::{DOCUMENT_XML, Package};
use crate::error::{DocxError, Result};
use crate::replace::Replacements;
use crate::runs::substitute_tree;
use crate::xml::{self, Node};

/// A `.docx` template loaded into memory.
#[derive(Debug, Clone)]
pub struct Template {
    package: Package,
}

impl Template {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_package(Package::open(path)?))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Ok(Self::from_package(Package::from_bytes(bytes)?))
    }

    /// A template made of a minimal package around `document_xml`.
    pub fn from_document_xml(document_xml: &str) -> Self {
        Self::from_package(Package::minimal(document_xml))
    }

    pub fn from_package(package: Package) -> Self {
        Self { package }
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Replace every literal key of `replacements` in the body, headers and
    /// footers. Other parts are carried over untouched.
    pub fn substitute(&self, replacements: &BTreeMap<String, String>) -> Result<Document> {
        let replacements = Replacements::new(replacements)?;
        let mut package = self.package.clone();
        let mut replaced = 0;

        if !replacements.is_empty() {
            for name in package.text_part_names() {
                let Some(bytes) = package.part(&name) else {
                    continue;
                };
                let source = std::str::from_utf8(bytes)
                    .map_err(|err| DocxError::malformed(&name, err.to_string()))?;
                let mut nodes = xml::parse(source, &name)?;
                let count: usize = nodes
                    .iter_mut()
                    .filter_map(|node| match node {
                        Node::Element(root) => Some(substitute_tree(root, &replacements)),
                        _ => None,
                    })
                    .sum();
                if count > 0 {
                    debug!(part = %name, replaced = count, "placeholders replaced");
                    package.set_part(&name, xml::write(&nodes).into_bytes());
                    replaced += count;
                }
            }
        }

        Ok(Document { package, replaced })
    }
}

/// A rewritten document ready to be saved.
#[derive(Debug, Clone)]
pub struct Document {
    package: Package,
    replaced: usize,
}

impl Document {
    /// Number of placeholder occurrences replaced across all parts.
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn document_xml(&self) -> Option<&str> {
        self.package
            .part(DOCUMENT_XML)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package.to_bytes()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.package.save(path)
    }
}

/// Load the template at `template_path` and substitute `replacements`.
pub fn substitute(
    template_path: impl AsRef<Path>,
    replacements: &BTreeMap<String, String>,
) -> Result<Document> {
    Template::open(template_path)?.substitute(replacements)
}
