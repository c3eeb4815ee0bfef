//! Documents and publications.

use serde::Serialize;
use sgadmin_protocol::NamedRecord;
use time::{Date, OffsetDateTime};

use super::{AdminClient, Outcome};
use crate::error::ClientError;
use crate::params::ParameterSet;
use crate::request_url::Action;
use crate::transport::Transport;

/// Column order of a `listDocuments` data line.
pub const DOCUMENT_FIELDS: [&str; 6] = [
    "id",
    "title",
    "description",
    "published_at",
    "expiry_date",
    "publications",
];

/// Column order of a `listPublications` data line.
pub const PUBLICATION_FIELDS: [&str; 5] = ["id", "name", "description", "created_at", "documents"];

/// A protected document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Server-assigned identifier.
    pub id: String,
    /// Title shown to readers.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// When the document was published.
    pub published_at: Option<OffsetDateTime>,
    /// Date after which nobody may open it.
    pub expiry_date: Option<Date>,
    /// Publications that include it.
    pub publications: Vec<String>,
}

impl Document {
    /// Builds a document from a zipped data line.
    #[must_use]
    pub fn from_record(record: &NamedRecord) -> Self {
        Self {
            id: record.text("id").unwrap_or_default(),
            title: record.text("title").unwrap_or_default(),
            description: record.text("description").unwrap_or_default(),
            published_at: record.timestamp("published_at"),
            expiry_date: record.date("expiry_date"),
            publications: record.id_list("publications"),
        }
    }
}

/// A named group of documents granted together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// When the publication was created.
    pub created_at: Option<OffsetDateTime>,
    /// Member documents.
    pub documents: Vec<String>,
}

impl Publication {
    /// Builds a publication from a zipped data line.
    #[must_use]
    pub fn from_record(record: &NamedRecord) -> Self {
        Self {
            id: record.text("id").unwrap_or_default(),
            name: record.text("name").unwrap_or_default(),
            description: record.text("description").unwrap_or_default(),
            created_at: record.timestamp("created_at"),
            documents: record.id_list("documents"),
        }
    }
}

impl<T: Transport> AdminClient<T> {
    /// Lists every document.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn list_documents(&self) -> Result<Outcome<Vec<Document>>, ClientError> {
        self.listing(
            Action::ListDocuments,
            &ParameterSet::new(),
            &DOCUMENT_FIELDS,
            Document::from_record,
        )
    }

    /// Lists every publication.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn list_publications(&self) -> Result<Outcome<Vec<Publication>>, ClientError> {
        self.listing(
            Action::ListPublications,
            &ParameterSet::new(),
            &PUBLICATION_FIELDS,
            Publication::from_record,
        )
    }
}
