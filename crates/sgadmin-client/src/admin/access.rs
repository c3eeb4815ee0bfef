//! Granting and revoking access.

use strum::{Display, EnumString};

use super::{AdminClient, Outcome};
use crate::error::ClientError;
use crate::params::ParameterSet;
use crate::request_url::Action;
use crate::transport::Transport;

/// What a customer is being given access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AccessTarget {
    /// Individual documents, addressed by `docid`.
    Documents,
    /// Publications, addressed by `pubid`.
    Publications,
}

impl AccessTarget {
    /// Name of the identifier-list parameter for this target.
    #[must_use]
    pub const fn parameter(self) -> &'static str {
        match self {
            Self::Documents => "docid",
            Self::Publications => "pubid",
        }
    }

    const fn grant_action(self) -> Action {
        match self {
            Self::Documents => Action::GrantDocumentAccess,
            Self::Publications => Action::GrantPublicationAccess,
        }
    }

    const fn revoke_action(self) -> Action {
        match self {
            Self::Documents => Action::RevokeDocumentAccess,
            Self::Publications => Action::RevokePublicationAccess,
        }
    }
}

impl<T: Transport> AdminClient<T> {
    /// Grants every customer in `customers` access to every target id.
    ///
    /// Either list may exceed the chunk size; both exceeding it produces
    /// the full cross product of batches.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn grant_access<C: AsRef<str>, I: AsRef<str>>(
        &self,
        target: AccessTarget,
        customers: &[C],
        ids: &[I],
    ) -> Result<Outcome<()>, ClientError> {
        let parameters = access_parameters(target, customers, ids);
        self.command(target.grant_action(), &parameters)
    }

    /// Revokes every customer's access to every target id.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn revoke_access<C: AsRef<str>, I: AsRef<str>>(
        &self,
        target: AccessTarget,
        customers: &[C],
        ids: &[I],
    ) -> Result<Outcome<()>, ClientError> {
        let parameters = access_parameters(target, customers, ids);
        self.command(target.revoke_action(), &parameters)
    }

    /// Grants customers access to documents.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn grant_document_access<C: AsRef<str>, I: AsRef<str>>(
        &self,
        customers: &[C],
        documents: &[I],
    ) -> Result<Outcome<()>, ClientError> {
        self.grant_access(AccessTarget::Documents, customers, documents)
    }

    /// Revokes customers' access to documents.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn revoke_document_access<C: AsRef<str>, I: AsRef<str>>(
        &self,
        customers: &[C],
        documents: &[I],
    ) -> Result<Outcome<()>, ClientError> {
        self.revoke_access(AccessTarget::Documents, customers, documents)
    }

    /// Grants customers access to publications.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn grant_publication_access<C: AsRef<str>, I: AsRef<str>>(
        &self,
        customers: &[C],
        publications: &[I],
    ) -> Result<Outcome<()>, ClientError> {
        self.grant_access(AccessTarget::Publications, customers, publications)
    }

    /// Revokes customers' access to publications.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn revoke_publication_access<C: AsRef<str>, I: AsRef<str>>(
        &self,
        customers: &[C],
        publications: &[I],
    ) -> Result<Outcome<()>, ClientError> {
        self.revoke_access(AccessTarget::Publications, customers, publications)
    }
}

fn access_parameters<C: AsRef<str>, I: AsRef<str>>(
    target: AccessTarget,
    customers: &[C],
    ids: &[I],
) -> ParameterSet {
    ParameterSet::new()
        .with_ids("custid", customers)
        .with_ids(target.parameter(), ids)
}
