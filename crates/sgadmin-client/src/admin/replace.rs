//! Replacing a customer's whole access set.

use std::collections::BTreeSet;

use sgadmin_protocol::RawResponse;
use tracing::{debug, info};

use super::{AccessTarget, AdminClient, Outcome};
use crate::error::ClientError;
use crate::transport::Transport;

impl<T: Transport> AdminClient<T> {
    /// Makes `desired` the exact set of targets `customer` can open.
    ///
    /// Lists every target, revokes those outside `desired`, then grants
    /// `desired`. Either step is skipped when its list is empty. A failed
    /// listing or revoke is returned as-is and nothing further is sent.
    ///
    /// When no grant is needed the call reports success without another
    /// request, even if the revoke was skipped too.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn replace_access<S: AsRef<str>>(
        &self,
        target: AccessTarget,
        customer: &str,
        desired: &[S],
    ) -> Result<Outcome<()>, ClientError> {
        let universe = match self.target_ids(target)? {
            Outcome::Success(ids) => ids,
            Outcome::Failure(failure) => return Ok(Outcome::Failure(failure)),
        };
        let keep: BTreeSet<&str> = desired.iter().map(AsRef::as_ref).collect();
        let revoke: Vec<&str> = universe
            .iter()
            .map(String::as_str)
            .filter(|id| !keep.contains(id))
            .collect();
        info!(
            %target,
            customer,
            revoke = revoke.len(),
            grant = desired.len(),
            "replacing access set"
        );

        if !revoke.is_empty() {
            let revoked = self.revoke_access(target, &[customer], &revoke)?;
            if !revoked.is_success() {
                return Ok(revoked);
            }
        }
        if !desired.is_empty() {
            return self.grant_access(target, &[customer], desired);
        }
        debug!(%target, customer, "nothing to grant; reporting success");
        Ok(Outcome::from_response(&RawResponse::success(), |_| ()))
    }

    /// Replaces the documents a customer can open.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn replace_document_access<S: AsRef<str>>(
        &self,
        customer: &str,
        documents: &[S],
    ) -> Result<Outcome<()>, ClientError> {
        self.replace_access(AccessTarget::Documents, customer, documents)
    }

    /// Replaces the publications a customer can open.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn replace_publication_access<S: AsRef<str>>(
        &self,
        customer: &str,
        publications: &[S],
    ) -> Result<Outcome<()>, ClientError> {
        self.replace_access(AccessTarget::Publications, customer, publications)
    }

    fn target_ids(&self, target: AccessTarget) -> Result<Outcome<Vec<String>>, ClientError> {
        Ok(match target {
            AccessTarget::Documents => self
                .list_documents()?
                .map(|documents| documents.into_iter().map(|document| document.id).collect()),
            AccessTarget::Publications => self.list_publications()?.map(|publications| {
                publications
                    .into_iter()
                    .map(|publication| publication.id)
                    .collect()
            }),
        })
    }
}
