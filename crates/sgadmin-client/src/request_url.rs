//! Request URL construction.

use strum::{Display, IntoStaticStr};
use url::Url;

use crate::settings::ClientSettings;

/// Server actions, named as the server expects them in the `action` query
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Action {
    /// List customers, optionally restricted to some ids.
    ListCustomers,
    /// Register a customer.
    AddCustomer,
    /// Change a customer's details.
    UpdateCustomer,
    /// Remove customers.
    DeleteCustomer,
    /// Block customers from opening documents.
    SuspendCustomer,
    /// Lift a suspension.
    ActivateCustomer,
    /// Email a customer their licence file again.
    ResendLicense,
    /// List every document.
    ListDocuments,
    /// List every publication.
    ListPublications,
    /// Grant customers access to documents.
    GrantDocumentAccess,
    /// Revoke customers' access to documents.
    RevokeDocumentAccess,
    /// Grant customers access to publications.
    GrantPublicationAccess,
    /// Revoke customers' access to publications.
    RevokePublicationAccess,
    /// Read document access events.
    ListAccessLog,
}

impl Action {
    /// Wire name of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Builds the URL for one action: the configured server address with the
/// action, the credentials and any extra pairs appended to its query.
#[must_use]
pub fn action_url(settings: &ClientSettings, action: Action, extra: &[(&str, &str)]) -> Url {
    let mut url = settings.server().clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("action", action.as_str())
            .append_pair("username", settings.username())
            .append_pair("password", settings.password());
        for (name, value) in extra {
            query.append_pair(name, value);
        }
    }
    url
}

/// Renders a URL without its query string or fragment.
pub(crate) fn redact(url: &Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.set_fragment(None);
    redacted.set_password(None).unwrap_or_default();
    redacted.to_string()
}
