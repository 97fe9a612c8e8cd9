/// Recipient resolver
use crate::error::AnnounceError;
use crate::models::Audience;
use crate::routing::policy::RecipientPolicy;
use crate::services::SubmissionStore;
use std::collections::HashSet;
use std::sync::Arc;

pub struct RecipientResolver {
    store: Arc<dyn SubmissionStore>,
    policy: RecipientPolicy,
}

impl RecipientResolver {
    pub fn new(store: Arc<dyn SubmissionStore>, policy: RecipientPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> RecipientPolicy {
        self.policy
    }

    /// Ordered, de-duplicated destination addresses for the selected audiences
    pub async fn resolve(&self, selected: &[Audience]) -> Result<Vec<String>, AnnounceError> {
        let mut seen = HashSet::new();
        let mut recipients = Vec::new();

        for audience in self.policy.audiences(selected) {
            for contact in self.store.contacts_for(audience).await? {
                if seen.insert(contact.email.to_lowercase()) {
                    recipients.push(contact.email);
                }
            }
        }

        tracing::debug!(
            policy = %self.policy,
            recipient_count = recipients.len(),
            "Resolved recipients"
        );

        Ok(recipients)
    }
}
