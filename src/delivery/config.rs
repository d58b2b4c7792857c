//! Delivery configuration

use std::time::Duration;

/// Marker replaced by the update text when a post template is set
pub const TEMPLATE_TEXT_MARKER: &str = "{text}";

/// Delivery poller configuration options
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Cadence of the spawned poll task
    pub poll_interval: Duration,

    /// Upper bound on a single publish call; a timed-out call counts as a
    /// failure and the task is retried next pass
    pub publish_timeout: Duration,

    /// Optional template applied to the update text before posting,
    /// with `{text}` as the substitution marker
    pub post_template: Option<String>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5 * 60),
            publish_timeout: Duration::from_secs(30),
            post_template: None,
        }
    }
}

impl DeliveryConfig {
    /// Set the poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the publish timeout
    pub fn publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }

    /// Set the post template
    pub fn post_template(mut self, template: impl Into<String>) -> Self {
        self.post_template = Some(template.into());
        self
    }

    /// Render the outgoing text for an update
    pub(crate) fn render(&self, text: &str) -> String {
        match &self.post_template {
            Some(template) => template.replace(TEMPLATE_TEXT_MARKER, text),
            None => text.to_owned(),
        }
    }
}
