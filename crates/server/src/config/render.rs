use serde::Deserialize;

/// Rendering configuration shared by every binding.
#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    /// Prefix of ticket links; the ticket id is appended.
    #[serde(default = "default_ticket_base_url")]
    pub ticket_base_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ticket_base_url: default_ticket_base_url(),
        }
    }
}

fn default_ticket_base_url() -> String {
    relay_render::DEFAULT_TICKET_BASE_URL.to_owned()
}
