//! Calendar source for the GAD collection calendar at `inzamelkalender.gad.nl`.

/// Walking the calendar page for `(label, date)` entries.
pub mod markup;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use kliko_core::{
    model::RawEntry,
    ports::{CalendarSource, PortError},
};

pub use markup::{extract, raw_entries};

const BASE_URL: &str = "https://inzamelkalender.gad.nl";

/// Collection calendar of a single address.
pub struct GadCalendar {
    client: Client,
    base_url: String,
    address: String,
}

impl GadCalendar {
    /// Create a calendar source for `address` (`"<postcode>:<house number>"`, e.g.
    /// `"1221CC:4"`) bound to the given HTTP client.
    #[must_use]
    pub fn new<A: Into<String>>(client: Client, address: A) -> Self {
        Self::with_base_url(client, BASE_URL, address)
    }

    /// Same as [`GadCalendar::new`] against another host, e.g. a local mirror.
    #[must_use]
    pub fn with_base_url<B: Into<String>, A: Into<String>>(
        client: Client,
        base_url: B,
        address: A,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            address: address.into(),
        }
    }

    /// URL of the address page holding the upcoming collections.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::InvalidAddress`] when the address is blank.
    pub fn address_url(&self) -> Result<String, PortError> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(PortError::InvalidAddress);
        }
        Ok(format!(
            "{}/adres/{address}",
            self.base_url.trim_end_matches('/')
        ))
    }
}

#[async_trait]
impl CalendarSource for GadCalendar {
    async fn fetch_entries(&self) -> Result<Vec<RawEntry>, PortError> {
        let url = self.address_url()?;
        debug!(%url, "Fetching collection calendar");

        let page = fetch_text(self.client.get(url)).await?;
        let entries = raw_entries(&page);
        debug!(entries = entries.len(), "Read calendar entries");
        Ok(entries)
    }
}

// Small helper to fetch a page body with status handling.
async fn fetch_text(req: RequestBuilder) -> Result<String, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .text()
        .await
        .map_err(PortError::from)
}
