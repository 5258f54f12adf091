//! Contact actions offered on each safe-location card.

use crate::MAPS_SEARCH_URL;
use crate::error::LinkError;

use models::SafeLocation;

use url::Url;

const TEL_SCHEME: &str = "tel:";

/// `tel:` URI for the location's phone, if it lists one.
pub fn dial_uri(location: &SafeLocation) -> Option<String> {
    location
        .phone
        .as_deref()
        .map(|phone| format!("{TEL_SCHEME}{}", phone.trim()))
}

/// Map search link for the location's street address.
pub fn directions_url(location: &SafeLocation) -> Result<Url, LinkError> {
    let url = Url::parse_with_params(
        MAPS_SEARCH_URL,
        &[("api", "1"), ("query", location.address.as_str())],
    )?;
    Ok(url)
}
