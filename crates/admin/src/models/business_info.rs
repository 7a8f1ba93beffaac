//! Shop contact details shown in the storefront footer.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ValidationError, required};

/// Country calling code every WhatsApp number must start with.
const WHATSAPP_COUNTRY_CODE: &str = "62";

/// Validated business profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: String,
    pub tagline: String,
    /// Digits only, starting with the country code.
    pub whatsapp_number: String,
    pub instagram_url: Option<Url>,
    pub tiktok_url: Option<Url>,
}

impl BusinessInfo {
    /// `wa.me` chat link for the WhatsApp number.
    #[must_use]
    pub fn whatsapp_url(&self) -> String {
        format!("https://wa.me/{}", self.whatsapp_number)
    }
}

impl Default for BusinessInfo {
    fn default() -> Self {
        Self {
            name: "Crunchbox".to_string(),
            tagline: "Camilan renyah untuk setiap suasana".to_string(),
            whatsapp_number: "6281234567890".to_string(),
            instagram_url: None,
            tiktok_url: None,
        }
    }
}

/// Unvalidated business profile as entered by an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfoInput {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    pub whatsapp_number: String,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub tiktok_url: Option<String>,
}

impl BusinessInfoInput {
    /// Validate and normalize the profile.
    ///
    /// Spaces, dashes and a leading `+` are stripped from the WhatsApp number.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name or number is missing, the number
    /// does not start with `62`, or a social link is not an http(s) URL.
    pub fn validate(self) -> Result<BusinessInfo, ValidationError> {
        let name = required("name", &self.name)?;

        let raw_number = required("whatsapp_number", &self.whatsapp_number)?;
        let whatsapp_number: String = raw_number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '+' | '(' | ')'))
            .collect();
        if !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new(
                "whatsapp_number",
                "must contain only digits",
            ));
        }
        if !whatsapp_number.starts_with(WHATSAPP_COUNTRY_CODE)
            || whatsapp_number.len() <= WHATSAPP_COUNTRY_CODE.len()
        {
            return Err(ValidationError::new(
                "whatsapp_number",
                format!("must start with {WHATSAPP_COUNTRY_CODE}"),
            ));
        }

        Ok(BusinessInfo {
            name,
            tagline: self.tagline.trim().to_string(),
            whatsapp_number,
            instagram_url: social_url("instagram_url", self.instagram_url.as_deref())?,
            tiktok_url: social_url("tiktok_url", self.tiktok_url.as_deref())?,
        })
    }
}

impl From<BusinessInfo> for BusinessInfoInput {
    fn from(info: BusinessInfo) -> Self {
        Self {
            name: info.name,
            tagline: info.tagline,
            whatsapp_number: info.whatsapp_number,
            instagram_url: info.instagram_url.map(String::from),
            tiktok_url: info.tiktok_url.map(String::from),
        }
    }
}

/// Parse an optional profile link. Blank means "no link".
fn social_url(field: &'static str, value: Option<&str>) -> Result<Option<Url>, ValidationError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let url = Url::parse(value).map_err(|e| ValidationError::new(field, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::new(field, "must be an http(s) link"));
    }

    Ok(Some(url))
}
