use scrapedesk_store::{Company, StoreConfig};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialNetwork {
    Facebook,
    Instagram,
    Twitter,
    LinkedIn,
}

impl SocialNetwork {
    pub fn label(&self) -> &'static str {
        match self {
            SocialNetwork::Facebook => "Facebook",
            SocialNetwork::Instagram => "Instagram",
            SocialNetwork::Twitter => "Twitter",
            SocialNetwork::LinkedIn => "LinkedIn",
        }
    }

    /// Compact tag for table cells.
    pub fn tag(&self) -> &'static str {
        match self {
            SocialNetwork::Facebook => "fb",
            SocialNetwork::Instagram => "ig",
            SocialNetwork::Twitter => "tw",
            SocialNetwork::LinkedIn => "in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialProfile {
    pub network: SocialNetwork,
    pub url: String,
    pub handle: String,
}

/// Trailing `/`-separated segment of a stored path.
pub fn asset_file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn logo_url(config: &StoreConfig, company: &Company) -> Option<Url> {
    company
        .logo_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| config.logo_url(asset_file_name(path)))
}

pub fn screenshot_url(config: &StoreConfig, company: &Company) -> Option<Url> {
    company
        .screenshot_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| config.screenshot_url(asset_file_name(path)))
}

/// Websites are stored without a scheme.
pub fn website_link(website: &str) -> String {
    format!("http://{}", website)
}

/// Last non-empty path segment of a profile URL, e.g. `acme` for
/// `https://twitter.com/acme/`.
pub fn profile_handle(url: &str) -> &str {
    asset_file_name(url.trim_end_matches('/'))
}

fn profile(network: SocialNetwork, url: Option<&String>) -> Option<SocialProfile> {
    url.filter(|u| !u.is_empty()).map(|u| SocialProfile {
        network,
        url: u.clone(),
        handle: profile_handle(u).to_string(),
    })
}

/// Every social profile the company has, in display order.
pub fn social_profiles(company: &Company) -> Vec<SocialProfile> {
    [
        profile(SocialNetwork::Facebook, company.facebook.as_ref()),
        profile(SocialNetwork::Instagram, company.instagram.as_ref()),
        profile(SocialNetwork::Twitter, company.twitter.as_ref()),
        profile(SocialNetwork::LinkedIn, company.linkedin.as_ref()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Profiles shown in the list table. Instagram is detail-only.
pub fn list_profiles(company: &Company) -> Vec<SocialNetwork> {
    social_profiles(company)
        .into_iter()
        .map(|p| p.network)
        .filter(|network| *network != SocialNetwork::Instagram)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_file_name() {
        assert_eq!(asset_file_name("static/logos/acme.png"), "acme.png");
        assert_eq!(asset_file_name("acme.png"), "acme.png");
        assert_eq!(asset_file_name("static/logos/"), "");
    }

    #[test]
    fn test_asset_urls_use_trailing_segment() {
        let config = StoreConfig::default();
        let mut company = Company::new("1");
        company.logo_path = Some("/var/data/logos/acme.png".to_string());
        company.screenshot_path = Some("shots/acme-home.png".to_string());

        assert_eq!(
            logo_url(&config, &company).unwrap().as_str(),
            "http://localhost:8000/logos/acme.png"
        );
        assert_eq!(
            screenshot_url(&config, &company).unwrap().as_str(),
            "http://localhost:8000/screenshots/acme-home.png"
        );
    }

    #[test]
    fn test_missing_assets() {
        let config = StoreConfig::default();
        let mut company = Company::new("1");
        company.logo_path = Some(String::new());

        assert!(logo_url(&config, &company).is_none());
        assert!(screenshot_url(&config, &company).is_none());
    }

    #[test]
    fn test_social_profiles_skip_blank_entries() {
        let mut company = Company::new("1");
        company.facebook = Some("https://facebook.com/acme".to_string());
        company.instagram = Some("https://instagram.com/acme.co/".to_string());
        company.twitter = Some(String::new());

        let profiles = social_profiles(&company);

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].network, SocialNetwork::Facebook);
        assert_eq!(profiles[0].handle, "acme");
        assert_eq!(profiles[1].network, SocialNetwork::Instagram);
        assert_eq!(profiles[1].handle, "acme.co");
        assert_eq!(list_profiles(&company), vec![SocialNetwork::Facebook]);
    }

    #[test]
    fn test_website_link() {
        assert_eq!(website_link("acme.test"), "http://acme.test");
    }
}
