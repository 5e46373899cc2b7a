use crate::config::SiteSettings;
use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};

const NAV_ITEMS: &[(&str, &str)] = &[("/", "Home"), ("/posts", "Posts"), ("/about", "About")];

/// Builds the public page shell from static site settings.
#[derive(Clone)]
pub struct ChromeService {
    site: SiteSettings,
}

impl ChromeService {
    pub fn new(site: SiteSettings) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteSettings {
        &self.site
    }

    /// Absolute URL for a site-relative path.
    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}{}", self.site.canonical_base, path)
    }

    pub fn load(&self) -> LayoutChrome {
        let entries = NAV_ITEMS
            .iter()
            .map(|(href, label)| NavigationLinkView {
                label: (*label).to_string(),
                href: (*href).to_string(),
                target: None,
                rel: None,
            })
            .collect();

        LayoutChrome {
            brand: BrandView {
                title: self.site.title.clone(),
                href: "/".to_string(),
            },
            navigation: NavigationView { entries },
            footer: FooterView {
                copy: format!("© {}. Written by people, models and terminals.", self.site.title),
            },
            meta: PageMetaView {
                title: self.site.title.clone(),
                description: self.site.description.clone(),
                og_title: self.site.title.clone(),
                og_description: self.site.description.clone(),
                canonical: self.site.canonical_base.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteSettings {
        SiteSettings {
            title: "Modern Blog".to_string(),
            description: "desc".to_string(),
            canonical_base: "https://blog.example".to_string(),
        }
    }

    #[test]
    fn chrome_links_home_posts_and_about() {
        let chrome = ChromeService::new(site()).load();
        let hrefs: Vec<_> = chrome
            .navigation
            .entries
            .iter()
            .map(|entry| entry.href.as_str())
            .collect();
        assert_eq!(hrefs, ["/", "/posts", "/about"]);
        assert_eq!(chrome.meta.canonical, "https://blog.example");
    }

    #[test]
    fn canonical_url_joins_base_and_path() {
        let service = ChromeService::new(site());
        assert_eq!(
            service.canonical_url("/posts/hello"),
            "https://blog.example/posts/hello"
        );
    }
}
