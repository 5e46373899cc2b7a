use crate::config::SiteSettings;
use crate::presentation::admin::views::{
    AdminBrandView, AdminChrome, AdminMetaView, AdminNavigationItemView, AdminNavigationView,
};

const NAV_ITEMS: &[(&str, &str)] = &[("/", "Dashboard"), ("/posts/new", "New post")];

#[derive(Clone)]
pub struct AdminChromeService {
    site: SiteSettings,
}

impl AdminChromeService {
    pub fn new(site: SiteSettings) -> Self {
        Self { site }
    }

    pub fn load(&self, active_path: &str) -> AdminChrome {
        let brand = AdminBrandView {
            title: format!("{} Admin", self.site.title),
        };

        let mut items: Vec<AdminNavigationItemView> = NAV_ITEMS
            .iter()
            .map(|(href, label)| AdminNavigationItemView {
                label: (*label).to_string(),
                href: (*href).to_string(),
                is_active: *href == active_path,
                open_in_new_tab: false,
            })
            .collect();

        items.push(AdminNavigationItemView {
            label: "View site".to_string(),
            href: normalize_public_site_url(&self.site.canonical_base),
            is_active: false,
            open_in_new_tab: true,
        });

        let navigation = AdminNavigationView { items };

        let active_label = navigation
            .items
            .iter()
            .find(|item| item.is_active)
            .map(|item| item.label.as_str())
            .unwrap_or("Dashboard");

        let meta = AdminMetaView {
            title: format!("{} · {}", brand.title, active_label),
            description: "Post management".to_string(),
        };

        AdminChrome {
            brand,
            navigation,
            meta,
        }
    }
}

fn normalize_public_site_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_active_item_and_appends_site_link() {
        let service = AdminChromeService::new(SiteSettings {
            title: "Modern Blog".to_string(),
            description: String::new(),
            canonical_base: "https://blog.example".to_string(),
        });
        let chrome = service.load("/posts/new");

        assert_eq!(chrome.meta.title, "Modern Blog Admin · New post");
        let last = chrome.navigation.items.last().expect("site link");
        assert_eq!(last.href, "https://blog.example/");
        assert!(last.open_in_new_tab);
        assert_eq!(
            chrome
                .navigation
                .items
                .iter()
                .filter(|item| item.is_active)
                .count(),
            1
        );
    }
}
