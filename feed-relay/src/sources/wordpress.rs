use super::{ContentRule, Provider};

pub const RELEASES_FEED_URL: &str = "https://wordpress.org/news/category/releases/feed/";
pub const WORDPRESS_TV_FEED_URL: &str = "https://wordpress.tv/feed/";
pub const WORDPRESS_COM_FEED_URL: &str = "https://wordpress.com/blog/feed/";

/// Built-in providers in poll order.
pub fn default_providers() -> Vec<Provider> {
    vec![
        releases(),
        wordpress_tv(),
        wordpress_com_blog(),
    ]
}

/// WordPress core release announcements. Only this feed is translated.
pub fn releases() -> Provider {
    Provider::new("wordpress-releases", RELEASES_FEED_URL, "wordpress releases")
        .with_translation(true)
}

/// WordPress.tv talks; entries carry just the embedded video player.
pub fn wordpress_tv() -> Provider {
    Provider::new("wordpress-tv", WORDPRESS_TV_FEED_URL, "wordpress tv")
        .with_content_rule(ContentRule::FirstIframe)
}

pub fn wordpress_com_blog() -> Provider {
    Provider::new("wordpress-com", WORDPRESS_COM_FEED_URL, "wordpress com")
        .with_content_rule(ContentRule::EncodedOrDescription)
}
