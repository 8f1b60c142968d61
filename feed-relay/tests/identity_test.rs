use feed_relay::{assign_identity, Item};

fn release_item() -> Item {
    Item {
        title: "WordPress 6.8".to_string(),
        link: "https://wordpress.org/news/2025/04/cecil/".to_string(),
        pub_date: "Tue, 15 Apr 2025 17:00:00 +0000".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_identity_is_stable() {
    let item = release_item();

    let first = assign_identity("p", &item);
    let second = assign_identity("p", &item);

    assert_eq!(first, second);
    assert_eq!(first.len(), 32);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_identity_differs_between_providers() {
    let item = release_item();

    assert_ne!(assign_identity("p", &item), assign_identity("q", &item));
}

#[test]
fn test_identity_ignores_surrounding_whitespace_and_title() {
    let mut padded = release_item();
    padded.pub_date = format!("  {}\n", padded.pub_date);
    padded.title = "Renamed".to_string();

    assert_eq!(
        assign_identity("wordpress-releases", &release_item()),
        assign_identity("wordpress-releases", &padded)
    );
}

#[test]
fn test_link_used_without_publish_date() {
    let mut item = release_item();
    item.pub_date = "   ".to_string();

    let by_link = assign_identity("p", &item);
    assert_eq!(by_link, assign_identity("p", &item));
    assert_ne!(by_link, assign_identity("p", &release_item()));

    let mut other_link = item.clone();
    other_link.link = "https://wordpress.org/news/2025/07/6-8-2/".to_string();
    assert_ne!(by_link, assign_identity("p", &other_link));
}

#[test]
fn test_items_without_date_or_link_never_collide() {
    let item = Item {
        title: "Untitled".to_string(),
        ..Default::default()
    };

    let first = assign_identity("p", &item);
    std::thread::sleep(std::time::Duration::from_millis(1));
    let second = assign_identity("p", &item);

    assert_ne!(first, second);
}
