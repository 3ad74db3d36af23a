//! Cross-crate tests for the initial-data bridge: a bag built the way the
//! loaders build one must survive the embed → hydrate round trip.

use padma_storefront::initial_data::{GLOBAL_NAME, InitialData};
use serde_json::json;

/// Extract the JSON payload back out of an embed fragment, the way the
/// browser sees it.
fn payload_of(embed: &str) -> &str {
    let assign = format!("window.{GLOBAL_NAME} = ");
    let start = embed.find(&assign).expect("assignment present") + assign.len();
    let end = embed.rfind(";</script>").expect("closing present");
    &embed[start..end]
}

#[test]
fn test_loader_shaped_bag_round_trips_through_embed() {
    let mut bag = InitialData::new();
    bag.insert(
        "seo:/",
        &json!({
            "title": "Padma Bazar",
            "description": "Handpicked crafts & clothing",
        }),
    )
    .expect("serialize");
    bag.insert(
        "home:bestSellers",
        &json!([{"id": 1, "slug": "jamdani-scarf", "name": "Jamdani Scarf"}]),
    )
    .expect("serialize");
    bag.insert("shop:total", &42).expect("serialize");

    let embed = bag.to_embed_script("test-nonce").expect("embed");
    let parsed = InitialData::from_json(payload_of(&embed)).expect("parse");

    assert_eq!(parsed, bag);
    assert_eq!(parsed.get::<u64>("shop:total"), Some(42));
}

#[test]
fn test_hostile_payload_cannot_break_out_of_script_region() {
    let mut bag = InitialData::new();
    // A product description is backend-controlled content
    bag.insert(
        "product:evil",
        &json!({"short_description": "</script><script>document.title='pwned'</script>"}),
    )
    .expect("serialize");

    let embed = bag.to_embed_script("test-nonce").expect("embed");

    // The wrapper's own closing tag must be the only one
    assert_eq!(embed.matches("</script>").count(), 1);
    assert_eq!(embed.matches("<script").count(), 1);

    // And hydration still sees the original value
    let parsed = InitialData::from_json(payload_of(&embed)).expect("parse");
    let product: serde_json::Value = parsed.get("product:evil").expect("present");
    assert_eq!(
        product["short_description"],
        "</script><script>document.title='pwned'</script>"
    );
}

#[test]
fn test_null_sentinel_survives_round_trip() {
    let mut bag = InitialData::new();
    bag.insert_null("product:gone");

    let embed = bag.to_embed_script("n").expect("embed");
    let parsed = InitialData::from_json(payload_of(&embed)).expect("parse");

    assert!(parsed.contains_key("product:gone"));
    assert!(parsed.is_null("product:gone"));
}
