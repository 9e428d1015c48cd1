#![cfg(target_arch = "wasm32")]

use despair_core::constants::{REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE};
use despair_core::{Behavior, BehaviorConfig, BehaviorError, MemoryConsentStore};
use despair_web::behaviors::{
    announcement, basket, checkout, cookie_banner, password, quantity, scroll_sync, stars,
};
use despair_web::{bridge, dom};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlElement, HtmlFormElement, HtmlInputElement};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> Document {
    let doc = dom::document().expect("document");
    doc.body().expect("document body").set_inner_html(html);
    doc
}

fn click(doc: &Document, selector: &str) {
    dom::query(doc, selector)
        .expect("element exists")
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

fn cancelable(kind: &str) -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    Event::new_with_event_init_dict(kind, &init).expect("event")
}

fn style(doc: &Document, selector: &str, property: &str) -> String {
    dom::query(doc, selector)
        .expect("element exists")
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .style()
        .get_property_value(property)
        .expect("style property")
}

fn input(doc: &Document, selector: &str) -> HtmlInputElement {
    dom::query(doc, selector)
        .expect("input exists")
        .dyn_into::<HtmlInputElement>()
        .expect("input element")
}

#[wasm_bindgen_test]
fn quantity_buttons_step_within_bounds() {
    let doc = mount(
        r#"<button class="qty-btn" data-action="minus">-</button>
           <input class="qty-input" value="98">
           <button class="qty-btn" data-action="plus">+</button>"#,
    );
    let targets = quantity::QuantityTargets::find(&doc).expect("stepper targets");
    quantity::attach(targets, &BehaviorConfig::default()).expect("attach");

    click(&doc, ".qty-btn[data-action=\"plus\"]");
    click(&doc, ".qty-btn[data-action=\"plus\"]");
    assert_eq!(input(&doc, ".qty-input").value(), "99");

    input(&doc, ".qty-input").set_value("1");
    click(&doc, ".qty-btn[data-action=\"minus\"]");
    assert_eq!(input(&doc, ".qty-input").value(), "1");
}

#[wasm_bindgen_test]
fn star_click_sets_rating_field() {
    let doc = mount(
        r#"<input type="hidden" id="id_rating" value="">
           <label class="star-label"><i></i></label>
           <label class="star-label"><i></i></label>
           <label class="star-label"><i></i></label>
           <label class="star-label"><i></i></label>
           <label class="star-label"><i></i></label>"#,
    );
    let targets = stars::StarTargets::find(&doc).expect("star targets");
    stars::attach(targets, &BehaviorConfig::default()).expect("attach");

    let labels = dom::query_all(&doc, ".star-label");
    labels[1]
        .clone()
        .dyn_into::<HtmlElement>()
        .expect("label")
        .click();
    assert_eq!(input(&doc, "#id_rating").value(), "4");

    let icon = labels[1].query_selector("i").unwrap().unwrap();
    let color = icon
        .dyn_into::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("color")
        .unwrap();
    assert!(color.contains("--gold"), "unexpected colour {color}");
}

#[wasm_bindgen_test]
fn delivery_card_reveals_address_block() {
    let doc = mount(
        r#"<div class="delivery-option-card" data-value="collection"></div>
           <div class="delivery-option-card" data-value="delivery"></div>
           <input type="radio" name="delivery_type" id="id_delivery_type_collection" value="collection" checked>
           <input type="radio" name="delivery_type" id="id_delivery_type_delivery" value="delivery">
           <div id="address-block"></div>"#,
    );
    let kind = despair_core::OptionGroupKind::Delivery;
    let targets = checkout::CheckoutTargets::find(&doc, kind).expect("checkout targets");
    checkout::attach(&doc, targets).expect("attach");

    let block = dom::query(&doc, "#address-block")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    assert_eq!(block.style().get_property_value("display").unwrap(), "none");

    click(&doc, ".delivery-option-card[data-value=\"delivery\"]");
    assert!(input(&doc, "#id_delivery_type_delivery").checked());
    assert_eq!(block.style().get_property_value("display").unwrap(), "block");
    let cards = dom::query_all(&doc, ".delivery-option-card");
    assert!(cards[1].class_list().contains("active"));
    assert!(!cards[0].class_list().contains("active"));
}

#[wasm_bindgen_test]
fn recorded_consent_keeps_banner_hidden() {
    let doc = mount(
        r#"<div id="cookie-banner">
             <button id="cookie-accept">OK</button>
             <button id="cookie-decline">No</button>
           </div>"#,
    );
    let config = BehaviorConfig::default();
    let store = MemoryConsentStore::with_value(&config.consent_storage_key, "accepted");
    let targets = cookie_banner::CookieBannerTargets::find(&doc).expect("banner targets");
    cookie_banner::attach(targets, store, &config).expect("attach");

    let banner = dom::query(&doc, "#cookie-banner")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    assert_eq!(banner.style().get_property_value("display").unwrap(), "none");
}

#[wasm_bindgen_test]
fn password_fields_are_wrapped_once() {
    let doc = mount(r#"<form><input type="password" name="password"></form>"#);
    let targets = password::PasswordTargets::find(&doc).expect("password targets");
    assert_eq!(password::attach(&doc, targets).expect("attach"), 1);
    assert_eq!(despair_web::refresh_password_toggles(&doc).expect("refresh"), 0);
    assert_eq!(dom::query_all(&doc, ".password-toggle-btn").len(), 1);

    click(&doc, ".password-toggle-btn");
    assert_eq!(input(&doc, "input[name=\"password\"]").type_(), "text");
    click(&doc, ".password-toggle-btn");
    assert_eq!(input(&doc, "input[name=\"password\"]").type_(), "password");
}

#[wasm_bindgen_test]
fn empty_page_skips_every_behaviour() {
    let doc = mount("<p>nothing here</p>");
    let report = despair_web::init_all(&doc, &BehaviorConfig::default());
    assert!(report.wired.is_empty());
    assert_eq!(report.skipped.len(), Behavior::ALL.len());
}

#[wasm_bindgen_test]
fn minus_walks_an_oversized_quantity_down_by_one() {
    let doc = mount(
        r#"<button class="qty-btn" data-action="minus">-</button>
           <input class="qty-input" value="150">
           <button class="qty-btn" data-action="reset">0</button>"#,
    );
    let targets = quantity::QuantityTargets::find(&doc).expect("stepper targets");
    assert_eq!(targets.buttons.len(), 1);
    quantity::attach(targets, &BehaviorConfig::default()).expect("attach");

    click(&doc, ".qty-btn[data-action=\"minus\"]");
    assert_eq!(input(&doc, ".qty-input").value(), "149");
    click(&doc, ".qty-btn[data-action=\"reset\"]");
    assert_eq!(input(&doc, ".qty-input").value(), "149");
}

#[wasm_bindgen_test]
fn basket_request_is_an_xhr_post_to_the_form_action() {
    let doc = mount(
        r#"<form data-ajax-basket action="/orders/basket/add/7/" method="post">
             <input name="quantity" value="2">
             <button type="submit">Add</button>
           </form>"#,
    );
    let form = dom::query(&doc, "form")
        .expect("form")
        .dyn_into::<HtmlFormElement>()
        .expect("form element");
    let request = basket::build_request(&form, None).expect("request");
    assert_eq!(request.method(), "POST");
    assert!(request.url().ends_with("/orders/basket/add/7/"));
    assert_eq!(
        request.headers().get(REQUESTED_WITH_HEADER).expect("header"),
        Some(REQUESTED_WITH_VALUE.to_string())
    );
}

#[wasm_bindgen_test]
async fn unreachable_basket_endpoint_fails_without_hanging() {
    let doc = mount(
        r#"<form data-ajax-basket action="http://10.255.255.1:9/orders/basket/add/1/">
             <button type="submit">Add</button>
           </form>"#,
    );
    let form = dom::query(&doc, "form")
        .expect("form")
        .dyn_into::<HtmlFormElement>()
        .expect("form element");
    let err = basket::post_form(&form, 50).await.expect_err("no reply expected");
    assert!(
        matches!(err, BehaviorError::TimedOut(50) | BehaviorError::Transport(_)),
        "unexpected error {err}"
    );
}

#[wasm_bindgen_test]
async fn failed_basket_add_reenables_the_button() {
    let doc = mount(
        r#"<span class="basket-badge" style="display: none">0</span>
           <form data-ajax-basket action="http://10.255.255.1:9/orders/basket/add/1/">
             <button type="submit">Add</button>
           </form>"#,
    );
    let mut config = BehaviorConfig::default();
    config.timings.basket_timeout_ms = 50;
    let targets = basket::BasketTargets::find(&doc).expect("basket targets");
    basket::attach(targets, &config).expect("attach");

    let form = dom::query(&doc, "form").expect("form");
    let proceeded = form.dispatch_event(&cancelable("submit")).expect("dispatch");
    assert!(!proceeded, "default submission was not suppressed");
    let button = dom::query(&doc, "button").expect("button");
    assert!(button.has_attribute("disabled"));

    dom::sleep_ms(1_500).await.expect("sleep");
    assert!(!button.has_attribute("disabled"));
    assert_eq!(button.text_content().as_deref(), Some("Add"));
    let badge = dom::query(&doc, ".basket-badge").expect("badge");
    assert_eq!(badge.text_content().as_deref(), Some("0"));
    assert_eq!(style(&doc, ".basket-badge", "display"), "none");
}

#[wasm_bindgen_test]
async fn section_links_follow_the_section_in_view() {
    if let Some(win) = dom::window() {
        win.scroll_to_with_x_and_y(0.0, 0.0);
    }
    let doc = mount(
        r##"<nav>
             <a class="category-nav-link" data-section="starters" href="#starters">Starters</a>
             <a class="category-nav-link" data-section="mains" href="#mains">Mains</a>
           </nav>
           <section data-menu-section="starters" style="height: 3000px"></section>
           <section data-menu-section="mains" style="height: 3000px"></section>"##,
    );
    let targets = scroll_sync::SectionTargets::find(&doc).expect("section targets");
    scroll_sync::attach(&doc, targets, &BehaviorConfig::default()).expect("attach");

    dom::sleep_ms(300).await.expect("sleep");
    let links = dom::query_all(&doc, ".category-nav-link");
    assert!(links[0].class_list().contains("active"));
    assert!(!links[1].class_list().contains("active"));

    let proceeded = links[1].dispatch_event(&cancelable("click")).expect("dispatch");
    assert!(!proceeded, "link navigation was not suppressed");
}

#[wasm_bindgen_test]
fn announcement_close_collapses_banner() {
    let doc = mount(
        r#"<div id="site-announcement">Now open late
             <button id="announcement-close">x</button>
           </div>"#,
    );
    let targets = announcement::AnnouncementTargets::find(&doc).expect("announcement");
    announcement::attach(targets, &BehaviorConfig::default()).expect("attach");
    assert_eq!(style(&doc, "#site-announcement", "opacity"), "");

    click(&doc, "#announcement-close");
    assert_eq!(style(&doc, "#site-announcement", "opacity"), "0");
    assert_eq!(style(&doc, "#site-announcement", "max-height"), "0px");
    let banner = dom::query(&doc, "#site-announcement").expect("banner");
    assert_eq!(banner.get_attribute("aria-hidden").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
async fn announcement_collapses_when_its_timer_fires() {
    let doc = mount(r#"<div id="site-announcement">Now open late</div>"#);
    let mut config = BehaviorConfig::default();
    config.timings.announcement_collapse_ms = 20;
    let targets = announcement::AnnouncementTargets::find(&doc).expect("announcement");
    announcement::attach(targets, &config).expect("attach");

    dom::sleep_ms(150).await.expect("sleep");
    assert_eq!(style(&doc, "#site-announcement", "opacity"), "0");
}

#[wasm_bindgen_test]
fn detached_password_field_is_wrapped_on_refresh() {
    let doc = mount(r#"<form id="login"><input type="password" name="current"></form>"#);
    let late = doc
        .create_element("input")
        .expect("create input")
        .dyn_into::<HtmlInputElement>()
        .expect("input element");
    late.set_type("password");
    late.set_name("late");

    let mut inputs = password::PasswordTargets::find(&doc)
        .expect("password targets")
        .inputs;
    inputs.insert(0, late.clone());
    let wrapped = password::attach(&doc, password::PasswordTargets { inputs }).expect("attach");
    assert_eq!(wrapped, 1);

    dom::query(&doc, "#login")
        .expect("form")
        .append_child(&late)
        .expect("append");
    assert_eq!(despair_web::refresh_password_toggles(&doc).expect("refresh"), 1);
    assert_eq!(dom::query_all(&doc, ".password-toggle-btn").len(), 2);
}

#[wasm_bindgen_test]
async fn choice_before_the_delay_keeps_cookie_banner_hidden() {
    let doc = mount(
        r#"<div id="cookie-banner" style="display: block">
             <button id="cookie-accept">OK</button>
             <button id="cookie-decline">No</button>
           </div>"#,
    );
    let mut config = BehaviorConfig::default();
    config.timings.cookie_banner_delay_ms = 50;
    let targets = cookie_banner::CookieBannerTargets::find(&doc).expect("banner targets");
    cookie_banner::attach(targets, MemoryConsentStore::default(), &config).expect("attach");

    click(&doc, "#cookie-accept");
    assert_eq!(style(&doc, "#cookie-banner", "display"), "none");
    dom::sleep_ms(200).await.expect("sleep");
    assert_eq!(style(&doc, "#cookie-banner", "display"), "none");
}

#[wasm_bindgen_test]
fn test_flag_needs_an_exact_parameter() {
    assert!(bridge::test_flag_set("?test=1"));
    assert!(bridge::test_flag_set("?lang=en&test=1"));
    assert!(!bridge::test_flag_set("?contest=10"));
    assert!(!bridge::test_flag_set("?test=10"));
    assert!(!bridge::test_flag_set(""));
}
