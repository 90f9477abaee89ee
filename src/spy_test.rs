use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::dom::fake::{FakeDocument, FakeNode};

struct Page {
    doc: FakeDocument,
    nav: FakeNode,
    list: FakeNode,
    toggle: FakeNode,
    items: Vec<FakeNode>,
    sections: Vec<FakeNode>,
    outside: FakeNode,
}

const IDS: [&str; 3] = ["a", "b", "c"];

fn page() -> Page {
    let doc = FakeDocument::new();
    let toggle = doc.body.append(FakeNode::new("button").with_id("postNavToggle"));
    let nav = doc.body.append(FakeNode::new("aside").with_id("postNav"));
    let list = nav.append(FakeNode::new("ul").with_id("postNavList").with_rect(100.0, 300.0));
    let items = IDS
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let top = 100.0 + 40.0 * i as f64;
            list.append(
                FakeNode::new("a")
                    .with_class("post-nav-item")
                    .with_attr("data-target", id)
                    .with_rect(top, top + 30.0),
            )
        })
        .collect();
    let sections = IDS
        .iter()
        .map(|id| doc.body.append(FakeNode::new("article").with_class("blogentry").with_id(id)))
        .collect();
    let outside = doc.body.append(FakeNode::new("footer"));
    Page { doc, nav, list, toggle, items, sections, outside }
}

fn attach(p: &Page) -> ScrollSpy<FakeNode> {
    ScrollSpy::attach(&p.doc, TrackingBand::default(), 1200.0).unwrap().unwrap()
}

fn active_count(p: &Page) -> usize {
    p.items.iter().filter(|item| item.has_class("active")).count()
}

// =============================================================
// TrackingBand
// =============================================================

#[test]
fn default_band_root_margin() {
    assert_eq!(TrackingBand::default().root_margin(), "-80px 0px -60% 0px");
}

#[test]
fn fractional_band_root_margin() {
    let band = TrackingBand { top_px: 72.5, bottom_percent: 55.0 };
    assert_eq!(band.root_margin(), "-72.5px 0px -55% 0px");
}

// =============================================================
// Attach
// =============================================================

#[test]
fn inert_without_nav_items() {
    let doc = FakeDocument::new();
    let nav = doc.body.append(FakeNode::new("aside").with_id("postNav"));
    nav.append(FakeNode::new("ul").with_id("postNavList"));
    doc.body.append(FakeNode::new("article").with_class("blogentry").with_id("a"));
    assert!(ScrollSpy::attach(&doc, TrackingBand::default(), 1200.0).unwrap().is_none());
}

#[test]
fn inert_without_sections() {
    let doc = FakeDocument::new();
    let nav = doc.body.append(FakeNode::new("aside").with_id("postNav"));
    let list = nav.append(FakeNode::new("ul").with_id("postNavList"));
    list.append(FakeNode::new("a").with_class("post-nav-item").with_attr("data-target", "a"));
    assert!(ScrollSpy::attach(&doc, TrackingBand::default(), 1200.0).unwrap().is_none());
}

#[test]
fn inert_without_nav_container() {
    let doc = FakeDocument::new();
    doc.body.append(FakeNode::new("article").with_class("blogentry").with_id("a"));
    assert!(ScrollSpy::attach(&doc, TrackingBand::default(), 1200.0).unwrap().is_none());
}

#[test]
fn attach_collects_working_sets() {
    let p = page();
    let spy = attach(&p);
    assert_eq!(spy.items().len(), 3);
    assert_eq!(spy.sections().len(), 3);
    assert!(spy.drawer_toggle().is_some());
}

// =============================================================
// Intersections
// =============================================================

#[test]
fn single_intersecting_section_activates_its_entry() {
    let p = page();
    let spy = attach(&p);

    spy.on_intersections(&[Intersection::entering("b")]).unwrap();

    assert_eq!(spy.active_target().as_deref(), Some("b"));
    assert_eq!(active_count(&p), 1);
    assert!(p.items[1].has_class("active"));
}

#[test]
fn last_intersecting_entry_in_batch_wins() {
    let p = page();
    let spy = attach(&p);

    spy.on_intersections(&[Intersection::entering("a"), Intersection::entering("b")]).unwrap();
    assert_eq!(spy.active_target().as_deref(), Some("b"));

    spy.on_intersections(&[Intersection::entering("c"), Intersection::entering("a")]).unwrap();
    assert_eq!(spy.active_target().as_deref(), Some("a"));
    assert_eq!(active_count(&p), 1);
}

#[test]
fn leaving_entries_do_not_change_active() {
    let p = page();
    let spy = attach(&p);
    spy.on_intersections(&[Intersection::entering("a")]).unwrap();

    spy.on_intersections(&[Intersection::leaving("a"), Intersection::leaving("b")]).unwrap();

    assert_eq!(spy.active_target().as_deref(), Some("a"));
}

#[test]
fn unknown_section_clears_active() {
    let p = page();
    let spy = attach(&p);
    spy.activate("a").unwrap();

    spy.activate("ghost").unwrap();

    assert_eq!(active_count(&p), 0);
}

#[test]
fn visible_entry_is_not_scrolled() {
    let p = page();
    let spy = attach(&p);
    spy.activate("b").unwrap();
    assert!(p.items[1].scrolls().is_empty());
}

#[test]
fn entry_below_list_is_scrolled_to_nearest() {
    let p = page();
    let spy = attach(&p);
    p.items[2].set_rect(290.0, 320.0);

    spy.activate("c").unwrap();

    assert_eq!(p.items[2].scrolls(), vec![ScrollBlock::Nearest]);
}

#[test]
fn entry_above_list_is_scrolled_to_nearest() {
    let p = page();
    let spy = attach(&p);
    p.list.set_rect(150.0, 350.0);

    spy.activate("a").unwrap();

    assert_eq!(p.items[0].scrolls(), vec![ScrollBlock::Nearest]);
}

// =============================================================
// Subscription
// =============================================================

#[derive(Default)]
struct ManualSource {
    handler: RefCell<Option<BatchHandler>>,
    observed: RefCell<Vec<String>>,
    margin: RefCell<String>,
}

impl IntersectionSource<FakeNode> for ManualSource {
    type Subscription = ();

    fn subscribe(&self, band: &TrackingBand, targets: &[FakeNode], on_batch: BatchHandler) -> Result<()> {
        *self.margin.borrow_mut() = band.root_margin();
        self.observed.borrow_mut().extend(targets.iter().filter_map(|t| t.attr("id")));
        *self.handler.borrow_mut() = Some(on_batch);
        Ok(())
    }
}

impl ManualSource {
    fn deliver(&self, batch: Vec<Intersection>) {
        if let Some(handler) = self.handler.borrow_mut().as_mut() {
            handler(batch);
        }
    }
}

#[test]
fn subscription_drives_activation() {
    let p = page();
    let spy = Rc::new(attach(&p));
    let source = ManualSource::default();
    let handler_spy = Rc::clone(&spy);

    source
        .subscribe(
            spy.band(),
            spy.sections(),
            Box::new(move |batch| handler_spy.on_intersections(&batch).unwrap()),
        )
        .unwrap();
    source.deliver(vec![Intersection::entering("c")]);

    assert_eq!(*source.observed.borrow(), vec!["a", "b", "c"]);
    assert_eq!(*source.margin.borrow(), "-80px 0px -60% 0px");
    assert_eq!(spy.active_target().as_deref(), Some("c"));
}

// =============================================================
// Click to navigate and drawer
// =============================================================

#[test]
fn item_click_scrolls_section_to_start() {
    let p = page();
    let spy = attach(&p);

    assert!(spy.on_item_click(&p.doc, &p.items[1]).unwrap());

    assert_eq!(p.sections[1].scrolls(), vec![ScrollBlock::Start]);
}

#[test]
fn item_click_with_missing_section_does_nothing() {
    let p = page();
    let spy = attach(&p);
    let stray = p.list.append(FakeNode::new("a").with_class("post-nav-item").with_attr("data-target", "zzz"));
    assert!(!spy.on_item_click(&p.doc, &stray).unwrap());
}

#[test]
fn item_click_closes_drawer_on_narrow_viewport() {
    let p = page();
    let spy = attach(&p);
    spy.on_drawer_toggle().unwrap();
    p.doc.set_width(1200.0);

    spy.on_item_click(&p.doc, &p.items[0]).unwrap();

    assert!(!p.nav.has_class("open"));
    assert_eq!(p.toggle.text(), "📑");
}

#[test]
fn item_click_keeps_drawer_on_wide_viewport() {
    let p = page();
    let spy = attach(&p);
    spy.on_drawer_toggle().unwrap();
    p.doc.set_width(1201.0);

    spy.on_item_click(&p.doc, &p.items[0]).unwrap();

    assert!(p.nav.has_class("open"));
}

#[test]
fn drawer_toggle_swaps_glyph() {
    let p = page();
    let spy = attach(&p);

    assert!(spy.on_drawer_toggle().unwrap());
    assert_eq!(p.toggle.text(), "✕");
    assert!(p.nav.has_class("open"));

    assert!(!spy.on_drawer_toggle().unwrap());
    assert_eq!(p.toggle.text(), "📑");
    assert!(!p.nav.has_class("open"));
}

#[test]
fn outside_click_closes_drawer_only_when_narrow() {
    let p = page();
    let spy = attach(&p);
    spy.on_drawer_toggle().unwrap();

    spy.on_document_click(&p.outside, 1440.0).unwrap();
    assert!(p.nav.has_class("open"));

    spy.on_document_click(&p.outside, 800.0).unwrap();
    assert!(!p.nav.has_class("open"));
}

#[test]
fn clicks_inside_nav_or_toggle_keep_drawer_open() {
    let p = page();
    let spy = attach(&p);
    spy.on_drawer_toggle().unwrap();

    spy.on_document_click(&p.items[0], 800.0).unwrap();
    spy.on_document_click(&p.toggle, 800.0).unwrap();

    assert!(p.nav.has_class("open"));
}

#[test]
fn without_toggle_drawer_is_untouched() {
    let doc = FakeDocument::new();
    let nav = doc.body.append(FakeNode::new("aside").with_id("postNav").with_class("open"));
    let list = nav.append(FakeNode::new("ul").with_id("postNavList"));
    let item = list.append(FakeNode::new("a").with_class("post-nav-item").with_attr("data-target", "a"));
    doc.body.append(FakeNode::new("article").with_class("blogentry").with_id("a"));
    let outside = doc.body.append(FakeNode::new("footer"));
    doc.set_width(600.0);
    let spy = ScrollSpy::attach(&doc, TrackingBand::default(), 1200.0).unwrap().unwrap();

    assert!(!spy.on_drawer_toggle().unwrap());
    spy.on_document_click(&outside, 600.0).unwrap();
    spy.on_item_click(&doc, &item).unwrap();

    assert!(nav.has_class("open"));
}

#[test]
fn clicks_inside_post_nav_classes_keep_drawer_open() {
    let p = page();
    let spy = attach(&p);
    let footer_nav = p.doc.body.append(FakeNode::new("div").with_class("post-nav"));
    let footer_link = footer_nav.append(FakeNode::new("a"));
    let extra_toggle = p.doc.body.append(FakeNode::new("button").with_class("post-nav-toggle"));
    spy.on_drawer_toggle().unwrap();

    spy.on_document_click(&footer_link, 800.0).unwrap();
    spy.on_document_click(&extra_toggle, 800.0).unwrap();

    assert!(p.nav.has_class("open"));
}

// =============================================================
// Band validation
// =============================================================

#[test]
fn default_band_is_valid() {
    assert!(TrackingBand::default().validate().is_ok());
    assert!(TrackingBand { top_px: 0.0, bottom_percent: 0.0 }.validate().is_ok());
}

#[test]
fn negative_band_offsets_are_rejected() {
    let top = TrackingBand { top_px: -10.0, bottom_percent: 60.0 };
    assert!(matches!(top.validate(), Err(Error::InvalidBand { .. })));
    let bottom = TrackingBand { top_px: 80.0, bottom_percent: -5.0 };
    assert!(matches!(bottom.validate(), Err(Error::InvalidBand { .. })));
}
