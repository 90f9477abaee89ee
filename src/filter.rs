//! Tag filter over blog entries, post-nav entries, and archive links.
//!
//! SYSTEM CONTEXT
//! ==============
//! One tag (or the `all` sentinel) is selected at a time. Each item's
//! visibility is a pure function of the selection and its own `data-tags`
//! list, so applying the same selection twice is a no-op. Archive year groups
//! recount their visible links after every application and hide themselves
//! when nothing is left.
//!
//! Working sets are collected once when the filter is attached; matching
//! elements added to the page afterwards are not filtered.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use crate::consts::{
    ACTIVE_CLASS, ALL_TAGS, ARCHIVE_LINK_CLASS, ARCHIVE_YEAR_CLASS, BLOG_ENTRY_CLASS, DATA_TAG, DATA_TAGS, HIDDEN_CLASS,
    POST_COUNT_CLASS, POST_NAV_ITEM_CLASS, TAG_BUTTON_CLASS,
};
use crate::dom::{Document, Node, Selector};
use crate::error::Result;
use crate::store::{KeyValueStore, PreferenceStore};

/// Split a `data-tags` attribute into its non-empty tokens.
pub fn parse_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split_whitespace()
}

/// Whether an item tagged `raw_tags` is shown under `selected`.
#[must_use]
pub fn admits(selected: &str, raw_tags: &str) -> bool {
    selected == ALL_TAGS || parse_tags(raw_tags).any(|tag| tag == selected)
}

/// Counter text for an archive year: `1 post`, otherwise `<n> posts`.
#[must_use]
pub fn post_count_label(count: usize) -> String {
    if count == 1 {
        "1 post".to_owned()
    } else {
        format!("{count} posts")
    }
}

/// An archive year section with its links and counter.
pub struct YearGroup<N> {
    section: N,
    links: Vec<N>,
    counter: Option<N>,
}

impl<N: Node> YearGroup<N> {
    fn collect(section: N) -> Result<Self> {
        let links = section.query_all(&Selector::class(ARCHIVE_LINK_CLASS))?;
        let counter = section.query(&Selector::class(POST_COUNT_CLASS))?;
        Ok(Self { section, links, counter })
    }

    /// Links not currently hidden by the filter.
    pub fn visible_count(&self) -> usize {
        self.links.iter().filter(|link| !link.has_class(HIDDEN_CLASS)).count()
    }

    pub fn is_hidden(&self) -> bool {
        self.section.has_class(HIDDEN_CLASS)
    }

    fn refresh(&self) -> Result<usize> {
        let count = self.visible_count();
        if let Some(counter) = &self.counter {
            counter.set_text(&post_count_label(count));
        }
        self.section.set_class(HIDDEN_CLASS, count == 0)?;
        Ok(count)
    }
}

pub struct TagFilter<N> {
    buttons: Vec<N>,
    entries: Vec<N>,
    nav_items: Vec<N>,
    archive_links: Vec<N>,
    years: Vec<YearGroup<N>>,
}

impl<N: Node> TagFilter<N> {
    /// Collect the working sets. Returns `None` (inert) when the page has no
    /// tag buttons.
    pub fn attach<D: Document<Node = N>>(doc: &D) -> Result<Option<Self>> {
        let buttons = doc.query_all(&Selector::class(TAG_BUTTON_CLASS))?;
        if buttons.is_empty() {
            return Ok(None);
        }
        let tagged = |class: &'static str| doc.query_all(&Selector::class(class).with_attr(DATA_TAGS));
        let years = doc
            .query_all(&Selector::class(ARCHIVE_YEAR_CLASS))?
            .into_iter()
            .map(YearGroup::collect)
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Self {
            entries: tagged(BLOG_ENTRY_CLASS)?,
            nav_items: tagged(POST_NAV_ITEM_CLASS)?,
            archive_links: tagged(ARCHIVE_LINK_CLASS)?,
            buttons,
            years,
        }))
    }

    pub fn buttons(&self) -> &[N] {
        &self.buttons
    }

    pub fn years(&self) -> &[YearGroup<N>] {
        &self.years
    }

    /// `data-tag` of the button currently marked active.
    pub fn active_tag(&self) -> Option<String> {
        self.buttons
            .iter()
            .find(|btn| btn.has_class(ACTIVE_CLASS))
            .and_then(|btn| btn.attr(DATA_TAG))
    }

    /// Apply `selected` to buttons, items, and year groups. Does not persist.
    pub fn apply(&self, selected: &str) -> Result<()> {
        for btn in &self.buttons {
            let is_selected = btn.attr(DATA_TAG).is_some_and(|tag| tag == selected);
            btn.set_class(ACTIVE_CLASS, is_selected)?;
        }

        for item in self.entries.iter().chain(&self.nav_items).chain(&self.archive_links) {
            let tags = item.attr(DATA_TAGS).unwrap_or_default();
            item.set_class(HIDDEN_CLASS, !admits(selected, &tags))?;
        }

        let mut visible = 0;
        for year in &self.years {
            visible += year.refresh()?;
        }
        log::debug!("tag filter: {selected} ({visible} archive posts visible)");
        Ok(())
    }

    /// A user picked `button`: apply its tag and persist the selection.
    pub fn on_button_click<S: KeyValueStore>(&self, button: &N, prefs: &PreferenceStore<S>) -> Result<()> {
        let Some(tag) = button.attr(DATA_TAG) else {
            return Ok(());
        };
        self.apply(&tag)?;
        prefs.set_active_tag(&tag)
    }
}
