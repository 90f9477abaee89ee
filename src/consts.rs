//! Shared constants: element ids, class names, glyphs, and theme colors.

// --- Element ids ---

pub const CONTENT_SLIDER_ID: &str = "contentSlider";
pub const DARK_MODE_TOGGLE_ID: &str = "darkModeToggle";
pub const POST_NAV_ID: &str = "postNav";
pub const POST_NAV_LIST_ID: &str = "postNavList";
pub const POST_NAV_TOGGLE_ID: &str = "postNavToggle";
pub const CONFIG_SCRIPT_ID: &str = "theme-config";

// --- Classes ---

pub const MENU_CONTAINER_CLASS: &str = "menu-container";
pub const MENU_TOGGLE_CLASS: &str = "menu-toggle";
pub const MENU_DROPDOWN_CLASS: &str = "menu-dropdown";
pub const POST_NAV_CLASS: &str = "post-nav";
pub const POST_NAV_TOGGLE_CLASS: &str = "post-nav-toggle";
pub const POST_NAV_ITEM_CLASS: &str = "post-nav-item";
pub const BLOG_ENTRY_CLASS: &str = "blogentry";
pub const TAG_BUTTON_CLASS: &str = "tag-btn";
pub const ARCHIVE_LINK_CLASS: &str = "archive-post-link";
pub const ARCHIVE_YEAR_CLASS: &str = "archive-year";
pub const POST_COUNT_CLASS: &str = "post-count";
pub const SCROLL_PROGRESS_CLASS: &str = "scroll-progress";

/// Marks the open menu, the active nav entry, and the selected tag button.
pub const ACTIVE_CLASS: &str = "active";
/// Marks the open navigation drawer.
pub const OPEN_CLASS: &str = "open";
/// Marks items and year groups excluded by the tag filter.
pub const HIDDEN_CLASS: &str = "tag-hidden";

// --- Attributes ---

pub const DATA_TAGS: &str = "data-tags";
pub const DATA_TAG: &str = "data-tag";
pub const DATA_TARGET: &str = "data-target";
pub const ARIA_EXPANDED: &str = "aria-expanded";

// --- Style variables ---

pub const COLOR_INTENSITY_VAR: &str = "--color-intensity";
pub const DARK_MODE_VAR: &str = "--dark-mode";

// --- Theme colors for `<meta name="theme-color">` ---

pub const DARK_THEME_COLOR: &str = "#1a1a1a";
pub const LIGHT_THEME_COLOR: &str = "#f5f5f5";

// --- Glyphs ---

pub const MENU_CLOSED_GLYPH: &str = "☰";
pub const MENU_OPEN_GLYPH: &str = "✕";
pub const DRAWER_CLOSED_GLYPH: &str = "📑";
pub const DRAWER_OPEN_GLYPH: &str = "✕";
/// Shown while dark mode is on: clicking switches to light.
pub const LIGHT_SWITCH_GLYPH: &str = "☀️";
/// Shown while light mode is on: clicking switches to dark.
pub const DARK_SWITCH_GLYPH: &str = "🌙";
pub const LIGHT_SWITCH_TITLE: &str = "Switch to light mode";
pub const DARK_SWITCH_TITLE: &str = "Switch to dark mode";

// --- Preference defaults ---

pub const DEFAULT_INTENSITY: &str = "50";
pub const DEFAULT_DARK_MODE: bool = true;
/// Tag sentinel meaning "no filtering".
pub const ALL_TAGS: &str = "all";

pub const ESCAPE_KEY: &str = "Escape";
