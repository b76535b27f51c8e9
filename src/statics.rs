// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// External links
pub const GITHUB_URL: &str = "https://github.com/staehle/smartscope";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "SmartScope: Smart Folder Scope Editor";

pub const EN_BTN_OPEN: &str = "Open...";
pub const EN_BTN_NEW: &str = "New";
pub const EN_BTN_SAVE_AS: &str = "Save As...";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";

pub const EN_WINDOW_ABOUT: &str = "About";

pub const EN_ABOUT_HEADING: &str = "SmartScope: Smart Folder Scope Editor";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_BLURB: &str =
    "Edits the folder scope of macOS saved searches (.savedSearch files).";
pub const EN_ABOUT_FINDER_NOTE: &str =
    "Finder is relaunched after each save so it picks up the new scope.";
pub const EN_PROJECT_REPO: &str = "GitHub Repo";

pub const EN_HOME_HEADING: &str = "SmartScope: Smart Folder Scope Editor";
pub const EN_HOME_INSTRUCTIONS: &str =
    "Open a smart folder (.savedSearch) to begin, or create a new one.";
pub const EN_HOME_DROP_HINT: &str = "Tip: drop folders onto the window to add them to the scope.";

pub const EN_HEADING_SCOPE: &str = "Scope Paths";

pub const EN_LABEL_ADD_PATH: &str = "Path:";
pub const EN_HINT_ADD_PATH: &str = "/absolute/path (does not need to exist yet)";
pub const EN_BTN_ADD_PATH: &str = "Add";
pub const EN_BTN_ADD_FOLDER: &str = "Add Folder...";
pub const EN_BTN_REMOVE_SELECTED: &str = "Remove Selected";
pub const EN_BTN_UP: &str = "Up";
pub const EN_BTN_DOWN: &str = "Down";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_COL_INDEX: &str = "Index";
pub const EN_COL_PATH: &str = "Path";

pub const EN_SCOPE_EMPTY: &str = "No scope paths. The search will match nowhere.";
pub const EN_SELECTED_COUNT_LABEL: &str = "selected:";

pub const EN_BADGE_MODIFIED: &str = "Modified";
pub const EN_PLACEHOLDER_UNSAVED: &str = "<unsaved>";

pub const EN_FORMAT_BINARY: &str = "binary";
pub const EN_FORMAT_XML: &str = "xml";

pub const EN_EMPTY: &str = "";

// Saved-search plist structure keys (SF_ prefix).
pub const SF_SEARCH_CRITERIA: &str = "SearchCriteria";
pub const SF_SCOPE_PATHS: &str = "FXScopeArrayOfPaths";

// Finder caches saved-search contents; give its own file watch a moment to
// settle before forcing the relaunch.
pub const FINDER_REFRESH_DELAY_MS: u64 = 500;
