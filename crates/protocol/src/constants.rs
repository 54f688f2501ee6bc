//! Protocol constants shared by producers and consumers.

/// Catalog used when a `beginRendering` message omits `catalogId`.
pub const STANDARD_CATALOG_ID: &str =
    "https://github.com/google/A2UI/blob/main/specification/0.8/json/standard_catalog_definition.json";

/// Surface id used by agents that only ever drive a single surface.
pub const DEFAULT_SURFACE_ID: &str = "@default";

/// Component type names defined by the standard catalog.
pub mod component_types {
    pub const TEXT: &str = "Text";
    pub const IMAGE: &str = "Image";
    pub const ICON: &str = "Icon";
    pub const BUTTON: &str = "Button";
    pub const CARD: &str = "Card";
    pub const ROW: &str = "Row";
    pub const COLUMN: &str = "Column";
    pub const LIST: &str = "List";
    pub const TEXT_FIELD: &str = "TextField";
    pub const CHECK_BOX: &str = "CheckBox";
    pub const DATE_TIME_INPUT: &str = "DateTimeInput";
    pub const SLIDER: &str = "Slider";
    pub const MULTIPLE_CHOICE: &str = "MultipleChoice";
    pub const DIVIDER: &str = "Divider";
    pub const TABS: &str = "Tabs";
    pub const MODAL: &str = "Modal";
    pub const VIDEO: &str = "Video";
    pub const AUDIO_PLAYER: &str = "AudioPlayer";

    /// Every type in the standard catalog.
    pub const ALL: &[&str] = &[
        TEXT,
        IMAGE,
        ICON,
        BUTTON,
        CARD,
        ROW,
        COLUMN,
        LIST,
        TEXT_FIELD,
        CHECK_BOX,
        DATE_TIME_INPUT,
        SLIDER,
        MULTIPLE_CHOICE,
        DIVIDER,
        TABS,
        MODAL,
        VIDEO,
        AUDIO_PLAYER,
    ];

    /// Returns true when `name` is a standard catalog component type.
    pub fn is_standard(name: &str) -> bool {
        ALL.contains(&name)
    }
}
