use crate::foundation::core::Viewport;

/// A class of host content the animation must steer around.
///
/// The set mirrors what a typical page exposes: readable text, interactive
/// controls, and decorative boxes that carry `rounded`/`border` style
/// markers. DOM-backed hosts can feed [`ContentSelector::css`] straight into
/// their query API; other hosts are free to interpret the variants however
/// fits their layout tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ContentSelector {
    Headings,
    Paragraphs,
    Anchors,
    Buttons,
    RoundedBoxes,
    BorderedBoxes,
}

impl ContentSelector {
    /// Every selector the engine avoids by default.
    pub const ALL: [ContentSelector; 6] = [
        ContentSelector::Headings,
        ContentSelector::Paragraphs,
        ContentSelector::Anchors,
        ContentSelector::Buttons,
        ContentSelector::RoundedBoxes,
        ContentSelector::BorderedBoxes,
    ];

    /// CSS rendering for DOM-backed hosts.
    pub fn css(self) -> &'static str {
        match self {
            Self::Headings => "h1, h2, h3, h4, h5, h6",
            Self::Paragraphs => "p",
            Self::Anchors => "a",
            Self::Buttons => "button",
            Self::RoundedBoxes => "[class*=\"rounded\"]",
            Self::BorderedBoxes => "[class*=\"border\"]",
        }
    }
}

/// Screen-space bounding box of one content element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// The engine's one window into the host's layout.
///
/// Implementations return *current* geometry on every call; the engine
/// never caches beyond a single obstacle rebuild. All methods are synchronous
/// reads of already-computed layout; no I/O happens here.
pub trait LayoutProbe {
    /// Screen-space bounding boxes of every element matching `selectors`.
    fn content_boxes(&self, selectors: &[ContentSelector]) -> Vec<ContentBox>;

    /// Current placement and pixel density of the drawing surface.
    fn viewport(&self) -> Viewport;
}
