//! The static table of native tags composition can build on.
//!
//! Synthesis resolves a tag name against this table before any capability
//! transform runs; a name missing here is the "unknown tag" failure. The
//! per-tag flags are what built-in capability conditions inspect: `void`
//! tags carry no content (and therefore no `text` property), `container`
//! tags track their child population in reactive state.

/// Static description of one native tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    /// The tag name.
    pub name: &'static str,
    /// Void tags cannot carry children or text content.
    pub void: bool,
    /// Container tags track `has_children`/`has_content` state.
    pub container: bool,
    /// Tag-specific reflected properties, in addition to [`GLOBAL_PROPS`].
    pub props: &'static [&'static str],
}

impl TagInfo {
    /// Returns `true` when the tag can carry textual content.
    #[must_use]
    pub const fn supports_text(&self) -> bool {
        !self.void
    }

    /// Returns `true` when `key` is a reflected property of this tag.
    #[must_use]
    pub fn reflects(&self, key: &str) -> bool {
        GLOBAL_PROPS.contains(&key) || self.props.contains(&key)
    }
}

/// Reflected properties shared by every tag.
pub const GLOBAL_PROPS: &[&str] = &["id", "title", "lang", "dir", "hidden", "role", "tabIndex"];

const FORM_FIELD: &[&str] = &[
    "name",
    "value",
    "type",
    "required",
    "disabled",
    "checked",
    "placeholder",
    "readOnly",
    "multiple",
    "min",
    "max",
    "step",
    "pattern",
    "accept",
];
const TEXT_AREA: &[&str] = &[
    "name",
    "value",
    "required",
    "disabled",
    "placeholder",
    "readOnly",
    "rows",
    "cols",
    "maxLength",
];
const SELECT: &[&str] = &["name", "value", "required", "disabled", "multiple", "size"];
const BUTTON: &[&str] = &["name", "value", "type", "disabled"];
const FORM: &[&str] = &["name", "action", "method", "noValidate", "autocomplete"];
const ANCHOR: &[&str] = &["href", "target", "rel", "download"];
const MEDIA: &[&str] = &["src", "alt", "width", "height", "loading"];
const PLAYABLE: &[&str] = &["src", "controls", "autoplay", "loop", "muted", "width", "height"];
const OPTION: &[&str] = &["value", "label", "selected", "disabled"];
const LABEL: &[&str] = &["htmlFor"];
const METER: &[&str] = &["value", "min", "max"];
const TIME: &[&str] = &["dateTime"];
const DETAILS: &[&str] = &["open"];
const IFRAME: &[&str] = &["src", "width", "height", "loading", "allow"];

macro_rules! tags {
    ($($name:literal $(, void: $void:literal)? $(, container: $container:literal)? $(, props: $props:expr)?;)*) => {
        &[$(
            {
                #[allow(unused_mut, unused_assignments)]
                let info = TagInfo {
                    name: $name,
                    void: false $(|| $void)?,
                    container: false $(|| $container)?,
                    props: {
                        #[allow(unused_mut, unused_assignments)]
                        let mut props: &'static [&'static str] = &[];
                        $(props = $props;)?
                        props
                    },
                };
                info
            },
        )*]
    };
}

static TAGS: &[TagInfo] = tags![
    "a", props: ANCHOR;
    "abbr";
    "address";
    "article", container: true;
    "aside", container: true;
    "audio", props: PLAYABLE;
    "b";
    "blockquote", container: true;
    "body", container: true;
    "br", void: true;
    "button", props: BUTTON;
    "canvas", props: MEDIA;
    "caption";
    "code";
    "col", void: true;
    "datalist";
    "dd";
    "details", props: DETAILS;
    "dialog", props: DETAILS;
    "div", container: true;
    "dl";
    "dt";
    "em";
    "fieldset", props: BUTTON;
    "figcaption";
    "figure";
    "footer", container: true;
    "form", props: FORM;
    "h1", container: true;
    "h2", container: true;
    "h3", container: true;
    "h4", container: true;
    "h5", container: true;
    "h6", container: true;
    "header", container: true;
    "hr", void: true;
    "i";
    "iframe", props: IFRAME;
    "img", void: true, props: MEDIA;
    "input", void: true, props: FORM_FIELD;
    "label", props: LABEL;
    "legend";
    "li";
    "link", void: true, props: ANCHOR;
    "main", container: true;
    "mark";
    "menu";
    "meta", void: true;
    "meter", props: METER;
    "nav", container: true;
    "ol";
    "optgroup", props: OPTION;
    "option", props: OPTION;
    "output", props: SELECT;
    "p", container: true;
    "picture";
    "pre";
    "progress", props: METER;
    "q";
    "section", container: true;
    "select", props: SELECT;
    "small";
    "source", void: true, props: MEDIA;
    "span", container: true;
    "strong";
    "style";
    "sub";
    "summary";
    "sup";
    "table";
    "tbody";
    "td";
    "template";
    "textarea", props: TEXT_AREA;
    "tfoot";
    "th";
    "thead";
    "time", props: TIME;
    "tr";
    "track", void: true, props: MEDIA;
    "u";
    "ul";
    "video", props: PLAYABLE;
    "wbr", void: true;
];

/// Looks up a tag by name. Returns `None` for names with no native base.
#[must_use]
pub fn lookup(tag: &str) -> Option<&'static TagInfo> {
    TAGS.iter().find(|info| info.name == tag)
}
