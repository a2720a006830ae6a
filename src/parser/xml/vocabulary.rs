//! Namespaces and activity vocabularies used by UiPath workflow files
//!
//! Vocabulary entries are written as `prefix:LocalName` against the
//! prefixes in [`NAMESPACES`]. The lists track Studio 18.4.

/// Prefix → namespace URI registry applied to every query
pub const NAMESPACES: &[(&str, &str)] = &[
    // Default namespace of a workflow file
    ("xaml", "http://schemas.microsoft.com/netfx/2009/xaml/activities"),
    ("sap2010", "http://schemas.microsoft.com/netfx/2010/xaml/activities/presentation"),
    ("ui", "http://schemas.uipath.com/workflow/activities"),
    ("x", "http://schemas.microsoft.com/winfx/2006/xaml"),
];

pub const XAML_NS: &str = "http://schemas.microsoft.com/netfx/2009/xaml/activities";
pub const SAP2010_NS: &str = "http://schemas.microsoft.com/netfx/2010/xaml/activities/presentation";
pub const UI_NS: &str = "http://schemas.uipath.com/workflow/activities";
pub const X_NS: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

/// Activities that operate on a workbook file directly
pub const WORKBOOK_ACTIVITIES: &[&str] = &[
    "ui:AppendRange",
    "ui:GetTableRange",
    "ui:ReadCell",
    "ui:ReadCellFormula",
    "ui:ReadColumn",
    "ui:ReadRange",
    "ui:ReadRow",
    "ui:WriteCell",
    "ui:WriteRange",
];

/// Activities that open or attach to a window and provide its scope
pub const WINDOW_SCOPES: &[&str] = &[
    "ui:ElementScope",
    "ui:WindowScope",
    "ui:BrowserScope",
    "ui:OpenApplication",
    "ui:OpenBrowser",
];

/// Key names accepted by SendHotkey when `SpecialKey` is enabled
pub const SPECIAL_KEYS: &[&str] = &[
    "add", "alt", "lalt", "ralt", "back", "break", "caps", "ctrl", "lctrl", "rctrl", "decimal",
    "del", "div", "down", "end", "enter", "numEnter", "esc", "f1", "f2", "f3", "f4", "f5", "f6",
    "f7", "f8", "f9", "f10", "f11", "f12", "home", "ins", "left", "mul", "num", "num0", "num1",
    "num2", "num3", "num4", "num5", "num6", "num7", "num8", "num9", "pause", "pgup", "pgdn",
    "right", "scroll", "shift", "lshift", "rshift", "sleep", "sub", "tab", "up",
];

/// Resolve a registered prefix to its namespace URI
pub fn namespace_uri(prefix: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

/// Split a `prefix:LocalName` vocabulary entry into (namespace URI, local name)
pub fn resolve_qualified(name: &str) -> Option<(&'static str, &str)> {
    let (prefix, local) = name.split_once(':')?;
    Some((namespace_uri(prefix)?, local))
}

/// Whether a key name is a SendHotkey special key.
///
/// Comparison ignores ASCII case so that mixed-case entries such as
/// `numEnter` match lower-cased input.
pub fn is_special_key(key: &str) -> bool {
    SPECIAL_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}
