//! The color name to command table.

use std::collections::BTreeMap;

use crate::color::types::{ColorError, ColorRequest, Command};

/// Built-in colors and their channel values.
const BUILTIN: [(&str, [u32; 3]); 5] = [
    ("red", [1020, 0, 0]),
    ("green", [0, 1020, 0]),
    ("blue", [0, 0, 1020]),
    ("purple", [1000, 0, 800]),
    ("off", [0, 0, 0]),
];

/// Lookup table driving the translator.
///
/// `custom` is never stored here; it always resolves from the request's
/// own triplet.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: BTreeMap<String, Command>,
}

impl Palette {
    /// The built-in palette extended (or overridden) by `extra`.
    pub fn with_entries<'a, I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a [u32; 3])>,
    {
        let mut palette = Self::default();
        for (name, [r, g, b]) in extra {
            palette.entries.insert(name.clone(), Command::set(r, g, b));
        }
        palette
    }

    /// Resolve a request to the command it should publish.
    ///
    /// `Ok(None)` means the color is not known.
    pub fn resolve(&self, request: &ColorRequest) -> Result<Option<Command>, ColorError> {
        if request.is_custom() {
            let rgb = request.rgb.as_ref().ok_or(ColorError::MissingRgb)?;
            return Ok(Some(Command::from(rgb)));
        }
        Ok(self.entries.get(&request.color).cloned())
    }

    pub fn get(&self, color: &str) -> Option<&Command> {
        self.entries.get(color)
    }

    /// Known color names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, [r, g, b])| (name.to_string(), Command::set(r, g, b)))
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::types::RgbTriplet;

    fn resolve(palette: &Palette, color: &str) -> Option<String> {
        palette
            .resolve(&ColorRequest::named(color))
            .unwrap()
            .map(Command::into_string)
    }

    #[test]
    fn test_builtin_commands() {
        let palette = Palette::default();
        assert_eq!(resolve(&palette, "red").as_deref(), Some("set/1020/0/0"));
        assert_eq!(resolve(&palette, "green").as_deref(), Some("set/0/1020/0"));
        assert_eq!(resolve(&palette, "blue").as_deref(), Some("set/0/0/1020"));
        assert_eq!(resolve(&palette, "purple").as_deref(), Some("set/1000/0/800"));
        assert_eq!(resolve(&palette, "off").as_deref(), Some("set/0/0/0"));
        assert_eq!(palette.len(), 5);
    }

    #[test]
    fn test_custom_uses_triplet() {
        let palette = Palette::default();
        let cmd = palette
            .resolve(&ColorRequest::custom(RgbTriplet::new("10", "20", "30")))
            .unwrap();
        assert_eq!(cmd.unwrap().as_str(), "set/10/20/30");
    }

    #[test]
    fn test_custom_without_triplet() {
        let palette = Palette::default();
        let request = ColorRequest::named("custom");
        assert_eq!(palette.resolve(&request), Err(ColorError::MissingRgb));
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        let palette = Palette::default();
        assert_eq!(resolve(&palette, "teal"), None);
        assert_eq!(resolve(&palette, "Red"), None);
        assert_eq!(resolve(&palette, ""), None);
    }

    #[test]
    fn test_extra_entries() {
        let mut extra = BTreeMap::new();
        extra.insert("white".to_string(), [1020, 1020, 1020]);
        extra.insert("red".to_string(), [800, 0, 0]);

        let palette = Palette::with_entries(&extra);
        assert_eq!(resolve(&palette, "white").as_deref(), Some("set/1020/1020/1020"));
        assert_eq!(resolve(&palette, "red").as_deref(), Some("set/800/0/0"));
        assert_eq!(palette.len(), 6);
        assert!(palette.names().any(|n| n == "white"));
    }
}
