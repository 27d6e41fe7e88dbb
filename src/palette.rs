use std::path::Path;

use serde_json::Value;
use tracing::warn;

use super::error::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub id: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    pub name: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteSet {
    pub palettes: Vec<Palette>,
    /// Names of entries that were not objects of colors.
    pub skipped: Vec<String>,
}

impl Palette {
    pub fn new<I, K, V>(name: impl Into<String>, steps: I) -> Palette
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Palette {
            name: name.into(),
            steps: steps
                .into_iter()
                .map(|(id, color)| Step { id: id.into(), color: color.into() })
                .collect(),
        }
    }
}

impl PaletteSet {
    /// Reads `{ <any key>: { <palette>: { <step>: <color>, .. }, .. } }`.
    ///
    /// Only the first top-level key is consulted. Entries under it that are
    /// not objects are skipped. Step values that are not strings are kept in
    /// their JSON spelling and rejected later as colors.
    pub fn from_value(value: Value) -> Result<PaletteSet, InputError> {
        let Value::Object(root) = value else {
            return Err(InputError::Structure("top level is not an object".into()));
        };

        let Some((root_key, palettes)) = root.into_iter().next() else {
            return Err(InputError::Structure("document has no palettes".into()));
        };

        let Value::Object(palettes) = palettes else {
            return Err(InputError::Structure(format!(
                "'{root_key}' does not hold an object of palettes"
            )));
        };

        let mut set = PaletteSet::default();
        for (name, steps) in palettes {
            let Value::Object(steps) = steps else {
                warn!(palette = %name, "skipping entry: not an object of colors");
                set.skipped.push(name);
                continue;
            };

            set.palettes.push(Palette {
                steps: steps
                    .into_iter()
                    .map(|(id, color)| Step {
                        id,
                        color: match color {
                            Value::String(s) => s,
                            other => other.to_string(),
                        },
                    })
                    .collect(),
                name,
            });
        }

        Ok(set)
    }

    pub fn from_json(src: &str) -> Result<PaletteSet, InputError> {
        let value: Value = serde_json::from_str(src.trim())?;
        PaletteSet::from_value(value)
    }

    pub fn from_ron(src: &str) -> Result<PaletteSet, InputError> {
        let value: Value = ron::from_str(src)?;
        PaletteSet::from_value(value)
    }

    pub fn from_yaml(src: &str) -> Result<PaletteSet, InputError> {
        let value: Value = serde_yaml::from_str(src)?;
        PaletteSet::from_value(value)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<PaletteSet, VizError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(match path.as_ref().extension().ok_or(VizError::ExtensionError)?.to_str() {
            Some("json") => PaletteSet::from_json(&contents)?,
            Some("ron") => PaletteSet::from_ron(&contents)?,
            Some("yaml") | Some("yml") => PaletteSet::from_yaml(&contents)?,
            _ => return Err(VizError::ExtensionError),
        })
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAILWIND: &str = r##"
        {
          "colors": {
            "Blue": { "50": "#eff6ff", "500": "#3b82f6", "900": "#1e3a8a" },
            "Red": { "100": "#fee2e2", "600": "#dc2626" }
          }
        }
    "##;

    #[test]
    fn keeps_document_order() {
        let set = PaletteSet::from_json(TAILWIND).unwrap();
        let names: Vec<_> = set.palettes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Blue", "Red"]);

        let blue = &set.palettes[0];
        assert_eq!(blue.steps.len(), 3);
        assert_eq!(blue.steps[1], Step { id: "500".into(), color: "#3b82f6".into() });
    }

    #[test]
    fn only_first_key_is_read() {
        let set = PaletteSet::from_json(
            r##"{"a": {"Gray": {"1": "#111111"}}, "b": {"Green": {"1": "#00ff00"}}}"##,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.palettes[0].name, "Gray");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = PaletteSet::from_json("{not json").unwrap_err();
        assert!(err.is_parse());
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn non_object_roots_are_structure_errors() {
        for src in [r#"{"x": "not an object"}"#, "{}", "[1, 2]", "42"] {
            let err = PaletteSet::from_json(src).unwrap_err();
            assert!(err.is_structure(), "{src}: {err}");
        }
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let set = PaletteSet::from_json(
            r##"{"colors": {"Blue": {"50": "#eff6ff"}, "version": "3", "Red": {"1": "#ff0000"}}}"##,
        )
        .unwrap();
        let names: Vec<_> = set.palettes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Blue", "Red"]);
        assert_eq!(set.skipped, ["version"]);
    }

    #[test]
    fn non_string_colors_survive_until_layout() {
        let set = PaletteSet::from_json(r#"{"x": {"P": {"1": 255, "2": null}}}"#).unwrap();
        let colors: Vec<_> = set.palettes[0].steps.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, ["255", "null"]);
    }

    #[test]
    fn empty_palette_object_has_no_palettes() {
        let set = PaletteSet::from_json(r#"{"x": {}}"#).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn reads_ron_and_yaml() {
        let ron = PaletteSet::from_ron(r##"{"colors": {"Blue": {"50": "#eff6ff"}}}"##).unwrap();
        let yaml = PaletteSet::from_yaml("colors:\n  Blue:\n    \"50\": \"#eff6ff\"\n").unwrap();
        assert_eq!(ron, yaml);
        assert_eq!(ron.palettes[0], Palette::new("Blue", [("50", "#eff6ff")]));
    }
}
