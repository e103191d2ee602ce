use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static PRESET_DIR: Dir = include_dir!("src/presets");

/// A bundled exercise list shipped inside the binary
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct Preset {
    pub name: String,
    pub size: u32,
    pub exercises: Vec<String>,
}

impl Preset {
    pub fn new(file_name: String) -> Self {
        read_preset_from_file(format!("{file_name}.json")).unwrap()
    }

    /// The preset as raw list text, one exercise per line
    pub fn as_text(&self) -> String {
        self.exercises.join("\n")
    }
}

fn read_preset_from_file(file_name: String) -> Result<Preset, Box<dyn Error>> {
    let file = PRESET_DIR.get_file(file_name).expect("Preset file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let preset = from_str(file_as_str).expect("Unable to deserialize preset json");

    Ok(preset)
}

/// Raw bytes of an embedded preset file, for the shell cache
pub fn preset_file(file_name: &str) -> Option<&'static [u8]> {
    PRESET_DIR.get_file(file_name).map(|f| f.contents())
}

/// Seed text used when no saved list exists
pub fn default_list_text() -> String {
    Preset::new("bodyweight".to_string()).as_text()
}

/// Turns raw multi-line text into an exercise list: trims each line, drops
/// blanks, and dedupes case-insensitively while keeping first-seen order.
pub fn normalize(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .unique_by(|line| line.to_lowercase())
        .collect()
}

/// Uniform random permutation of the list (Fisher-Yates via SliceRandom)
pub fn shuffled_order(list: &[String]) -> Vec<String> {
    let mut order = list.to_vec();
    order.shuffle(&mut rand::thread_rng());
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_bodyweight() {
        let preset = Preset::new("bodyweight".to_string());

        assert_eq!(preset.name, "bodyweight");
        assert_eq!(preset.exercises.len(), 12);
        assert_eq!(preset.size as usize, preset.exercises.len());
        assert_eq!(preset.exercises[0], "Push-ups");
    }

    #[test]
    fn test_preset_core() {
        let preset = Preset::new("core".to_string());

        assert_eq!(preset.name, "core");
        assert_eq!(preset.size as usize, preset.exercises.len());
        assert!(preset.exercises.contains(&"Plank".to_string()));
    }

    #[test]
    fn test_preset_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 2,
            "exercises": ["Push-ups", "Squats"]
        }
        "#;

        let preset: Preset = from_str(json_data).expect("Failed to deserialize test preset");

        assert_eq!(preset.name, "test");
        assert_eq!(preset.exercises, vec!["Push-ups", "Squats"]);
        assert_eq!(preset.as_text(), "Push-ups\nSquats");
    }

    #[test]
    #[should_panic(expected = "Preset file not found")]
    fn test_read_nonexistent_preset_file() {
        let _result = read_preset_from_file("nonexistent.json".to_string());
    }

    #[test]
    fn test_preset_file_bytes() {
        assert!(preset_file("bodyweight.json").is_some());
        assert!(preset_file("nonexistent.json").is_none());
    }

    #[test]
    fn test_default_list_text_has_twelve_lines() {
        let text = default_list_text();
        assert_eq!(text.lines().count(), 12);
    }

    #[test]
    fn test_normalize_trims_and_drops_blanks() {
        let list = normalize("  Push-ups  \n\n   \nSquats\r\n");
        assert_eq!(list, vec!["Push-ups", "Squats"]);
    }

    #[test]
    fn test_normalize_dedupes_case_insensitively_preserving_order() {
        let list = normalize("Push-ups\npush-ups\nSquats\nPUSH-UPS");
        assert_eq!(list, vec!["Push-ups", "Squats"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("  Lunges \nplank\nPlank\n\nLunges");
        let twice = normalize(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_empty_and_whitespace_only() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t\n  ").is_empty());
    }

    #[test]
    fn test_normalize_default_list_roundtrip() {
        let text = default_list_text();
        let list = normalize(&text);
        assert_eq!(list.join("\n"), text);
    }

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let list: Vec<String> = (0..50).map(|i| format!("exercise {i}")).collect();

        let order = shuffled_order(&list);

        assert_eq!(order.len(), list.len());
        let mut sorted_order = order.clone();
        let mut sorted_list = list.clone();
        sorted_order.sort();
        sorted_list.sort();
        assert_eq!(sorted_order, sorted_list);
    }

    #[test]
    fn test_shuffled_order_single_element() {
        let list = vec!["Burpees".to_string()];
        assert_eq!(shuffled_order(&list), list);
    }
}
