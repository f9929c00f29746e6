use anyhow::{anyhow, Context, Result};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

static BANK_DIR: Dir = include_dir!("src/banks");

/// A word bank embedded in the binary. Bank words never contain the letter
/// `p`, which is reserved for the pause command while playing.
#[derive(Deserialize, Clone, Debug)]
pub struct WordBank {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordBank {
    pub fn load(name: &str) -> Result<Self> {
        let file_name = format!("{name}.json");
        let file = BANK_DIR
            .get_file(&file_name)
            .ok_or_else(|| anyhow!("unknown word bank `{name}`"))?;

        let file_as_str = file
            .contents_utf8()
            .with_context(|| format!("word bank `{name}` is not valid utf-8"))?;

        let bank: WordBank = from_str(file_as_str)
            .with_context(|| format!("unable to deserialize word bank `{name}`"))?;

        Ok(bank)
    }

    /// Names of all embedded banks, for `--list-banks`.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = BANK_DIR
            .files()
            .filter_map(|f| f.path().file_stem())
            .filter_map(|s| s.to_str())
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_classic() {
        let bank = WordBank::load("classic").unwrap();

        assert_eq!(bank.name, "classic");
        assert_eq!(bank.words.len(), 16);
        assert_eq!(bank.size as usize, bank.words.len());
    }

    #[test]
    fn test_load_meadow() {
        let bank = WordBank::load("meadow").unwrap();

        assert_eq!(bank.name, "meadow");
        assert!(!bank.words.is_empty());
        assert_eq!(bank.size as usize, bank.words.len());
    }

    #[test]
    fn test_unknown_bank_errors() {
        let result = WordBank::load("nonexistent");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("nonexistent"));
    }

    #[test]
    fn test_names_lists_embedded_banks() {
        let names = WordBank::names();

        assert!(names.contains(&"classic"));
        assert!(names.contains(&"meadow"));
    }

    #[test]
    fn test_words_never_contain_pause_key() {
        // `p` toggles pause while playing, so no bank word may require it.
        for name in WordBank::names() {
            let bank = WordBank::load(name).unwrap();
            for word in &bank.words {
                assert!(
                    !word.contains('p'),
                    "bank `{}` word `{}` contains the pause key",
                    name,
                    word
                );
            }
        }
    }

    #[test]
    fn test_bank_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 3,
            "words": ["cat", "dog", "owl"]
        }
        "#;

        let bank: WordBank = from_str(json_data).expect("failed to deserialize test bank");

        assert_eq!(bank.name, "test");
        assert_eq!(bank.size, 3);
        assert_eq!(bank.words.len(), 3);
    }
}
