//! Command implementations.

pub mod extract;
pub mod plan;
pub mod variants;

pub use self::extract::execute_extract;
pub use self::plan::execute_plan;
pub use self::variants::execute_variants;

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Read a roster file: one artist name per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_roster(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_roster(&contents))
}

fn parse_roster(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roster_skips_comments_and_blanks() {
        let names = parse_roster("# seed roster\nThe Beatles\n\n  Can  \n#Neu!\nSuicide\n");
        assert_eq!(names, vec!["The Beatles", "Can", "Suicide"]);
    }
}
