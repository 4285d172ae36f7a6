use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::SimilarityGroup;

const HEADERS: [&str; 8] = [
    "Group ID",
    "Attribute",
    "Similarity %",
    "Differences",
    "Proposed Key",
    "Merge or Keep Separate?",
    "Group ID to merge with",
    "Notes",
];

/// Write the review worksheet to `path`.
pub fn write(groups: &[SimilarityGroup], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_to(groups, file)
}

/// One row per group member. Similarity and differences come from the
/// member's best link; the decision columns are left for the reviewer.
pub fn write_to<W: Write>(groups: &[SimilarityGroup], out: W) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Necessary)
        .from_writer(out);

    writer.write_record(HEADERS)?;

    for group in groups {
        let key = group.suggested_key();
        for member in &group.members {
            let (similarity, differences) = match group.best_link(member) {
                Some(pair) => {
                    let other = if pair.first == *member {
                        &pair.second
                    } else {
                        &pair.first
                    };
                    (
                        format!("{}%", pair.score),
                        format!("vs '{}': {}", other, pair.differences),
                    )
                }
                None => (String::new(), String::new()),
            };

            let id = group.id.to_string();
            writer.write_record([
                id.as_str(),
                member.as_str(),
                similarity.as_str(),
                differences.as_str(),
                key.as_str(),
                "",
                "",
                "",
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}
