use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Score, ScoredPair, SimilarityGroup, Threshold};

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub verbose: bool,
    pub quiet: bool,
    pub show_bridges: bool,
}

/// Counts shown in the summary box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub distinct: usize,
    pub groups: usize,
    pub grouped: usize,
    pub links: usize,
    pub formatting_only: usize,
}

pub fn summarize(groups: &[SimilarityGroup], distinct: usize) -> Summary {
    let links = groups.iter().flat_map(|g| g.links.iter());
    Summary {
        distinct,
        groups: groups.len(),
        grouped: groups.iter().map(|g| g.members.len()).sum(),
        links: links.clone().count(),
        formatting_only: links.filter(|p| p.formatting_only).count(),
    }
}

/// Render a colored terminal report.
pub fn render(
    groups: &[SimilarityGroup],
    input: &Path,
    threshold: Threshold,
    distinct: usize,
    options: RenderOptions,
) -> Result<()> {
    let summary = summarize(groups, distinct);

    if options.quiet {
        println!(
            "Distinct: {}  Groups: {}  Grouped: {}  Pairs: {}",
            summary.distinct,
            summary.groups.to_string().yellow(),
            summary.grouped,
            summary.links,
        );
        return Ok(());
    }

    println!("\n {} v{}", "attrsim".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Analyzing: {}  (threshold {})\n", input.display(), threshold);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Distinct attributes   : {:>6}", summary.distinct)
    );
    println!(
        " │  {:<48} │",
        format!("Similarity groups     : {:>6}", summary.groups)
    );
    println!(
        " │  {:<48} │",
        format!("Attributes in groups  : {:>6}", summary.grouped)
    );
    println!(
        " │  {:<48} │",
        format!(
            "Linking pairs         : {:>6}  ({} formatting only)",
            summary.links, summary.formatting_only
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if groups.is_empty() {
        println!(" {} No similar attributes at {}\n", "✓".green(), threshold);
        return Ok(());
    }

    for group in groups {
        println!(
            " {} {}  suggested key: {}\n",
            format!("[GROUP {}]", group.id).cyan().bold(),
            format!("{} attributes", group.members.len()).dimmed(),
            group.suggested_key().bold()
        );
        render_members(group);

        if options.verbose {
            render_pairs(&group.links, Color::Reset);
        }
        if options.show_bridges && !group.bridged.is_empty() {
            println!("   {} bridged through other members:", "↯".yellow());
            render_pairs(&group.bridged, Color::DarkGrey);
        }
        println!();
    }

    render_buckets(groups, threshold, options.verbose);
    Ok(())
}

fn render_members(group: &SimilarityGroup) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Attribute").add_attribute(Attribute::Bold),
            Cell::new("Closest match").add_attribute(Attribute::Bold),
            Cell::new("Similarity").add_attribute(Attribute::Bold),
            Cell::new("Differences").add_attribute(Attribute::Bold),
        ]);

    for member in &group.members {
        let Some(pair) = group.best_link(member) else {
            continue;
        };
        let other = if pair.first == *member {
            &pair.second
        } else {
            &pair.first
        };

        table.add_row(vec![
            Cell::new(quoted(member)),
            Cell::new(quoted(other)),
            Cell::new(format!("{}%", pair.score))
                .fg(score_color(pair.score))
                .set_alignment(CellAlignment::Right),
            Cell::new(differences_cell(pair)),
        ]);
    }

    println!("{}", table);
}

fn render_pairs(pairs: &[ScoredPair], color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("First").add_attribute(Attribute::Bold),
            Cell::new("Second").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Differences").add_attribute(Attribute::Bold),
        ]);

    for pair in pairs {
        table.add_row(vec![
            Cell::new(quoted(&pair.first)).fg(color),
            Cell::new(quoted(&pair.second)).fg(color),
            Cell::new(format!("{}%", pair.score))
                .fg(color)
                .set_alignment(CellAlignment::Right),
            Cell::new(differences_cell(pair)).fg(color),
        ]);
    }

    println!("{}", table);
}

fn render_buckets(groups: &[SimilarityGroup], threshold: Threshold, verbose: bool) {
    println!(" {}\n", "Summary by similarity percentage".bold());

    let buckets = percentage_buckets(groups);
    for (score, pairs) in &buckets {
        println!(
            "   {} {}",
            format!("{:>3}%", score).color(colored_score(*score)),
            format!("({} pairs)", pairs.len()).dimmed()
        );
        if verbose {
            for (idx, pair) in pairs.iter().enumerate() {
                println!("      {}. '{}' ↔ '{}'", idx + 1, pair.first, pair.second);
            }
        }
    }

    let total: usize = buckets.iter().map(|(_, p)| p.len()).sum();
    println!(
        "\n Total similar pairs at {} or above: {}\n",
        threshold,
        total.to_string().bold()
    );
}

/// Linking pairs bucketed by score, highest score first.
pub fn percentage_buckets(groups: &[SimilarityGroup]) -> Vec<(Score, Vec<&ScoredPair>)> {
    let mut buckets: BTreeMap<Score, Vec<&ScoredPair>> = BTreeMap::new();
    for pair in groups.iter().flat_map(|g| g.links.iter()) {
        buckets.entry(pair.score).or_default().push(pair);
    }
    buckets.into_iter().rev().collect()
}

fn differences_cell(pair: &ScoredPair) -> String {
    pair.differences
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn quoted(s: &str) -> String {
    format!("'{}'", s)
}

fn score_color(score: Score) -> Color {
    match score {
        95..=100 => Color::Green,
        85..=94 => Color::Yellow,
        _ => Color::Red,
    }
}

fn colored_score(score: Score) -> colored::Color {
    match score {
        95..=100 => colored::Color::Green,
        85..=94 => colored::Color::Yellow,
        _ => colored::Color::Red,
    }
}
