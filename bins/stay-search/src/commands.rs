//! Subcommand implementations

use crate::corpus;
use crate::Output;
use anyhow::Result;
use staybook_cli::output::{format_count, format_duration, listing_row, result_row, Status};
use staybook_core::Error;
use staybook_search::{Candidate, SearchEngine, SearchFilter, SearchRequest};
use staybook_telemetry::{metrics, Timer};
use std::path::Path;

pub fn rank(
    engine: &SearchEngine,
    query: &str,
    corpus_path: &Path,
    filter: SearchFilter,
    limit: usize,
    out: &Output,
) -> Result<()> {
    let corpus = corpus::load(corpus_path)?;
    metrics().gauge("search.corpus_size", corpus.len() as u64);

    let request = SearchRequest { query: query.to_string(), filter };

    let timer = Timer::start("search.rank");
    let results = engine.search(&corpus, &request);
    let elapsed = timer.stop();

    metrics().increment("search.queries");
    metrics().increment_by("search.hits", results.len() as u64);

    let shown = &results[..shown_len(results.len(), limit)];

    if out.json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    if results.is_empty() {
        Status::warning(&format!("No listings matched \"{}\"", query));
        return Ok(());
    }

    let max = engine.config().weights.max_score();
    Status::header(&format!("Results for \"{}\"", query));
    for (i, result) in shown.iter().enumerate() {
        let c = result.candidate;
        println!("{}", result_row(i + 1, result.score, max, c.id, &c.name, &location(c)));
    }

    Status::info(&format!(
        "{} of {} in {} ({} workers)",
        format_count(results.len(), "match", "matches"),
        format_count(corpus.len(), "listing", "listings"),
        format_duration(elapsed),
        engine.workers()
    ));

    Ok(())
}

pub fn explain(engine: &SearchEngine, query: &str, id: u64, corpus_path: &Path, out: &Output) -> Result<()> {
    let corpus = corpus::load(corpus_path)?;

    let candidate = corpus.iter().find(|c| c.id == id).ok_or_else(|| {
        Error::validation(format!("No listing with id {}", id))
            .with_suggestion("Use `stay-search filter` to list the ids in the corpus")
    })?;

    let indexes = {
        staybook_telemetry::timed_span!("search.index", listings = corpus.len());
        engine.indexes(&corpus)
    };

    let parsed = engine.interpret(query);
    let breakdown = engine.explain(query, candidate, &indexes);

    if out.json {
        let report = serde_json::json!({
            "id": candidate.id,
            "query": parsed,
            "breakdown": breakdown,
            "total": breakdown.total(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    Status::header(&format!("#{} {}", candidate.id, candidate.name));
    println!("  query      {}", parsed.normalized);
    let signals = [
        ("name", breakdown.name),
        ("type", breakdown.kind),
        ("rating", breakdown.rating),
        ("province", breakdown.province),
        ("district", breakdown.district),
        ("ward", breakdown.ward),
        ("benefits", breakdown.benefits),
    ];
    for (label, points) in signals {
        println!("  {:<10} {:>3}", label, points);
    }
    println!("  {:<10} {:>3}", "total", breakdown.total());

    Ok(())
}

pub fn parse(engine: &SearchEngine, query: &str, out: &Output) -> Result<()> {
    let parsed = engine.interpret(query);

    if out.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    println!("normalized  {}", parsed.normalized);
    println!("type        {}", parsed.kind.map_or("-".to_string(), |k| k.to_string()));
    println!("rating      {}", parsed.rating.map_or("-".to_string(), |r| r.to_string()));

    Ok(())
}

pub fn filter(
    engine: &SearchEngine,
    corpus_path: &Path,
    filter: &SearchFilter,
    limit: usize,
    out: &Output,
) -> Result<()> {
    let corpus = corpus::load(corpus_path)?;
    let found = engine.filter(&corpus, filter);
    let shown = &found[..shown_len(found.len(), limit)];

    if out.json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    if found.is_empty() {
        Status::warning("No listings matched the filter");
        return Ok(());
    }

    for c in shown {
        let kind = c.kind.map_or("-", |k| k.label());
        println!("{}", listing_row(c.id, &c.name, kind, &location(c)));
    }

    Status::info(&format!(
        "{} of {}",
        format_count(found.len(), "listing", "listings"),
        corpus.len()
    ));

    Ok(())
}

/// Number of items to print; a limit of zero prints everything.
fn shown_len(total: usize, limit: usize) -> usize {
    if limit == 0 { total } else { limit.min(total) }
}

/// "ward, district, province" with blank parts left out.
fn location(c: &Candidate) -> String {
    [c.ward.as_str(), c.district.as_str(), c.province.as_str()]
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shown_len() {
        assert_eq!(shown_len(5, 0), 5);
        assert_eq!(shown_len(5, 3), 3);
        assert_eq!(shown_len(2, 10), 2);
    }

    #[test]
    fn test_location_skips_blank_parts() {
        let c = Candidate {
            id: 1,
            district: "Sơn Trà".into(),
            province: "Đà Nẵng".into(),
            ..Default::default()
        };
        assert_eq!(location(&c), "Sơn Trà, Đà Nẵng");
        assert_eq!(location(&Candidate::default()), "");
    }
}
