//! Ranking a corpus against a query.
//!
//! Scoring fans out over a bounded rayon pool owned by the engine (or runs
//! sequentially without the `parallel` feature). Results are sorted by score
//! descending with a deterministic tie-break, so identical inputs always
//! produce identical output.

use crate::error::Result;
use crate::filter::SearchFilter;
use crate::index::CorpusIndexes;
use crate::model::Candidate;
use crate::query::{ParsedQuery, QueryInterpreter};
use crate::relevance::{QueryContext, ScoreBreakdown, Scorer};
use serde::{Deserialize, Serialize};
use staybook_core::config::{SearchConfig, TieBreak};
use staybook_core::{Error, ErrorCode};
use std::time::Instant;

/// A candidate with a positive relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredResult<'a> {
    /// The matched candidate
    pub candidate: &'a Candidate,
    /// Relevance score (higher is better, always > 0)
    pub score: u32,
}

/// A free-text query plus structured filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,
    /// Constraints applied before ranking
    #[serde(default)]
    pub filter: SearchFilter,
}

/// Search entry point.
///
/// Holds the configuration, the property-type synonym indexes and the
/// scoring pool; all are reused across requests.
pub struct SearchEngine {
    config: SearchConfig,
    interpreter: QueryInterpreter,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("config", &self.config)
            .field("interpreter", &self.interpreter)
            .finish_non_exhaustive()
    }
}

impl SearchEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let interpreter = QueryInterpreter::new(&config.keywords, &config.substring_sizes);
        if let Some(kind) = interpreter.undetectable_kind() {
            return Err(Error::new(
                ErrorCode::ConfigValidationError,
                format!("search.keywords.{}: no keyword is left after normalization", kind.label()),
            )
            .with_suggestion("Use keywords with at least one letter or digit")
            .into());
        }

        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_workers)
            .thread_name(|i| format!("staybook-score-{}", i))
            .build()
            .map_err(|e| crate::SearchError::ThreadPool(e.to_string()))?;

        Ok(Self {
            config,
            interpreter,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    /// Engine with default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(SearchConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of scoring threads.
    pub fn workers(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            self.pool.current_num_threads()
        }

        #[cfg(not(feature = "parallel"))]
        {
            1
        }
    }

    /// Build the per-corpus indexes.
    ///
    /// [`SearchEngine::rank`] does this on every call; callers serving many
    /// queries over an unchanged corpus can build once and use
    /// [`SearchEngine::rank_with_indexes`].
    pub fn indexes(&self, corpus: &[Candidate]) -> CorpusIndexes {
        CorpusIndexes::build(corpus, &self.config.substring_sizes)
    }

    /// Read property type and star rating out of a query.
    pub fn interpret(&self, query: &str) -> ParsedQuery {
        self.interpreter.parse(query)
    }

    /// Rank `corpus` against `query`.
    ///
    /// Only candidates scoring above zero are returned, best first. An empty
    /// corpus or blank query yields an empty result.
    pub fn rank<'a>(&self, query: &str, corpus: &'a [Candidate]) -> Vec<ScoredResult<'a>> {
        if corpus.is_empty() {
            return Vec::new();
        }
        let indexes = self.indexes(corpus);
        self.rank_with_indexes(query, corpus, &indexes)
    }

    /// Rank `corpus` using indexes built earlier by [`SearchEngine::indexes`].
    pub fn rank_with_indexes<'a>(
        &self,
        query: &str,
        corpus: &'a [Candidate],
        indexes: &CorpusIndexes,
    ) -> Vec<ScoredResult<'a>> {
        let candidates: Vec<&'a Candidate> = corpus.iter().collect();
        self.rank_candidates(query, &candidates, indexes)
    }

    /// Filter `corpus`, then rank what is left against the query.
    ///
    /// Indexes cover the whole corpus, so a filtered-out candidate can still
    /// be the closest match for a location or name. A blank query yields an
    /// empty result; use [`SearchEngine::filter`] to list without ranking.
    pub fn search<'a>(&self, corpus: &'a [Candidate], request: &SearchRequest) -> Vec<ScoredResult<'a>> {
        let indexes = self.indexes(corpus);
        let candidates = request.filter.apply(corpus, &indexes.name);

        tracing::debug!(
            corpus = corpus.len(),
            filtered = candidates.len(),
            "Applied search filter"
        );

        self.rank_candidates(&request.query, &candidates, &indexes)
    }

    /// Candidates passing `filter`, in corpus order.
    pub fn filter<'a>(&self, corpus: &'a [Candidate], filter: &SearchFilter) -> Vec<&'a Candidate> {
        let names = crate::index::MatchIndex::from_field(corpus, |c| &c.name, &self.config.substring_sizes);
        filter.apply(corpus, &names)
    }

    /// Per-signal score of one candidate.
    pub fn explain(&self, query: &str, candidate: &Candidate, indexes: &CorpusIndexes) -> ScoreBreakdown {
        let ctx = QueryContext::new(self.interpreter.parse(query), indexes);
        Scorer::new(&self.config).breakdown(&ctx, candidate)
    }

    fn rank_candidates<'a>(
        &self,
        query: &str,
        candidates: &[&'a Candidate],
        indexes: &CorpusIndexes,
    ) -> Vec<ScoredResult<'a>> {
        let parsed = self.interpreter.parse(query);
        if candidates.is_empty() || parsed.is_empty() {
            return Vec::new();
        }

        let span = tracing::debug_span!("rank", query = %parsed.normalized, candidates = candidates.len());
        let _guard = span.enter();
        let started = Instant::now();

        tracing::trace!(kind = ?parsed.kind, rating = ?parsed.rating, "Interpreted query");

        let ctx = QueryContext::new(parsed, indexes);
        let scorer = Scorer::new(&self.config);
        let mut results = self.score_all(&ctx, &scorer, candidates);

        match self.config.tie_break {
            TieBreak::Id => results.sort_by(|a, b| {
                b.score.cmp(&a.score).then(a.candidate.id.cmp(&b.candidate.id))
            }),
            TieBreak::Corpus => results.sort_by(|a, b| b.score.cmp(&a.score)),
        }

        tracing::debug!(
            hits = results.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Ranked candidates"
        );

        results
    }

    /// Score every candidate, keeping positives in input order.
    fn score_all<'a>(
        &self,
        ctx: &QueryContext<'_>,
        scorer: &Scorer<'_>,
        candidates: &[&'a Candidate],
    ) -> Vec<ScoredResult<'a>> {
        let score_one = |candidate: &&'a Candidate| {
            let score = scorer.score(ctx, candidate);
            (score > 0).then_some(ScoredResult { candidate: *candidate, score })
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.pool
                .install(|| candidates.par_iter().filter_map(score_one).collect())
        }

        #[cfg(not(feature = "parallel"))]
        {
            candidates.iter().filter_map(score_one).collect()
        }
    }
}
