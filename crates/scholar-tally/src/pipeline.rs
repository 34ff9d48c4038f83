//! The four-stage tally pipeline: resolve author, initialize counters,
//! count citations, hand the result to the renderer/exporter.
//!
//! Every remote lookup goes through the snapshot cache first. A fetch is
//! persisted immediately after it completes, so a run interrupted mid-way
//! still leaves the finished snapshots on disk for the next run.

use tracing::{debug, info};

use crate::cache::SnapshotCache;
use crate::client::ScholarClient;
use crate::config::{api, fields};
use crate::error::{TallyError, TallyResult};
use crate::models::{AuthorProfile, Paper};
use crate::tally::{CitationTally, TallyReport, YearRange};

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct TallyRun {
    /// The resolved author profile.
    pub profile: AuthorProfile,

    /// Per-publication, per-year citation counts.
    pub tally: CitationTally,

    /// Per-citation classification totals.
    pub report: TallyReport,
}

/// Run the pipeline end to end.
///
/// # Errors
///
/// Returns error on remote-lookup or cache failure; a missing or
/// out-of-range citation year is classified, not an error.
pub async fn run(
    client: &ScholarClient,
    cache: &SnapshotCache,
    author_query: &str,
    range: YearRange,
) -> TallyResult<TallyRun> {
    let profile = resolve_author(client, cache, author_query).await?;
    info!(
        author = profile.author.name_or_default(),
        publications = profile.publications.len(),
        "resolved author profile"
    );

    let mut tally = CitationTally::init(
        profile.cited_publications().map(Paper::title_or_default),
        &range,
    );

    let report = count_citations(client, cache, &profile, &mut tally).await?;
    info!(
        counted = report.counted,
        missing_year = report.missing_year,
        out_of_range = report.out_of_range,
        "citation tally complete"
    );

    Ok(TallyRun { profile, tally, report })
}

/// Resolve the author profile, from cache when present.
///
/// A cache hit returns the snapshot verbatim and performs no network I/O.
/// On a miss: search by name, take the first match (none is fatal), page
/// through the full publication list, persist, return.
///
/// # Errors
///
/// Returns error on API or cache failure, or when the search matches nothing.
pub async fn resolve_author(
    client: &ScholarClient,
    cache: &SnapshotCache,
    author_query: &str,
) -> TallyResult<AuthorProfile> {
    let path = cache.author_path();
    if let Some(profile) = cache.load::<AuthorProfile>(&path)? {
        debug!(path = %path.display(), "author profile loaded from cache");
        return Ok(profile);
    }

    let search = client.search_authors(author_query, 0, 1).await?;
    let author = search
        .data
        .into_iter()
        .next()
        .ok_or_else(|| TallyError::author_not_found(author_query))?;

    let publications = fetch_all_papers(client, &author.author_id).await?;
    let profile = AuthorProfile { author, publications };

    cache.store(&path, &profile)?;
    Ok(profile)
}

/// Page through an author's complete publication list.
async fn fetch_all_papers(client: &ScholarClient, author_id: &str) -> TallyResult<Vec<Paper>> {
    let mut papers = Vec::new();
    let mut offset = 0;

    loop {
        let page = client
            .get_author_papers(author_id, offset, api::PAGE_SIZE, fields::PAPER)
            .await?;
        papers.extend(page.data);

        match page.next {
            Some(next) => offset = next,
            None => break,
        }
    }

    Ok(papers)
}

/// Count citations for every publication with a positive citation count.
///
/// Citing-works lists are cache-or-fetch keyed by `paper_id`; each citing
/// work is classified into the tally or the report's drop counters.
///
/// # Errors
///
/// Returns error on API or cache failure.
pub async fn count_citations(
    client: &ScholarClient,
    cache: &SnapshotCache,
    profile: &AuthorProfile,
    tally: &mut CitationTally,
) -> TallyResult<TallyReport> {
    let mut report = TallyReport::default();

    for publication in profile.cited_publications() {
        let citing = resolve_citations(client, cache, &publication.paper_id).await?;
        let title = publication.title_or_default();

        for citer in &citing {
            let outcome = tally.apply(title, citer.year);
            report.record(outcome);
        }

        debug!(
            title,
            citations = citing.len(),
            "tallied publication"
        );
    }

    Ok(report)
}

/// Resolve one publication's citing works, from cache when present.
///
/// # Errors
///
/// Returns error on API or cache failure.
pub async fn resolve_citations(
    client: &ScholarClient,
    cache: &SnapshotCache,
    paper_id: &str,
) -> TallyResult<Vec<Paper>> {
    let path = cache.citations_path(paper_id);
    if let Some(citing) = cache.load::<Vec<Paper>>(&path)? {
        debug!(paper_id, path = %path.display(), "citations loaded from cache");
        return Ok(citing);
    }

    let mut citing = Vec::new();
    let mut offset = 0;

    loop {
        let page = client
            .get_citations(paper_id, offset, api::PAGE_SIZE, fields::CITATION)
            .await?;
        citing.extend(page.data.into_iter().filter_map(|ctx| ctx.paper));

        match page.next {
            Some(next) => offset = next,
            None => break,
        }
    }

    cache.store(&path, &citing)?;
    Ok(citing)
}
