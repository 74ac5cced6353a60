//! Corpus download commands: `prov` and `translations`.

use std::sync::Arc;

use anyhow::anyhow;
use seedcat_corpus::{
    CorpusError, CorpusFetcher, CorpusKind, FetchOutcome, LogSink, assemble_ordered,
    persist_per_index,
};
use tracing::warn;

use crate::cli::{ProvArgs, SourceArgs, TranslationArgs};
use crate::client::{CliError, CliResult, StoreSettings};
use crate::output::{FetchTally, corpus_summary, persist_summary};

fn corpus_failure(err: &CorpusError) -> CliError {
    CliError::failure(anyhow!(err.detail()))
}

async fn download(
    settings: &StoreSettings,
    source: &SourceArgs,
    kind: CorpusKind,
) -> CliResult<Vec<FetchOutcome>> {
    let range = source.selection_range()?;
    let store = settings.open(&source.bucket)?;
    if range.is_empty() {
        warn!(%range, "selection range is empty; nothing will be downloaded");
    }

    let fetcher = CorpusFetcher::new(store, Arc::new(LogSink));
    fetcher
        .fetch_all(&source.listing_prefix(), &kind.suffix_filter(), range)
        .await
        .map_err(|err| corpus_failure(&err))
}

/// Download provenance documents into `<directory>/<index>.json`.
pub(crate) async fn handle_prov(settings: &StoreSettings, args: ProvArgs) -> CliResult<()> {
    let kind = CorpusKind::Provenance;
    let outcomes = download(settings, &args.source, kind).await?;
    let summary = persist_per_index(&outcomes, &args.directory, kind.extension())
        .map_err(|err| corpus_failure(&err))?;
    println!("{}", persist_summary(&args.directory, &summary));
    Ok(())
}

/// Download translations and write them as one ordered corpus file.
pub(crate) async fn handle_translations(
    settings: &StoreSettings,
    args: TranslationArgs,
) -> CliResult<()> {
    let outcomes = download(settings, &args.source, CorpusKind::Translation).await?;
    let corpus = assemble_ordered(&outcomes, args.size);
    corpus
        .write_to(&args.output)
        .map_err(|err| corpus_failure(&err))?;
    println!(
        "{}",
        corpus_summary(&args.output, &corpus, FetchTally::from_outcomes(&outcomes))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::fs;

    use crate::cli::DEFAULT_RANGE;

    const LISTING: &str = "/storage/v1/b/corpus/o";

    fn settings(server: &MockServer) -> StoreSettings {
        StoreSettings {
            endpoint: server.base_url(),
            token: None,
            timeout_secs: 5,
        }
    }

    fn source(prefix: &str, range: [u64; 2]) -> SourceArgs {
        SourceArgs {
            bucket: "corpus".to_string(),
            prefix: prefix.to_string(),
            range: range.to_vec(),
        }
    }

    fn object_path(key: &str) -> String {
        format!("{LISTING}/{}", key.replace('/', "%2F"))
    }

    fn mock_listing(server: &MockServer, prefix: &str, names: &[&str]) {
        let items: Vec<_> = names.iter().map(|name| json!({ "name": name })).collect();
        let prefix = prefix.to_string();
        server.mock(move |when, then| {
            when.method(GET).path(LISTING).query_param("prefix", prefix);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "items": items }));
        });
    }

    #[tokio::test]
    async fn translations_assemble_an_ordered_corpus_despite_failures() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_listing(
            &server,
            "en/",
            &[
                "en/1/translation.txt",
                "en/2/translation.txt",
                "en/5/translation.txt",
                "en/7/translation.txt",
                "en/3/prov.json",
                "en/draft/translation.txt",
            ],
        );
        let first = server.mock(|when, then| {
            when.method(GET)
                .path(object_path("en/1/translation.txt"))
                .query_param("alt", "media");
            then.status(200).body("a");
        });
        let broken = server.mock(|when, then| {
            when.method(GET).path(object_path("en/2/translation.txt"));
            then.status(500);
        });
        let fifth = server.mock(|when, then| {
            when.method(GET).path(object_path("en/5/translation.txt"));
            then.status(200).body("c");
        });
        let out_of_range = server.mock(|when, then| {
            when.method(GET).path(object_path("en/7/translation.txt"));
            then.status(200).body("never");
        });
        let provenance = server.mock(|when, then| {
            when.method(GET).path(object_path("en/3/prov.json"));
            then.status(200).body("{}");
        });

        let temp = tempfile::tempdir()?;
        let output = temp.path().join("nested").join("corpus.txt");
        handle_translations(
            &settings(&server),
            TranslationArgs {
                source: source("en", [1, 5]),
                size: 5,
                output: output.clone(),
            },
        )
        .await
        .map_err(|err| anyhow!(err.display_message()))?;

        assert_eq!(fs::read_to_string(&output)?, "a\n\n\n\nc\n");
        first.assert();
        broken.assert();
        fifth.assert();
        out_of_range.assert_hits(0);
        provenance.assert_hits(0);
        Ok(())
    }

    #[tokio::test]
    async fn prov_writes_one_file_per_index() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_listing(&server, "de/", &["de/4/prov.json", "de/9/prov.json"]);
        server.mock(|when, then| {
            when.method(GET).path(object_path("de/4/prov.json"));
            then.status(200).body(r#"{"entity": {}}"#);
        });
        server.mock(|when, then| {
            when.method(GET).path(object_path("de/9/prov.json"));
            then.status(404);
        });

        let temp = tempfile::tempdir()?;
        let directory = temp.path().join("prov-json");
        handle_prov(
            &settings(&server),
            ProvArgs {
                source: source("de/", DEFAULT_RANGE),
                directory: directory.clone(),
            },
        )
        .await
        .map_err(|err| anyhow!(err.display_message()))?;

        assert_eq!(
            fs::read_to_string(directory.join("4.json"))?,
            r#"{"entity": {}}"#
        );
        assert!(!directory.join("9.json").exists());
        Ok(())
    }

    #[tokio::test]
    async fn listing_failure_aborts_with_failure_exit_code() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(LISTING);
            then.status(403);
        });

        let temp = tempfile::tempdir()?;
        let output = temp.path().join("corpus.txt");
        let err = handle_translations(
            &settings(&server),
            TranslationArgs {
                source: source("en", DEFAULT_RANGE),
                size: 3,
                output: output.clone(),
            },
        )
        .await
        .err()
        .ok_or_else(|| anyhow!("expected listing failure"))?;

        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("HTTP 403"));
        assert!(!output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn empty_range_writes_a_blank_corpus() -> Result<()> {
        let server = MockServer::start_async().await;
        mock_listing(&server, "en/", &["en/1/translation.txt"]);
        let fetch = server.mock(|when, then| {
            when.method(GET).path(object_path("en/1/translation.txt"));
            then.status(200).body("a");
        });

        let temp = tempfile::tempdir()?;
        let output = temp.path().join("corpus.txt");
        handle_translations(
            &settings(&server),
            TranslationArgs {
                source: source("en", [5, 1]),
                size: 2,
                output: output.clone(),
            },
        )
        .await
        .map_err(|err| anyhow!(err.display_message()))?;

        assert_eq!(fs::read_to_string(&output)?, "\n\n");
        fetch.assert_hits(0);
        Ok(())
    }
}
