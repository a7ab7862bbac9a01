/*
[INPUT]:  Parsed subcommands, a configured client and a shutdown token
[OUTPUT]: JSON documents on stdout
[POS]:    Command layer - drives the client library
[UPDATE]: When adding commands or changing output format
*/

use std::io::Write;

use anyhow::{Context, Result};
use futures_util::StreamExt;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::info;
use verifalia_client::{
    FileSubmissionOptions, Job, ListingDirection, ListingOptions, RetrievalOptions,
    SubmissionOptions, ValidationRequestEntry, VerifaliaClient, WaitingOptions,
};

use crate::args::{Command, SubmissionArgs};

pub async fn execute(
    client: &VerifaliaClient,
    command: Command,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut out = std::io::stdout();
    match command {
        Command::Verify {
            addresses,
            submission,
        } => {
            let entries: Vec<ValidationRequestEntry> =
                addresses.into_iter().map(ValidationRequestEntry::new).collect();
            let options = submission_options(&submission, &shutdown);
            let job = client
                .submit_entries(&entries, &options)
                .await
                .context("submit addresses")?;
            info!(job_id = %job.id(), entries = entries.len(), "job submitted");
            let job = finish(client, job, &submission, &shutdown).await?;
            write_json(&mut out, &job_json(&job))
        }
        Command::VerifyFile {
            path,
            content_type,
            starting_row,
            ending_row,
            column,
            sheet,
            delimiter,
            submission,
        } => {
            let file_options = FileSubmissionOptions {
                content_type: content_type.map(Into::into),
                starting_row,
                ending_row,
                column,
                sheet,
                line_ending: None,
                delimiter,
            };
            let options = submission_options(&submission, &shutdown);
            let job = client
                .submit_file(&path, &file_options, &options)
                .await
                .with_context(|| format!("submit file {}", path.display()))?;
            info!(job_id = %job.id(), "file submitted");
            let job = finish(client, job, &submission, &shutdown).await?;
            write_json(&mut out, &job_json(&job))
        }
        Command::Get { id, wait } => {
            let job = if wait {
                client
                    .wait_for_job(&id, &waiting_options(&shutdown))
                    .await
                    .with_context(|| format!("wait for job {id}"))?
            } else {
                let options = RetrievalOptions {
                    cancellation: Some(shutdown),
                    ..Default::default()
                };
                client
                    .get_job(&id, &options)
                    .await
                    .with_context(|| format!("get job {id}"))?
                    .with_context(|| format!("job {id} not found"))?
            };
            write_json(&mut out, &job_json(&job))
        }
        Command::Delete { id } => {
            client
                .delete_job(&id, Some(shutdown))
                .await
                .with_context(|| format!("delete job {id}"))?;
            info!(job_id = %id, "job deleted");
            write_json(&mut out, &json!({ "deleted": id }))
        }
        Command::List {
            page_size,
            max,
            newest_first,
        } => {
            let options = ListingOptions {
                limit: page_size,
                direction: if newest_first {
                    ListingDirection::Backward
                } else {
                    ListingDirection::Forward
                },
                cancellation: Some(shutdown),
            };
            let jobs = client.list_jobs(options).take(max.unwrap_or(usize::MAX));
            let mut jobs = Box::pin(jobs);
            while let Some(overview) = jobs.next().await {
                let overview = overview.context("list jobs")?;
                writeln!(out, "{}", serde_json::to_string(&overview)?)?;
            }
            Ok(())
        }
        Command::Balance => {
            let balance = client
                .get_balance(Some(shutdown))
                .await
                .context("get credit balance")?;
            write_json(&mut out, &serde_json::to_value(&balance)?)
        }
    }
}

fn submission_options(args: &SubmissionArgs, shutdown: &CancellationToken) -> SubmissionOptions {
    SubmissionOptions {
        name: args.name.clone(),
        quality: args.quality.map(Into::into),
        deduplication: args.deduplication.map(Into::into),
        priority: args.priority,
        cancellation: Some(shutdown.clone()),
        ..Default::default()
    }
}

fn waiting_options(shutdown: &CancellationToken) -> WaitingOptions {
    WaitingOptions {
        cancellation: Some(shutdown.clone()),
        ..Default::default()
    }
}

async fn finish(
    client: &VerifaliaClient,
    job: Job,
    args: &SubmissionArgs,
    shutdown: &CancellationToken,
) -> Result<Job> {
    if args.no_wait {
        return Ok(job);
    }
    let id = job.id().to_string();
    client
        .wait_for_completion(job, &waiting_options(shutdown))
        .await
        .with_context(|| format!("wait for job {id}"))
}

fn job_json(job: &Job) -> Value {
    json!({
        "overview": job.overview,
        "entries": job.entries,
    })
}

fn write_json(out: &mut impl Write, value: &Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::QualityArg;
    use verifalia_client::Quality;

    #[test]
    fn test_submission_options_from_args() {
        let args = SubmissionArgs {
            name: Some("batch".to_string()),
            quality: Some(QualityArg::Extreme),
            priority: Some(255),
            ..Default::default()
        };
        let shutdown = CancellationToken::new();
        let options = submission_options(&args, &shutdown);
        assert_eq!(options.quality, Some(Quality::Extreme));
        assert_eq!(options.priority, Some(255));
        assert!(options.cancellation.is_some());
    }

    #[test]
    fn test_write_json_appends_newline() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"a": 1})).unwrap();
        assert!(String::from_utf8(buffer).unwrap().ends_with("}\n"));
    }
}
