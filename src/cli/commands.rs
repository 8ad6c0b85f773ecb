use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::narrator::{run_server, HttpTextGenerator};
use crate::processors::{BatchProcessor, RecordTransformer};
use crate::producer::Ingestor;
use crate::readers::MeasurementReader;
use crate::stream::SpoolStream;
use crate::utils::progress::ProgressReporter;
use crate::writers::FsBlobStore;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Ingest {
            input,
            data_dir,
            stream_name,
            delay_seconds,
            limit,
            mmap,
        } => {
            let mut config = PipelineConfig::load()?;
            if let Some(stream_name) = stream_name {
                config.stream_name = stream_name;
            }
            if let Some(delay_seconds) = delay_seconds {
                config.batch_delay_seconds = delay_seconds;
            }

            info!(
                stream = %config.stream_name,
                region = %config.region,
                "ingesting measurements"
            );
            println!("Streaming measurements from {}", input.display());

            let reader = MeasurementReader::with_mmap(mmap);
            let mut records = reader.read_measurements(&input)?;
            if let Some(limit) = limit {
                records.truncate(limit);
            }

            let spool = SpoolStream::open(&data_dir, &config.stream_name)?;
            let progress =
                ProgressReporter::new(records.len() as u64, "Sending records...", false);

            let mut ingestor = Ingestor::new(spool, config.batch_delay());
            let summary = ingestor.ingest_records(&records, Some(&progress)).await?;

            progress.finish_with_message(&format!("Sent {} records", summary.rows_sent));
            println!(
                "Ingest complete: {} records on stream '{}' ({})",
                summary.rows_sent,
                config.stream_name,
                ingestor.into_stream().path().display()
            );
        }

        Commands::Transform {
            data_dir,
            stream_name,
            bucket,
            limit,
        } => {
            let mut config = PipelineConfig::load()?;
            if let Some(stream_name) = stream_name {
                config.stream_name = stream_name;
            }
            if let Some(bucket) = bucket {
                config.bucket_name = bucket;
            }

            info!(
                stream = %config.stream_name,
                bucket = %config.bucket_name,
                region = %config.region,
                "transforming stream events"
            );

            let spool = SpoolStream::open(&data_dir, &config.stream_name)?;
            let mut events = spool.read_events()?;
            if let Some(limit) = limit {
                events.truncate(limit);
            }

            if events.is_empty() {
                println!("No events to process");
                return Ok(());
            }

            let progress = ProgressReporter::new_spinner(
                &format!("Processing {} stream events...", events.len()),
                false,
            );

            let store = FsBlobStore::open(data_dir.join(&config.bucket_name))?;
            let processor = BatchProcessor::new(&store);
            let summary = processor.process_batch(&events);

            progress.finish_with_message(&format!(
                "Processed {} events into {}",
                summary.total,
                store.root().display()
            ));
            println!("\n{}", summary.generate_summary());
        }

        Commands::Validate { input } => {
            println!("Validating measurements in {}", input.display());

            let reader = MeasurementReader::new();
            let records = reader
                .stream_measurements(&input)?
                .collect::<Result<Vec<_>>>()?;

            let transformer = RecordTransformer::new();
            let report = transformer.check_records(&records);

            println!("\n{}", report.generate_summary());

            if report.is_clean() {
                println!("✅ All records passed validation checks");
            } else {
                println!("⚠️  Found {} validation issues", report.issues.len());
            }
        }

        Commands::Serve {
            host,
            port,
            workers,
            model_endpoint,
            max_new_tokens,
        } => {
            println!("Serving lake summaries on {}:{}", host, port);
            println!("Model endpoint: {}", model_endpoint);

            let generator =
                HttpTextGenerator::new(model_endpoint).with_max_new_tokens(max_new_tokens);

            run_server(&host, port, workers, Arc::new(generator)).await?;
        }
    }

    Ok(())
}
