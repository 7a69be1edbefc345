//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了批量导入命令的实现。

use super::{read_file, user_facing, ImportArgs};
use crate::dto::CandidateRequest;
use crate::manager::ServiceManager;
use crate::metrics::get_metrics_string;
use crate::model::CandidateInput;
use crate::validation::validate;
use anyhow::{bail, Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

pub async fn execute(manager: &ServiceManager, args: &ImportArgs) -> Result<()> {
    let body = read_file(&args.file).await?;
    let requests: Vec<CandidateRequest> =
        serde_json::from_str(&body).context("Import file must be a JSON array of candidates")?;
    let total = requests.len();

    let service = manager.service().clone();
    let results: Vec<(usize, Result<()>)> = stream::iter(requests.into_iter().enumerate())
        .map(|(index, request)| {
            let service = service.clone();
            async move {
                let input = CandidateInput::from(request);
                let outcome = match validate(&input) {
                    Ok(()) => service
                        .add_or_update(&input)
                        .await
                        .map(|_| ())
                        .map_err(user_facing),
                    Err(err) => Err(user_facing(err)),
                };
                (index, outcome)
            }
        })
        .buffer_unordered(args.concurrency.max(1))
        .collect()
        .await;

    let mut failed = 0;
    for (index, outcome) in results {
        if let Err(err) = outcome {
            failed += 1;
            warn!("import entry {} failed", index);
            eprintln!("entry {}: {}", index, err);
        }
    }

    info!("import finished: total={}, failed={}", total, failed);
    println!("Imported {} of {} candidates", total - failed, total);

    if args.metrics {
        print!("{}", get_metrics_string());
    }

    if failed > 0 {
        bail!("{} of {} candidates failed", failed, total);
    }
    Ok(())
}
