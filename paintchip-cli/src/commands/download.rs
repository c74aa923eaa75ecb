//! Range download command.

use anyhow::Context;
use anyhow::Result;
use paintchip_lib::download::ColorArchive;
use paintchip_lib::download::RangeDownloader;
use paintchip_lib::download::sw_code;

use crate::DownloadArgs;
use crate::GlobalArgs;
use crate::paths;

/// Downloads `min..=max` into the archive and saves it.
///
/// Codes already in the archive are not requested again, so an interrupted
/// download can be resumed by running the same command.
pub async fn run(args: DownloadArgs, global: &GlobalArgs) -> Result<()> {
    if args.min > args.max {
        anyhow::bail!("Empty range: {} > {}", args.min, args.max);
    }

    let colors_path = paths::resolve(args.colors, paths::colors_file, "colors archive")?;
    let invalid_path = paths::resolve(args.invalid, paths::invalid_codes_file, "invalid codes archive")?;

    let mut archive = ColorArchive::load(&colors_path, &invalid_path)
        .await
        .context("Failed to load the download archive")?;
    log::info!(
        "Archive has {} colors and {} invalid codes",
        archive.colors().len(),
        archive.invalid_codes().len()
    );

    let client = super::catalog_client(global, false).await?;
    let summary = RangeDownloader::new(client)
        .run(args.min, args.max, &mut archive, |code, archive| {
            println!(
                "{}: {} colors, {} invalid",
                sw_code(code),
                archive.colors().len(),
                archive.invalid_codes().len()
            );
        })
        .await;

    super::ensure_parent(&colors_path)?;
    super::ensure_parent(&invalid_path)?;
    archive
        .save(&colors_path, &invalid_path)
        .await
        .context("Failed to save the download archive")?;

    println!(
        "Downloaded {}, invalid {}, skipped {}, failed {}",
        summary.downloaded, summary.invalid, summary.skipped, summary.failed
    );
    if summary.failed > 0 {
        log::warn!("{} codes could not be fetched; rerun to retry them", summary.failed);
    }
    Ok(())
}
