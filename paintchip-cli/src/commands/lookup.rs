//! Lookup table and metadata query commands.

use std::borrow::Cow;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use paintchip_lib::MetadataService;
use paintchip_lib::lookup::build_lookup;
use paintchip_lib::lookup::write_lookup;
use paintchip_lib::metric::project;
use paintchip_lib::model::ColorMetadata;
use paintchip_lib::model::RawCatalogColor;

use crate::BuildLookupArgs;
use crate::GlobalArgs;
use crate::LookupArgs;
use crate::PointsArgs;
use crate::paths;

/// Computes metadata for every downloaded color and writes the lookup table.
pub async fn run_build(args: BuildLookupArgs) -> Result<()> {
    let colors_path = paths::resolve(args.colors, paths::colors_file, "colors archive")?;
    let out_path = paths::resolve(args.out, paths::lookup_file, "lookup table")?;

    let bytes = tokio::fs::read(&colors_path)
        .await
        .with_context(|| format!("Failed to read {}", colors_path.display()))?;
    let colors: Vec<RawCatalogColor> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Malformed colors archive {}", colors_path.display()))?;

    let table = build_lookup(&colors).context("Failed to compute color metadata")?;

    super::ensure_parent(&out_path)?;
    write_lookup(&out_path, &table)
        .await
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    println!("Wrote {} colors to {}", table.len(), out_path.display());
    Ok(())
}

/// Prints metadata for each code as a JSON array.
///
/// Unknown codes are reported on stderr and left out of the array.
pub async fn run_lookup(args: LookupArgs, global: &GlobalArgs) -> Result<()> {
    let service = metadata_service(args.table, global).await?;
    let found = resolve_codes(&service, &args.codes).await?;

    let json = serde_json::to_string_pretty(&found)?;
    println!("{}", json);
    Ok(())
}

/// Prints `number,name,hex,x,y` rows for each code.
///
/// Without codes every color in the lookup table is printed.
pub async fn run_points(args: PointsArgs, global: &GlobalArgs) -> Result<()> {
    let service = metadata_service(args.table, global).await?;

    let colors = if args.codes.is_empty() {
        let table = service.lookup().colors().await.context("Failed to load the lookup table")?;
        if table.is_empty() {
            log::warn!("The lookup table is empty; run build-lookup or pass codes");
        }
        table.to_vec()
    } else {
        resolve_codes(&service, &args.codes).await?
    };

    println!("number,name,hex,x,y");
    for point in project(&colors, args.x, args.y) {
        println!(
            "{},{},{},{},{}",
            csv_field(&point.number),
            csv_field(&point.name),
            csv_field(&point.hex),
            point.x,
            point.y
        );
    }
    Ok(())
}

async fn metadata_service(table: Option<String>, global: &GlobalArgs) -> Result<MetadataService> {
    let client = super::catalog_client(global, true).await?;
    let lookup = super::lookup_table(table, &client);
    Ok(MetadataService::new(client, Arc::new(lookup)))
}

async fn resolve_codes(service: &MetadataService, codes: &[String]) -> Result<Vec<ColorMetadata>> {
    let mut found = Vec::with_capacity(codes.len());
    for code in codes {
        match service
            .get_color_metadata(code)
            .await
            .with_context(|| format!("Failed to look up {}", code))?
        {
            Some(metadata) => found.push(metadata),
            None => eprintln!("Unknown color code: {}", code),
        }
    }
    Ok(found)
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
