//! Lookup cache commands.

use anyhow::Context;
use anyhow::Result;
use paintchip_lib::cache::CacheLookup;
use paintchip_lib::cache::ColorCache;

use crate::CacheCommands;
use crate::GlobalArgs;

pub async fn run(command: CacheCommands, global: &GlobalArgs) -> Result<()> {
    let cache = ColorCache::from_provider(super::open_cache(global).await?);

    match command {
        CacheCommands::List => {
            for code in cache.cached_codes().await.context("Failed to list cached codes")? {
                match cache.read(&code).await {
                    Ok(CacheLookup::Hit(color)) => println!("{}\t{}\t{}", code, color.hex, color.name),
                    Ok(CacheLookup::InvalidCode) => println!("{}\t(invalid)", code),
                    Ok(CacheLookup::Miss) => {}
                    Err(e) => println!("{}\t(unreadable: {})", code, e),
                }
            }
        }
        CacheCommands::Forget { code } => {
            cache
                .forget(&code)
                .await
                .with_context(|| format!("Failed to forget {}", code))?;
            println!("Forgot {}", code.to_uppercase());
        }
    }
    Ok(())
}
