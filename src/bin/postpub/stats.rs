use anyhow::Result;

use postpub::config::Config;
use postpub::post_store::{PostStore, StoreConfig};
use postpub::stats::IndexStats;

pub fn stats_cmd(config: &Config) -> Result<()> {
    let store = PostStore::new(StoreConfig::from(&config.paths));
    if !store.config().index_file.exists() {
        println!("Index file {} does not exist yet", store.config().index_file.display());
        return Ok(());
    }

    let entries = store.load_index();
    print!("{}", IndexStats::from_entries(&entries));
    Ok(())
}
