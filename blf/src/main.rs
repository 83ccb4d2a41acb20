use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use blf::config::BLFConfig;
use blf::io::cli::Cli;
use blf::io::output::BLFOutput;
use blf::{EPOCH, io, nest};
use nfp_rs::io::export::export_solution;
use nfp_rs::io::import::Importer;
use nfp_rs::nfp::{JsonLinesNfpStore, NfpStore};

const DEFAULT_NFP_HISTORY: &str = "history/nfp.jsonl";

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let mut config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            BLFConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    let history_path = match args.nfp_history {
        Some(path) => {
            config.nfp_cache.load_history = true;
            config.nfp_cache.store_nfp = true;
            Some(path)
        }
        None if config.nfp_cache.load_history || config.nfp_cache.store_nfp => {
            Some(PathBuf::from(DEFAULT_NFP_HISTORY))
        }
        None => None,
    };

    config.validate()?;
    info!("[MAIN] Successfully parsed BLFConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).context(format!(
            "could not create solution folder: {:?}",
            args.solution_folder
        ))?;
    }

    let ext_instance = io::read_instance(args.input_file.as_path())?;
    let instance = Importer::new(config.poly_simpl).import_instance(&ext_instance)?;
    info!(
        "[MAIN] instance {:?} imported: {} polygons, container {}x{}",
        instance.name,
        instance.polygons.len(),
        instance.container.width,
        instance.container.height
    );

    let store = history_path.map(|path| {
        info!("[MAIN] NFP history at {}", path.display());
        Box::new(JsonLinesNfpStore::new(path)) as Box<dyn NfpStore>
    });

    let solution = nest(&instance, config, store)?;

    let output = BLFOutput {
        instance: ext_instance,
        solution: export_solution(&solution, &instance, *EPOCH),
        config,
    };
    let solution_path = args.solution_folder.join(format!("sol_{input_stem}.json"));
    io::write_json(&output, &solution_path)?;

    Ok(())
}
