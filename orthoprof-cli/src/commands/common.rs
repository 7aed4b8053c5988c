//! Arguments and helpers shared by the profile commands

use crate::config::CliConfig;
use crate::input::FileReader;
use crate::output::open_output;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use orthoprof_core::{
    write_table, Delimiter, OpenInventory, ProcessedProfile, ProcessingConfig, Profile,
    ProfileProcessor, SoundInventory, SoundValidator, Wordlist,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Options common to every command that reads a profile
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Orthographic profile to process
    #[arg(value_name = "PROFILE")]
    pub profile: PathBuf,

    /// Name of the grapheme column
    #[arg(long, value_name = "COLUMN")]
    pub grapheme: Option<String>,

    /// Name of the transcription column
    #[arg(long, value_name = "COLUMN")]
    pub ipa: Option<String>,

    /// Name of the wordlist form column
    #[arg(long, value_name = "COLUMN")]
    pub form: Option<String>,

    /// Name of the wordlist language column
    #[arg(long = "lang-id", value_name = "COLUMN")]
    pub lang_id: Option<String>,

    /// Wordlist is comma-delimited
    #[arg(long)]
    pub csv: bool,

    /// Profile is comma-delimited
    #[arg(long = "profile-csv")]
    pub profile_csv: bool,

    /// Only collect wordlist rows whose language is the profile file stem
    #[arg(long)]
    pub multilang: bool,

    /// Disable NFC normalization
    #[arg(long)]
    pub nonfc: bool,

    /// Do not wrap forms in boundary sentinels
    #[arg(long)]
    pub nobound: bool,

    /// Keep zero-frequency rules in the output
    #[arg(long)]
    pub keepzero: bool,

    /// Sound inventory (GRAPHEME, TYPE, SOUND_CLASS and ALIASES columns)
    #[arg(long, value_name = "FILE", env = "ORTHOPROF_INVENTORY")]
    pub inventory: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable parallel collection and trimming
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Suppress logging and progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Wordlist and output files of the format and trim commands
#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// Wordlist used to collect rule frequencies
    #[arg(long = "wl", value_name = "FILE")]
    pub wordlist: Option<PathBuf>,

    /// Write the wordlist with the segmentation of every form appended
    #[arg(long = "debug-wl", value_name = "FILE", requires = "wordlist")]
    pub debug_wordlist: Option<PathBuf>,

    /// Output profile (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Which pipeline a command runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Clean, check, collect and sort
    Format,
    /// Check, trim and collect
    Trim,
}

impl ProfileArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }

    /// Configuration file contents, or defaults when none was given
    pub fn load_config(&self) -> Result<CliConfig> {
        match &self.config {
            Some(path) => CliConfig::from_file(path),
            None => Ok(CliConfig::default()),
        }
    }

    /// Processing configuration: the file first, then the flags
    pub fn processing_config(&self, file: &CliConfig) -> Result<ProcessingConfig> {
        let mut config = file.processing_config();

        if let Some(column) = &self.grapheme {
            config.profile_columns.grapheme = column.clone();
        }
        if let Some(column) = &self.ipa {
            config.profile_columns.transcription = column.clone();
        }
        if let Some(column) = &self.form {
            config.form_column = column.clone();
        }
        if let Some(column) = &self.lang_id {
            config.language_column = column.clone();
        }
        if self.csv {
            config.wordlist_delimiter = Delimiter::Comma;
        }
        if self.profile_csv {
            config.profile_delimiter = Delimiter::Comma;
        }
        if self.nonfc {
            config.normalize = false;
        }
        if self.nobound {
            config.boundaries = false;
        }
        if self.keepzero {
            config.keep_zero = true;
        }
        if self.no_parallel {
            config.parallel = false;
        }
        if self.multilang {
            config.language = Some(FileReader::stem(&self.profile)?);
        }

        log::debug!("Processing configuration: {:?}", config);
        Ok(config)
    }

    /// Sound inventory from the flag or the configuration file; every sound is
    /// accepted when neither names one
    pub fn validator(&self, file: &CliConfig) -> Result<Box<dyn SoundValidator>> {
        let path = self.inventory.as_ref().or(file.inventory.path.as_ref());
        match path {
            Some(path) => {
                FileReader::require_file(path)?;
                let inventory = SoundInventory::from_path(path)
                    .with_context(|| format!("Failed to load inventory: {}", path.display()))?;
                log::info!("Loaded {} sounds from {}", inventory.len(), path.display());
                Ok(Box::new(inventory))
            }
            None => Ok(Box::new(OpenInventory)),
        }
    }

    /// Read the profile named on the command line
    pub fn read_profile(&self, config: &ProcessingConfig) -> Result<Profile> {
        FileReader::require_file(&self.profile)?;
        let profile = Profile::read_path(&self.profile, &config.read_options())
            .with_context(|| format!("Failed to read profile: {}", self.profile.display()))?;
        log::info!(
            "Read {} rules from {}",
            profile.len(),
            self.profile.display()
        );
        Ok(profile)
    }
}

/// Run `pipeline` and write its outputs
pub fn run_pipeline(args: &ProfileArgs, files: &PipelineArgs, pipeline: Pipeline) -> Result<()> {
    args.init_logging();
    let file_config = args.load_config()?;
    let config = args.processing_config(&file_config)?;
    let validator = args.validator(&file_config)?;
    let profile = args.read_profile(&config)?;
    let wordlist = files
        .wordlist
        .as_deref()
        .map(|path| read_wordlist(path, &config))
        .transpose()?;

    let processor = ProfileProcessor::new(config.clone(), validator.as_ref())
        .audit(files.debug_wordlist.is_some());
    let progress = ProgressReporter::new(args.quiet);
    let result = match pipeline {
        Pipeline::Format => processor.format(&profile, wordlist.as_ref(), &progress),
        Pipeline::Trim => processor.trim(&profile, wordlist.as_ref(), &progress),
    };

    write_profile(&result, validator.as_ref(), &config, files.output.as_deref())?;
    if let (Some(path), Some(wordlist)) = (files.debug_wordlist.as_deref(), wordlist.as_ref()) {
        write_debug_wordlist(&result, wordlist, &config, path)?;
    }
    Ok(())
}

fn read_wordlist(path: &Path, config: &ProcessingConfig) -> Result<Wordlist> {
    FileReader::require_file(path)?;
    let wordlist = Wordlist::read_path(path, &config.wordlist_options())
        .with_context(|| format!("Failed to read wordlist: {}", path.display()))?;
    log::info!("Read {} forms from {}", wordlist.len(), path.display());
    Ok(wordlist)
}

fn write_profile(
    result: &ProcessedProfile,
    validator: &dyn SoundValidator,
    config: &ProcessingConfig,
    output: Option<&Path>,
) -> Result<()> {
    let mut writer = open_output(output)?;
    let written = write_table(&result.table, validator, &config.write_options(), &mut writer)
        .context("Failed to write profile")?;
    writer.flush()?;
    log::info!("Wrote {} rules", written);
    Ok(())
}

fn write_debug_wordlist(
    result: &ProcessedProfile,
    wordlist: &Wordlist,
    config: &ProcessingConfig,
    path: &Path,
) -> Result<()> {
    let Some(collection) = &result.collection else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create debug wordlist: {}", path.display()))?;
    wordlist
        .write_segmented(&collection.traces, config.wordlist_delimiter, BufWriter::new(file))
        .with_context(|| format!("Failed to write debug wordlist: {}", path.display()))?;
    log::info!("Wrote debug wordlist to {}", path.display());
    Ok(())
}
