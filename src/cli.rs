use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transcribe and translate a single video file into an SRT subtitle file
    Process {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Target language for translation
        #[arg(short, long, default_value = "ar")]
        target_lang: String,

        /// Whisper model size (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<String>,

        /// Output directory for the subtitle file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Process all video files in a directory
    Batch {
        /// Input directory containing video files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Target language for translation
        #[arg(short, long, default_value = "ar")]
        target_lang: String,

        /// Whisper model size (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<String>,

        /// Output directory for the subtitle files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Extract the audio track from a video file
    Extract {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Transcribe a video to an untranslated SRT file
    Transcribe {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output subtitle file
        #[arg(short, long)]
        output: PathBuf,

        /// Whisper model size (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Translate an existing SRT file to another language
    Translate {
        /// Input subtitle file
        #[arg(short, long)]
        input: PathBuf,

        /// Output subtitle file
        #[arg(short, long)]
        output: PathBuf,

        /// Source language of the subtitle file
        #[arg(short, long)]
        source_lang: String,

        /// Target language for translation
        #[arg(short, long, default_value = "ar")]
        target_lang: String,
    },
}
