//! Tarjama - Spoken audio to translated subtitles
//!
//! Pipeline: extract a video's audio track with ffmpeg, transcribe it with
//! whisper (which also detects the spoken language), translate each segment
//! with a MarianMT model for the detected pair, and serialize the result as
//! an SRT subtitle file.

pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod subtitle;
pub mod transcribe;
pub mod transcript;
pub mod translate;
pub mod workflow;
