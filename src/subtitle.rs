use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::{Result, TarjamaError};
use crate::transcript::TranslatedSegment;

/// One parsed caption block: index, time range, text.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleBlock {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Generate an SRT file from translated segments.
///
/// Blocks are numbered sequentially from 1 with no gaps, regardless of which
/// source segments carried empty text. Overwrites the destination.
pub async fn generate_srt<P: AsRef<Path>>(
    segments: &[TranslatedSegment],
    output_path: P,
) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Generating SRT file: {}", output_path.display());

    let mut srt_content = String::new();

    for (index, segment) in segments.iter().enumerate() {
        let start_time = format_srt_time(segment.start);
        let end_time = format_srt_time(segment.end);

        srt_content.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            start_time,
            end_time,
            segment.translated_text
        ));
    }

    fs::write(output_path, srt_content)
        .await
        .map_err(|e| TarjamaError::Serialization(format!(
            "Failed to write {}: {}",
            output_path.display(),
            e
        )))?;

    info!("SRT file generated with {} blocks", segments.len());
    Ok(())
}

/// Parse an SRT file back into caption blocks.
///
/// Tolerates a trailing blank line and multi-line caption text; an empty text
/// line is preserved as an empty string.
pub async fn parse_srt<P: AsRef<Path>>(path: P) -> Result<Vec<SubtitleBlock>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| TarjamaError::Serialization(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        )))?;

    let mut blocks = Vec::new();

    for raw_block in content.split("\n\n") {
        // A block whose text is empty ends in an extra newline, which leaves
        // a leading newline on the block that follows the split.
        let raw_block = raw_block.trim_matches('\n');
        if raw_block.trim().is_empty() {
            continue;
        }

        let mut lines = raw_block.lines();
        let index_line = lines
            .next()
            .ok_or_else(|| TarjamaError::Serialization("Empty caption block".to_string()))?;
        let index: usize = index_line.trim().parse().map_err(|_| {
            TarjamaError::Serialization(format!("Invalid caption index: {}", index_line))
        })?;

        let time_line = lines.next().ok_or_else(|| {
            TarjamaError::Serialization(format!("Caption {} missing time range", index))
        })?;
        let (start, end) = parse_time_range(time_line)?;

        let text = lines.collect::<Vec<_>>().join("\n");

        blocks.push(SubtitleBlock {
            index,
            start,
            end,
            text,
        });
    }

    Ok(blocks)
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm).
///
/// Milliseconds are truncated, not rounded. Hours widen past 99 rather than
/// wrapping.
pub fn format_srt_time(seconds: f64) -> String {
    let total_milliseconds = (seconds * 1000.0) as u64;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

fn parse_time_range(line: &str) -> Result<(f64, f64)> {
    let mut parts = line.split(" --> ");
    let start = parts
        .next()
        .map(parse_srt_time)
        .transpose()?
        .ok_or_else(|| TarjamaError::Serialization(format!("Invalid time range: {}", line)))?;
    let end = parts
        .next()
        .map(parse_srt_time)
        .transpose()?
        .ok_or_else(|| TarjamaError::Serialization(format!("Invalid time range: {}", line)))?;
    Ok((start, end))
}

fn parse_srt_time(ts: &str) -> Result<f64> {
    let invalid = || TarjamaError::Serialization(format!("Invalid timestamp: {}", ts));

    let (hms, millis) = ts.trim().split_once(',').ok_or_else(invalid)?;
    let fields: Vec<&str> = hms.split(':').collect();
    if fields.len() != 3 {
        return Err(invalid());
    }

    let hours: u64 = fields[0].parse().map_err(|_| invalid())?;
    let minutes: u64 = fields[1].parse().map_err(|_| invalid())?;
    let seconds: u64 = fields[2].parse().map_err(|_| invalid())?;
    let millis: u64 = millis.parse().map_err(|_| invalid())?;

    Ok((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64, text: &str) -> TranslatedSegment {
        TranslatedSegment {
            start,
            end,
            original_text: text.to_string(),
            translated_text: text.to_string(),
        }
    }

    #[test]
    fn test_format_srt_time() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(7.123), "00:00:07,123");
        assert_eq!(format_srt_time(65.123), "00:01:05,123");
        assert_eq!(format_srt_time(3661.500), "01:01:01,500");
    }

    #[test]
    fn test_format_srt_time_monotonic() {
        let inputs = [0.0, 0.001, 1.0, 59.999, 60.0, 3599.5, 3600.0, 7300.25];
        let formatted: Vec<String> = inputs.iter().map(|&s| format_srt_time(s)).collect();
        for pair in formatted.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_parse_srt_time() {
        assert_eq!(parse_srt_time("00:00:07,123").unwrap(), 7.123);
        assert_eq!(parse_srt_time("01:01:01,500").unwrap(), 3661.5);
        assert!(parse_srt_time("garbage").is_err());
    }

    #[tokio::test]
    async fn test_generate_and_parse_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.srt");

        let segments = vec![
            segment(0.0, 2.5, "hello"),
            segment(2.5, 5.0, ""),
            segment(5.0, 7.123, "world"),
        ];

        generate_srt(&segments, &path).await.unwrap();
        let blocks = parse_srt(&path).await.unwrap();

        assert_eq!(blocks.len(), 3);
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.index, i + 1);
            assert_eq!(format_srt_time(block.start), format_srt_time(segments[i].start));
            assert_eq!(format_srt_time(block.end), format_srt_time(segments[i].end));
            assert_eq!(block.text, segments[i].translated_text);
        }
    }

    #[tokio::test]
    async fn test_parse_srt_empty_text_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gap.srt");

        // The middle caption carries no text; the block after it must still
        // parse with its own index.
        let content = "1\n00:00:00,000 --> 00:00:02,500\nhello\n\n\
                       2\n00:00:02,500 --> 00:00:05,000\n\n\n\
                       3\n00:00:05,000 --> 00:00:07,123\nworld\n\n";
        tokio::fs::write(&path, content).await.unwrap();

        let blocks = parse_srt(&path).await.unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].index, 2);
        assert_eq!(blocks[1].text, "");
        assert_eq!(blocks[2].index, 3);
        assert_eq!(blocks[2].text, "world");
    }

    #[tokio::test]
    async fn test_generate_srt_block_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.srt");

        generate_srt(&[segment(5.0, 7.123, "caption text")], &path)
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "1\n00:00:05,000 --> 00:00:07,123\ncaption text\n\n");
    }

    #[tokio::test]
    async fn test_generate_srt_invalid_path() {
        let result = generate_srt(&[segment(0.0, 1.0, "x")], "/nonexistent-dir/out.srt").await;
        assert!(matches!(result, Err(TarjamaError::Serialization(_))));
    }
}
