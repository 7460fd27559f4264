use std::io::{Cursor, Write};

pub const HEADER_LEN: usize = 44;

pub const DEFAULT_SAMPLE_RATE: u32 = 24000;
pub const DEFAULT_CHANNELS: u16 = 1;
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

const PCM_MIME_TYPES: &[&str] = &["audio/l16", "audio/pcm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for PcmSpec {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
        }
    }
}

impl PcmSpec {
    fn block_align(self) -> u16 {
        self.channels.saturating_mul(self.bits_per_sample) / 8
    }

    fn checked_byte_rate(self) -> Option<u32> {
        self.sample_rate.checked_mul(u32::from(self.block_align()))
    }

    fn byte_rate(self) -> u32 {
        self.checked_byte_rate().unwrap_or(u32::MAX)
    }

    /// Classifies a provider mime type such as `audio/L16;codec=pcm;rate=24000`.
    ///
    /// Returns `None` when the payload is already a container format. A `rate`
    /// parameter overrides the default sample rate unless it is zero or too
    /// large for the header's byte rate field.
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        let mut params = mime_type.split(';').map(str::trim);

        let essence = params.next()?.to_ascii_lowercase();
        if !PCM_MIME_TYPES.contains(&essence.as_str()) {
            return None;
        }

        let mut spec = Self::default();

        for param in params {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };

            if key.trim().eq_ignore_ascii_case("rate") {
                let candidate = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|&rate| rate > 0)
                    .map(|sample_rate| PcmSpec { sample_rate, ..spec })
                    .filter(|s| s.checked_byte_rate().is_some());

                if let Some(candidate) = candidate {
                    spec = candidate;
                }
            }
        }

        Some(spec)
    }
}

fn write_header<W: Write>(w: &mut W, spec: PcmSpec, data_size: u32) -> std::io::Result<()> {
    // RIFF chunk
    w.write_all(b"RIFF")?;
    w.write_all(&data_size.saturating_add(36).to_le_bytes())?;
    w.write_all(b"WAVE")?;

    // fmt sub-chunk
    w.write_all(b"fmt ")?;
    w.write_all(&16u32.to_le_bytes())?;
    w.write_all(&1u16.to_le_bytes())?;
    w.write_all(&spec.channels.to_le_bytes())?;
    w.write_all(&spec.sample_rate.to_le_bytes())?;
    w.write_all(&spec.byte_rate().to_le_bytes())?;
    w.write_all(&spec.block_align().to_le_bytes())?;
    w.write_all(&spec.bits_per_sample.to_le_bytes())?;

    // data sub-chunk
    w.write_all(b"data")?;
    w.write_all(&data_size.to_le_bytes())?;

    Ok(())
}

/// Prefixes raw PCM with a 44-byte RIFF/WAVE header. The samples are copied
/// unmodified.
///
/// RIFF sizes are 32-bit: past 4 GiB the size fields saturate at `u32::MAX`.
pub fn pcm_to_wav(pcm: &[u8], spec: PcmSpec) -> Vec<u8> {
    let mut wav = Cursor::new(Vec::with_capacity(HEADER_LEN + pcm.len()));
    let data_size = u32::try_from(pcm.len()).unwrap_or(u32::MAX);

    // Writes into a Vec cannot fail.
    let _: std::io::Result<()> =
        write_header(&mut wav, spec, data_size).and_then(|()| wav.write_all(pcm));

    wav.into_inner()
}
