use anyhow::{bail, Context, Result};
use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, InterleavedPcm, MonoPcm, Quality};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Trailing silence added to every clip. Flashcard players clip the last
/// fraction of a second of short recordings.
pub const TRAILING_SILENCE_MS: u32 = 1000;

/// Decoded interleaved 16-bit PCM.
#[derive(Debug, Clone, PartialEq)]
pub struct Pcm {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Pcm {
    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration_ms(&self) -> f64 {
        self.frames() as f64 * 1000.0 / self.sample_rate as f64
    }

    pub fn append_silence(&mut self, ms: u32) {
        let frames = (self.sample_rate as u64 * ms as u64 / 1000) as usize;
        let total = self.samples.len() + frames * self.channels as usize;
        self.samples.resize(total, 0);
    }
}

/// Decode an MP3 clip to PCM.
pub fn decode_mp3(bytes: &[u8]) -> Result<Pcm> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .context("Unrecognized audio format")?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio track")?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Unsupported codec")?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(e) => return Err(e).context("Failed to read audio packet"),
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = Some(spec.rate);
                channels = Some(spec.channels.count());
                let mut buf = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buf.samples());
            }
            // A corrupt frame loses a few milliseconds, not the clip
            Err(SymphoniaError::DecodeError(msg)) => {
                tracing::debug!(error = msg, "Skipping undecodable frame");
            }
            Err(e) => return Err(e).context("Failed to decode audio"),
        }
    }

    if samples.is_empty() {
        bail!("No audio frames decoded");
    }

    Ok(Pcm {
        samples,
        sample_rate: sample_rate.context("Unknown sample rate")?,
        channels: channels.context("Unknown channel layout")? as u16,
    })
}

/// Encode PCM as a constant-bitrate MP3.
pub fn encode_mp3(pcm: &Pcm) -> Result<Vec<u8>> {
    let mut builder = Builder::new().context("Failed to create LAME encoder")?;
    builder
        .set_num_channels(pcm.channels as u8)
        .map_err(|e| anyhow::anyhow!("Unsupported channel count {}: {e:?}", pcm.channels))?;
    builder
        .set_sample_rate(pcm.sample_rate)
        .map_err(|e| anyhow::anyhow!("Unsupported sample rate {}: {e:?}", pcm.sample_rate))?;
    builder
        .set_brate(Bitrate::Kbps128)
        .map_err(|e| anyhow::anyhow!("Failed to set bitrate: {e:?}"))?;
    builder
        .set_quality(Quality::Good)
        .map_err(|e| anyhow::anyhow!("Failed to set quality: {e:?}"))?;
    let mut encoder = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize LAME encoder: {e:?}"))?;

    let mut out = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(pcm.samples.len()));
    match pcm.channels {
        1 => encoder.encode_to_vec(MonoPcm(pcm.samples.as_slice()), &mut out),
        2 => encoder.encode_to_vec(InterleavedPcm(pcm.samples.as_slice()), &mut out),
        n => bail!("Cannot encode {n}-channel audio"),
    }
    .map_err(|e| anyhow::anyhow!("Failed to encode MP3: {e:?}"))?;

    // Flushing writes at most one final block of 7200 bytes
    out.reserve(7200);
    encoder
        .flush_to_vec::<FlushNoGap>(&mut out)
        .map_err(|e| anyhow::anyhow!("Failed to flush MP3 encoder: {e:?}"))?;

    Ok(out)
}

/// Decode, append `silence_ms` of silence, and re-encode.
pub fn pad_mp3(bytes: &[u8], silence_ms: u32) -> Result<Vec<u8>> {
    let mut pcm = decode_mp3(bytes)?;
    let before = pcm.duration_ms();
    pcm.append_silence(silence_ms);
    tracing::debug!(
        before_ms = format!("{before:.0}"),
        after_ms = format!("{:.0}", pcm.duration_ms()),
        rate = pcm.sample_rate,
        channels = pcm.channels,
        "Padded clip"
    );
    encode_mp3(&pcm)
}

/// Pad an MP3 file on disk, overwriting it in place.
pub fn pad_file(path: &Path, silence_ms: u32) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let padded = pad_mp3(&bytes, silence_ms)
        .with_context(|| format!("Failed to pad {}", path.display()))?;
    fs::write(path, &padded).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
