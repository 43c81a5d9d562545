use std::sync::Arc;

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, Stream};
use log::{error, info};

use crate::core::config::RenderConfig;
use crate::core::mixer::Mixer;
use crate::core::notes::ActiveNotes;

/// Frames-per-callback bound used to size mixer scratch buffers up front.
pub const MAX_BLOCK_FRAMES: usize = 4096;

/// Owns the output stream; dropping the engine releases the audio device.
pub struct AudioEngine {
    _stream: Stream,
}

impl AudioEngine {
    /// Open the default output device and start rendering from `notes`.
    ///
    /// The stream keeps running until the engine is dropped; there is no
    /// internal termination condition.
    pub fn start(config: RenderConfig, notes: Arc<ActiveNotes>) -> Result<Self> {
        let host = cpal::default_host();
        info!("audio host: {}", host.id().name());

        let device = host
            .default_output_device()
            .context("no audio output device available")?;
        info!(
            "output device: {}",
            device.name().unwrap_or_else(|_| "unknown".to_string())
        );

        let sample_format = device
            .default_output_config()
            .context("failed to query default output config")?
            .sample_format();
        let stream_config = cpal::StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };
        info!("stream config: {} Hz mono, {sample_format:?}", config.sample_rate);

        let mixer = Mixer::new(config, notes, MAX_BLOCK_FRAMES);
        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, mixer),
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, mixer),
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, mixer),
            other => anyhow::bail!("unsupported sample format {other:?}"),
        }?;

        stream.play().context("failed to start audio stream")?;
        info!("audio stream started");
        Ok(Self { _stream: stream })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut mixer: Mixer,
) -> Result<Stream>
where
    T: Sample + Send + 'static + cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;
    // Underflow and other device status conditions surface here; they are
    // logged and rendering continues.
    let err_fn = |err| error!("audio stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let silence = T::from_sample(0.0f32);
            if channels == 0 || data.len() % channels != 0 {
                // Malformed buffer layout: emit silence for this
                // invocation rather than guessing at a frame boundary.
                data.fill(silence);
                return;
            }
            let frames = data.len() / channels;
            let block = mixer.render_block(frames);
            for (frame, &value) in data.chunks_mut(channels).zip(block.iter()) {
                let value = T::from_sample(value);
                for sample in frame.iter_mut() {
                    *sample = value;
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
