//! cpal glue: device discovery, stream geometry and the output callback.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait},
    BufferSize, FromSample, SampleFormat, SizedSample, SupportedBufferSize,
};
use keytone::{Consumer, StreamSettings};
use tracing::{error, info};

/// The default output device and the configuration it prefers.
pub struct AudioDevice {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
    name: String,
}

impl AudioDevice {
    pub fn open_default() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        let name = device.name().unwrap_or_else(|_| "unknown device".into());

        info!(
            device = %name,
            sample_rate = config.sample_rate().0,
            channels = config.channels(),
            format = ?config.sample_format(),
            "output device opened"
        );

        Ok(Self {
            device,
            config,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stream geometry for this device, with the requested period clamped into
    /// the range the device reports.
    pub fn settings(&self, period_frames: usize, buffer_periods: usize) -> StreamSettings {
        StreamSettings::new(self.config.sample_rate().0, self.config.channels() as usize)
            .with_period_frames(self.clamp_period(period_frames))
            .with_buffer_periods(buffer_periods)
    }

    fn clamp_period(&self, frames: usize) -> usize {
        match self.config.buffer_size() {
            SupportedBufferSize::Range { min, max } => {
                frames.clamp(*min as usize, (*max as usize).max(*min as usize))
            }
            SupportedBufferSize::Unknown => frames,
        }
    }

    /// Build the output stream. The stream is created paused on some hosts;
    /// the caller starts it with `play()`.
    pub fn build_stream(
        &self,
        settings: &StreamSettings,
        consumer: Consumer,
        scope: rtrb::Producer<f32>,
    ) -> EyreResult<cpal::Stream> {
        let buffer_size = match self.config.buffer_size() {
            SupportedBufferSize::Range { .. } => BufferSize::Fixed(settings.period_frames as u32),
            SupportedBufferSize::Unknown => BufferSize::Default,
        };
        let config = cpal::StreamConfig {
            channels: settings.channels as u16,
            sample_rate: cpal::SampleRate(settings.sample_rate),
            buffer_size,
        };

        match self.config.sample_format() {
            SampleFormat::F32 => self.build::<f32>(&config, consumer, scope),
            SampleFormat::I16 => self.build::<i16>(&config, consumer, scope),
            SampleFormat::U16 => self.build::<u16>(&config, consumer, scope),
            other => Err(eyre!("unsupported sample format: {other:?}")),
        }
    }

    fn build<T>(
        &self,
        config: &cpal::StreamConfig,
        consumer: Consumer,
        mut scope: rtrb::Producer<f32>,
    ) -> EyreResult<cpal::Stream>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let channels = consumer.channels();
        // The ring never holds more than capacity - 1 samples, so one frame
        // short of capacity is the largest read that can succeed. Bigger
        // device buffers are served in several reads and the scratch never
        // grows inside the callback.
        let mut scratch = vec![0.0f32; consumer.ring().capacity() - channels];

        let stream = self
            .device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    consumer.render_as_with(data, &mut scratch, |block| {
                        // First channel only, dropped when the UI falls behind
                        for frame in block.chunks_exact(channels) {
                            if scope.push(frame[0]).is_err() {
                                break;
                            }
                        }
                    });
                },
                |err| error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        Ok(stream)
    }
}
